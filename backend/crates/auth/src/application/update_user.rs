//! Update User Use Case
//!
//! Partial profile merge. Only present, non-blank fields overwrite.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::UserPatch;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Update input
#[derive(Default)]
pub struct UpdateUserInput {
    pub birth_date: Option<String>,
    pub height: Option<String>,
    pub password: Option<String>,
}

/// Update user use case
pub struct UpdateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UpdateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_name: &UserName, input: UpdateUserInput) -> AuthResult<()> {
        let mut user = self
            .user_repo
            .find_by_user_name(user_name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // A blank password means "leave unchanged"
        let password = match input.password.filter(|p| !p.trim().is_empty()) {
            Some(raw) => {
                let raw = RawPassword::new(raw)?;
                Some(UserPassword::from_raw(&raw, self.config.pepper())?)
            }
            None => None,
        };

        let changed = user.apply(UserPatch {
            birth_date: input.birth_date,
            height: input.height,
            password,
        });

        if !changed {
            tracing::debug!(user_name = %user_name, "Profile update with no changes");
            return Ok(());
        }

        if !self.user_repo.update(&user).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_name = %user_name, "User profile updated");

        Ok(())
    }
}
