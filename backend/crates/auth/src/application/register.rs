//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

use super::parse_user_name;

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
    pub birth_date: Option<String>,
    pub height: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let user_name = parse_user_name(&input.user_name)?;
        let raw_password = RawPassword::new(input.password)?;

        // Fast path; the store's unique index settles concurrent registrations
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = self
            .user_repo
            .create(NewUser::new(user_name, password, input.birth_date, input.height))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(user)
    }
}
