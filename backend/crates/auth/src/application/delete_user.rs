//! Delete User Use Case
//!
//! Soft-deletes the account; the row is kept but no longer visible.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_name: &UserName) -> AuthResult<()> {
        if !self.user_repo.soft_delete(user_name).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_name = %user_name, "User deleted");

        Ok(())
    }
}
