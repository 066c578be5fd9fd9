//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod delete_user;
pub mod get_user;
pub mod register;
pub mod token;
pub mod update_user;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use config::AuthConfig;
pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, TokenService};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};

use crate::domain::value_object::user_name::{UserName, UserNameError};
use crate::error::{AuthError, AuthResult};

/// Parse a user name from request input; blank input is a missing field
pub(crate) fn parse_user_name(raw: &str) -> AuthResult<UserName> {
    UserName::new(raw).map_err(|e| match e {
        UserNameError::Empty => AuthError::MissingField("username"),
        other => AuthError::InvalidInput(other.to_string()),
    })
}
