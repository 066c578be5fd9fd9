//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// User repository trait
///
/// Every lookup sees active (not soft-deleted) rows only.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return it with its assigned ID
    ///
    /// Fails with `UserNameTaken` when an active user already holds the name.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    /// Find active user by user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if an active user holds the name
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Persist profile fields and password hash
    ///
    /// Returns `false` when no active row matched.
    async fn update(&self, user: &User) -> AuthResult<bool>;

    /// Flag the active row as deleted
    ///
    /// Returns `false` when no active row matched.
    async fn soft_delete(&self, user_name: &UserName) -> AuthResult<bool>;
}
