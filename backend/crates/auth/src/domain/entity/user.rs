//! User Entity
//!
//! Active user record. Soft-deleted rows never materialize as a `User`.

use kernel::id::UserId;

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub user_id: UserId,
    /// Unique among active users, immutable after registration
    pub user_name: UserName,
    /// Argon2id hash, never serialized outward
    pub password: UserPassword,
    /// Display string, free-form
    pub birth_date: Option<String>,
    /// Display string, free-form
    pub height: Option<String>,
}

/// User not yet persisted (no ID)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password: UserPassword,
    pub birth_date: Option<String>,
    pub height: Option<String>,
}

impl NewUser {
    pub fn new(
        user_name: UserName,
        password: UserPassword,
        birth_date: Option<String>,
        height: Option<String>,
    ) -> Self {
        Self {
            user_name,
            password,
            birth_date: non_blank(birth_date),
            height: non_blank(height),
        }
    }

    /// Attach the store-assigned ID
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            user_name: self.user_name,
            password: self.password,
            birth_date: self.birth_date,
            height: self.height,
        }
    }
}

/// Partial profile update
///
/// `None` and blank strings leave the current value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub birth_date: Option<String>,
    pub height: Option<String>,
    pub password: Option<UserPassword>,
}

impl User {
    /// Merge a partial update, returning whether anything changed
    pub fn apply(&mut self, patch: UserPatch) -> bool {
        let mut changed = false;

        if let Some(birth_date) = non_blank(patch.birth_date) {
            if self.birth_date.as_deref() != Some(birth_date.as_str()) {
                self.birth_date = Some(birth_date);
                changed = true;
            }
        }

        if let Some(height) = non_blank(patch.height) {
            if self.height.as_deref() != Some(height.as_str()) {
                self.height = Some(height);
                changed = true;
            }
        }

        if let Some(password) = patch.password {
            self.password = password;
            changed = true;
        }

        changed
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
