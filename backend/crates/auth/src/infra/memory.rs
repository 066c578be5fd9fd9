//! In-memory Repository Implementation
//!
//! Mirrors the PostgreSQL semantics (active-only lookups, unique active
//! user names, soft delete). Used by tests and when no database is configured.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// In-memory user repository; clones share the same storage
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    inner: Arc<RwLock<UserTable>>,
}

#[derive(Default)]
struct UserTable {
    rows: HashMap<i64, UserRecord>,
    last_id: i64,
}

struct UserRecord {
    user: User,
    is_deleted: bool,
}

impl UserTable {
    fn active(&self, user_name: &UserName) -> Option<&UserRecord> {
        self.rows
            .values()
            .find(|r| !r.is_deleted && &r.user.user_name == user_name)
    }

    fn active_mut(&mut self, user_name: &UserName) -> Option<&mut UserRecord> {
        self.rows
            .values_mut()
            .find(|r| !r.is_deleted && &r.user.user_name == user_name)
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut table = self.inner.write().await;

        if table.active(&user.user_name).is_some() {
            return Err(AuthError::UserNameTaken);
        }

        table.last_id += 1;
        let id = table.last_id;
        let user = user.into_user(UserId::new(id));
        table.rows.insert(
            id,
            UserRecord {
                user: user.clone(),
                is_deleted: false,
            },
        );

        Ok(user)
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let table = self.inner.read().await;
        Ok(table.active(user_name).map(|r| r.user.clone()))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let table = self.inner.read().await;
        Ok(table.active(user_name).is_some())
    }

    async fn update(&self, user: &User) -> AuthResult<bool> {
        let mut table = self.inner.write().await;

        match table
            .rows
            .get_mut(&user.user_id.value())
            .filter(|r| !r.is_deleted)
        {
            Some(record) => {
                record.user = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete(&self, user_name: &UserName) -> AuthResult<bool> {
        let mut table = self.inner.write().await;

        match table.active_mut(user_name) {
            Some(record) => {
                record.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
