//! PostgreSQL Repository Implementations

use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                birth_date,
                height
            ) VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.user_name.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.birth_date.as_deref())
        .bind(user.height.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(unique_violation_as_taken)?;

        Ok(user.into_user(UserId::new(user_id)))
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                birth_date,
                height
            FROM users
            WHERE username = $1 AND NOT is_deleted
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND NOT is_deleted)",
        )
        .bind(user_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                birth_date = $3,
                height = $4,
                updated_at = now()
            WHERE id = $1 AND NOT is_deleted
            "#,
        )
        .bind(user.user_id.value())
        .bind(user.password.as_phc_string())
        .bind(user.birth_date.as_deref())
        .bind(user.height.as_deref())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn soft_delete(&self, user_name: &UserName) -> AuthResult<bool> {
        let deleted = sqlx::query(
            r#"
            UPDATE users SET
                is_deleted = TRUE,
                updated_at = now()
            WHERE username = $1 AND NOT is_deleted
            "#,
        )
        .bind(user_name.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }
}

/// The partial unique index on active user names reports concurrent
/// duplicate registrations as 23505.
fn unique_violation_as_taken(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AuthError::UserNameTaken,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    birth_date: Option<String>,
    height: Option<String>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::new(self.id),
            user_name: UserName::from_db(self.username),
            password: UserPassword::from_db(self.password_hash)?,
            birth_date: self.birth_date,
            height: self.height,
        })
    }
}
