//! User repository implementation.
//!
//! Account management lives in an external service; this repository only
//! reads user rows for validation and for the explicit display-name joins
//! assembled by the orchestrator.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use shuttlehub_core::error::{AppError, ErrorKind};
use shuttlehub_core::result::AppResult;
use shuttlehub_entity::user::User;

/// Repository for user rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user by id.
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch user", e))
    }

    /// Fetch a single user's display name.
    pub async fn display_name(&self, user_id: Uuid) -> AppResult<Option<String>> {
        sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch user name", e))
    }

    /// Fetch display names for a set of users.
    pub async fn display_names(&self, user_ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM users WHERE id = ANY($1)")
                .bind(user_ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to fetch user names", e)
                })?;
        Ok(rows.into_iter().collect())
    }
}
