//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use shuttlehub_core::error::{AppError, ErrorKind};
use shuttlehub_core::result::AppResult;
use shuttlehub_entity::notification::{Notification, NotificationKind, NotificationRef};

/// Maximum notifications returned per listing.
const LIST_LIMIT: i64 = 50;

/// Repository for notification rows.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a notification.
    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        kind: NotificationKind,
        related_item_id: Option<Uuid>,
        ref_model: NotificationRef,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, title, message, kind, related_item_id, ref_model) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(message)
        .bind(kind)
        .bind(related_item_id)
        .bind(ref_model)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }

    /// List a user's most recent notifications.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    /// Mark one notification as read, scoped to the owning user.
    ///
    /// Returns `None` when no notification with that id belongs to the user.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))
    }

    /// Mark all of a user's unread notifications as read in one statement.
    ///
    /// Returns the number of rows flipped.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to mark all read", e)
                })?;
        Ok(result.rows_affected())
    }
}
