//! Notification dispatch and read-state management.
//!
//! `dispatch` is the single entry point for creating notifications: the row
//! is persisted unconditionally, then pushed to the recipient's room on a
//! best-effort basis. A push failure never rolls back persistence or the
//! operation that triggered it.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shuttlehub_core::error::AppError;
use shuttlehub_database::repositories::notification::NotificationRepository;
use shuttlehub_entity::notification::{Notification, NotificationKind, NotificationRef};

use crate::context::RequestContext;
use crate::events::EventPublisher;

/// Manages persisted notifications and forwards them to the realtime channel.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
    /// Realtime event port.
    events: Arc<dyn EventPublisher>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notification_repo: Arc<NotificationRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            notification_repo,
            events,
        }
    }

    /// Persists a notification and pushes it to the recipient's room.
    pub async fn dispatch(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        kind: NotificationKind,
        related_item_id: Option<Uuid>,
        ref_model: NotificationRef,
    ) -> Result<Notification, AppError> {
        let notification = self
            .notification_repo
            .create(user_id, title, message, kind, related_item_id, ref_model)
            .await?;

        // Push after the row is durable. The publisher swallows failures.
        self.events.notification_created(&notification).await;

        debug!(
            notification_id = %notification.id,
            user_id = %user_id,
            kind = %kind,
            "Notification dispatched"
        );

        Ok(notification)
    }

    /// Lists the current user's most recent notifications.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Notification>, AppError> {
        self.notification_repo.find_by_user(ctx.user_id).await
    }

    /// Marks one notification as read, scoped to the current user.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<Notification, AppError> {
        self.notification_repo
            .mark_read(notification_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Marks all of the current user's notifications as read.
    ///
    /// Bulk operation; intentionally silent on the realtime channel.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notification_repo.mark_all_read(ctx.user_id).await
    }
}
