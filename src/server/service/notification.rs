use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::notification::{
        Notification, NotificationDraft, NotificationFilter, NotificationPage, NOTIFICATION_TYPES,
    },
};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Keeps the row offset `(page - 1) * per_page` well inside `i64`.
pub const MAX_PAGE: u64 = u32::MAX as u64;

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records each draft independently.
    ///
    /// Failures are logged and skipped; they never fail the operation that produced the
    /// drafts. Returns the notifications that were recorded.
    pub async fn dispatch(&self, drafts: Vec<NotificationDraft>) -> Vec<Notification> {
        let repo = NotificationRepository::new(self.db);
        let mut recorded = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let recipient_id = draft.recipient_id;
            let notification_type = draft.kind.type_tag();

            match repo.create(draft).await {
                Ok(notification) => recorded.push(notification),
                Err(e) => tracing::warn!(
                    recipient_id,
                    notification_type,
                    "Failed to record notification: {}",
                    e
                ),
            }
        }

        recorded
    }

    /// Gets a page of the recipient's notifications.
    ///
    /// `page` is 1-based and clamped to `1..=MAX_PAGE`; `per_page` is clamped to `1..=100`.
    /// Pages past the last one come back empty.
    pub async fn get_paginated(
        &self,
        recipient_id: i32,
        filter: NotificationFilter,
        page: u64,
        per_page: u64,
    ) -> Result<NotificationPage, AppError> {
        if let Some(notification_type) = &filter.notification_type {
            if !NOTIFICATION_TYPES.contains(&notification_type.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "Unknown notification type '{}'",
                    notification_type
                )));
            }
        }

        let page = page.clamp(1, MAX_PAGE);
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);

        Ok(NotificationRepository::new(self.db)
            .get_paginated(recipient_id, filter, page, per_page)
            .await?)
    }

    pub async fn unread_count(&self, recipient_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_count(recipient_id)
            .await?)
    }

    pub async fn mark_read(
        &self,
        notification_id: i32,
        recipient_id: i32,
    ) -> Result<Notification, AppError> {
        NotificationRepository::new(self.db)
            .mark_read(notification_id, recipient_id, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }

    pub async fn mark_all_read(&self, recipient_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(recipient_id, Utc::now())
            .await?)
    }

    pub async fn delete(&self, notification_id: i32, recipient_id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .delete(notification_id, recipient_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }
}
