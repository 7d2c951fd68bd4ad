//! Notification factory for creating test notification entities.
//!
//! Rows are written with a `MEMBER_LEFT` shaped payload unless overridden, which is
//! enough for read-state and pagination tests that don't inspect metadata.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test notifications with customizable fields.
pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    recipient_id: i32,
    sender_id: i32,
    board_id: i32,
    notification_type: String,
    priority: String,
    message: String,
    metadata: serde_json::Value,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl<'a> NotificationFactory<'a> {
    /// Creates a new NotificationFactory with default values.
    ///
    /// Defaults:
    /// - notification_type: `"MEMBER_LEFT"`
    /// - priority: `"LOW"`
    /// - is_read: `false`
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, recipient_id: i32, sender_id: i32, board_id: i32) -> Self {
        Self {
            db,
            recipient_id,
            sender_id,
            board_id,
            notification_type: "MEMBER_LEFT".to_string(),
            priority: "LOW".to_string(),
            message: "A member has left your board".to_string(),
            metadata: serde_json::json!({
                "boardName": "Board",
                "memberId": sender_id,
            }),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the type tag and the matching metadata payload.
    pub fn kind(mut self, notification_type: impl Into<String>, metadata: serde_json::Value) -> Self {
        self.notification_type = notification_type.into();
        self.metadata = metadata;
        self
    }

    /// Sets the read state.
    pub fn read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the notification entity into the database.
    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            id: ActiveValue::NotSet,
            recipient_id: ActiveValue::Set(self.recipient_id),
            sender_id: ActiveValue::Set(self.sender_id),
            board_id: ActiveValue::Set(self.board_id),
            notification_type: ActiveValue::Set(self.notification_type),
            priority: ActiveValue::Set(self.priority),
            message: ActiveValue::Set(self.message),
            metadata: ActiveValue::Set(self.metadata),
            is_read: ActiveValue::Set(self.is_read),
            created_at: ActiveValue::Set(self.created_at),
            read_at: ActiveValue::Set(if self.is_read { Some(Utc::now()) } else { None }),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unread notification with default values.
pub async fn create_notification(
    db: &DatabaseConnection,
    recipient_id: i32,
    sender_id: i32,
    board_id: i32,
) -> Result<entity::notification::Model, DbErr> {
    NotificationFactory::new(db, recipient_id, sender_id, board_id)
        .build()
        .await
}
