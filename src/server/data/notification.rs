use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::notification::{
    Notification, NotificationDraft, NotificationFilter, NotificationPage,
};

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a notification draft as an unread notification.
    pub async fn create(&self, draft: NotificationDraft) -> Result<Notification, DbErr> {
        let (notification_type, metadata) = draft.kind.encode().map_err(|e| {
            DbErr::Custom(format!("Failed to encode notification metadata: {}", e))
        })?;

        let entity = entity::notification::ActiveModel {
            recipient_id: ActiveValue::Set(draft.recipient_id),
            sender_id: ActiveValue::Set(draft.sender_id),
            board_id: ActiveValue::Set(draft.board_id),
            notification_type: ActiveValue::Set(notification_type),
            priority: ActiveValue::Set(draft.priority.as_str().to_string()),
            message: ActiveValue::Set(draft.message),
            metadata: ActiveValue::Set(metadata),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            read_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Notification::from_entity(entity)
    }

    /// Gets one page of a recipient's notifications, newest first.
    ///
    /// # Arguments
    /// - `recipient_id` - Owner of the notifications
    /// - `filter` - Optional type and read-state filters
    /// - `page` - 1-based page number
    /// - `per_page` - Page size, must be at least 1
    pub async fn get_paginated(
        &self,
        recipient_id: i32,
        filter: NotificationFilter,
        page: u64,
        per_page: u64,
    ) -> Result<NotificationPage, DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::RecipientId.eq(recipient_id));

        if let Some(notification_type) = filter.notification_type {
            query = query.filter(entity::notification::Column::NotificationType.eq(notification_type));
        }
        if let Some(is_read) = filter.is_read {
            query = query.filter(entity::notification::Column::IsRead.eq(is_read));
        }

        let paginator = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let notifications = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NotificationPage {
            notifications,
            total,
            page,
            pages: total.div_ceil(per_page),
        })
    }

    pub async fn unread_count(&self, recipient_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks one of the recipient's notifications read.
    ///
    /// The first read time is kept if the notification was already read.
    ///
    /// # Returns
    /// - `Ok(Some(Notification))` - Updated notification
    /// - `Ok(None)` - No such notification for this recipient
    pub async fn mark_read(
        &self,
        notification_id: i32,
        recipient_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<Notification>, DbErr> {
        let Some(entity) = entity::prelude::Notification::find_by_id(notification_id)
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        if entity.is_read {
            return Notification::from_entity(entity).map(Some);
        }

        let mut active: entity::notification::ActiveModel = entity.into();
        active.is_read = ActiveValue::Set(true);
        active.read_at = ActiveValue::Set(Some(now));
        let entity = active.update(self.db).await?;

        Notification::from_entity(entity).map(Some)
    }

    /// Marks all of the recipient's unread notifications read.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications updated
    pub async fn mark_all_read(&self, recipient_id: i32, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(entity::notification::ActiveModel {
                is_read: ActiveValue::Set(true),
                read_at: ActiveValue::Set(Some(now)),
                ..Default::default()
            })
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes one of the recipient's notifications.
    ///
    /// # Returns
    /// - `Ok(true)` - Notification deleted
    /// - `Ok(false)` - No such notification for this recipient
    pub async fn delete(&self, notification_id: i32, recipient_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(notification_id))
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
