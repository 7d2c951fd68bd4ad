use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::notification::NotificationRepository,
    error::{
        auth::AuthError, board::BoardError, invitation::InvitationError, AppError,
    },
    model::{
        board::{Board, BoardChanges},
        notification::{Notification, NotificationFilter},
    },
    service::{
        board::BoardService, column::ColumnService, invitation::InvitationService,
        notification::NotificationService, task::TaskService,
    },
};

mod auth;
mod board;
mod column;
mod task;

/// Creates a board with the default columns through the service.
async fn create_board(db: &DatabaseConnection, owner_id: i32) -> Result<Board, AppError> {
    Ok(BoardService::new(db)
        .create(owner_id, "Roadmap", None, None)
        .await?
        .board)
}

/// Creates a board owned by a fresh user and shared with a second fresh user.
///
/// Returns `(owner_id, member_id, board)`.
async fn create_shared_board(db: &DatabaseConnection) -> Result<(i32, i32, Board), AppError> {
    let owner = factory::user::create_user(db).await?;
    let member = factory::user::create_user(db).await?;
    let mut board = create_board(db, owner.id).await?;

    board.members.insert(member.id);
    let board = crate::server::data::board::BoardRepository::new(db)
        .save(&board)
        .await?;

    Ok((owner.id, member.id, board))
}

/// Notifications recorded for `recipient_id` with the given type tag.
async fn notifications_of(
    db: &DatabaseConnection,
    recipient_id: i32,
    notification_type: &str,
) -> Result<Vec<Notification>, AppError> {
    let page = NotificationRepository::new(db)
        .get_paginated(
            recipient_id,
            NotificationFilter {
                notification_type: Some(notification_type.to_string()),
                is_read: None,
            },
            1,
            100,
        )
        .await?;

    Ok(page.notifications)
}
