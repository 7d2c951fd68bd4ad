use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{
        board::BoardRepository, invitation::InvitationRepository,
        notification::NotificationRepository, user::UserRepository,
    },
    model::{
        board::CreateBoardParams,
        notification::{NotificationDraft, NotificationFilter, NotificationPriority},
    },
};

mod board;
mod user;
