use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{board::BoardDto, notification::NotificationDto, user::UserSummaryDto};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteDto {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespondInvitationDto {
    pub accept: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationBoardDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDto {
    pub id: i32,
    pub board: InvitationBoardDto,
    pub invited_by: UserSummaryDto,
    pub invited_user: UserSummaryDto,
    pub is_accepted: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteResultDto {
    pub invitation: InvitationDto,
    /// Notification sent to the invited user; absent if recording it failed.
    pub notification: Option<NotificationDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespondResultDto {
    /// The joined board, present only when the invitation was accepted.
    pub board: Option<BoardDto>,
    pub success: bool,
}
