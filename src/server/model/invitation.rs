use chrono::{DateTime, Duration, Utc};

use crate::{
    model::invitation::{InvitationBoardDto, InvitationDto, InviteResultDto},
    server::model::{notification::Notification, user::UserDirectory},
};

/// How long an invitation stays pending.
pub fn invitation_ttl() -> Duration {
    Duration::days(7)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInvitation {
    pub id: i32,
    pub board_id: i32,
    pub invited_by: i32,
    pub invited_user: i32,
    pub is_accepted: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An invitation together with the name of the board it points at.
#[derive(Debug, Clone)]
pub struct InvitationWithBoard {
    pub invitation: BoardInvitation,
    pub board_name: String,
}

impl BoardInvitation {
    pub fn from_entity(entity: entity::board_invitation::Model) -> Self {
        Self {
            id: entity.id,
            board_id: entity.board_id,
            invited_by: entity.invited_by,
            invited_user: entity.invited_user,
            is_accepted: entity.is_accepted,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Pending means neither accepted nor past its expiry.
    pub fn is_pending(&self, now: DateTime<Utc>) -> bool {
        !self.is_accepted && self.expires_at > now
    }
}

impl InvitationWithBoard {
    pub fn into_dto(self, users: &UserDirectory) -> InvitationDto {
        let invitation = self.invitation;
        InvitationDto {
            id: invitation.id,
            board: InvitationBoardDto {
                id: invitation.board_id,
                name: self.board_name,
            },
            invited_by: users.resolve(invitation.invited_by).into_dto(),
            invited_user: users.resolve(invitation.invited_user).into_dto(),
            is_accepted: invitation.is_accepted,
            expires_at: invitation.expires_at,
            created_at: invitation.created_at,
            updated_at: invitation.updated_at,
        }
    }
}

/// Invitations sharing one user directory.
#[derive(Debug, Clone)]
pub struct InvitationList {
    pub invitations: Vec<InvitationWithBoard>,
    pub users: UserDirectory,
}

impl InvitationList {
    pub fn into_dto(self) -> Vec<InvitationDto> {
        let users = self.users;
        self.invitations
            .into_iter()
            .map(|i| i.into_dto(&users))
            .collect()
    }
}

/// Result of sending an invitation.
#[derive(Debug, Clone)]
pub struct InviteOutcome {
    pub invitation: InvitationWithBoard,
    pub users: UserDirectory,
    /// `None` when recording the notification failed.
    pub notification: Option<Notification>,
}

impl InviteOutcome {
    pub fn into_dto(self) -> InviteResultDto {
        InviteResultDto {
            invitation: self.invitation.into_dto(&self.users),
            notification: self.notification.map(Notification::into_dto),
        }
    }
}
