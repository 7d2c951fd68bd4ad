//! Board membership and the invitation lifecycle.
//!
//! An invitation is pending until it is accepted (kept, flagged accepted), declined
//! (deleted) or swept after expiry (deleted). Only pending invitations can be answered.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{board::BoardRepository, invitation::InvitationRepository, user::UserRepository},
    error::{board::BoardError, invitation::InvitationError, AppError},
    model::{
        board::{BoardRole, BoardWithUsers},
        invitation::{invitation_ttl, InvitationList, InvitationWithBoard, InviteOutcome},
        notification::NotificationDraft,
    },
    service::{
        board::{load_authorized, with_users},
        notification::NotificationService,
    },
};

pub struct InvitationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvitationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Invites the user registered under `email` to the board. Owner only.
    ///
    /// # Returns
    /// - `Ok(InviteOutcome)` - Invitation created; `notification` is `None` if recording it failed
    /// - `Err(BoardErr(BoardNotFound))` - No such board
    /// - `Err(AuthErr(AccessDenied))` - Caller is not the owner
    /// - `Err(InvitationErr(UserNotFound))` - No user with that email
    /// - `Err(InvitationErr(SelfInvite))` - Email belongs to the caller
    /// - `Err(InvitationErr(AlreadyMember))` - User already belongs to the board
    /// - `Err(InvitationErr(DuplicateInvitation))` - A pending invitation already exists
    pub async fn invite(
        &self,
        board_id: i32,
        inviter_id: i32,
        email: &str,
    ) -> Result<InviteOutcome, AppError> {
        let board = load_authorized(self.db, board_id, inviter_id, BoardRole::Owner).await?;
        let user_repo = UserRepository::new(self.db);
        let invitation_repo = InvitationRepository::new(self.db);

        let Some(invitee) = user_repo.find_by_email(email).await? else {
            return Err(InvitationError::UserNotFound.into());
        };
        if invitee.id == inviter_id {
            return Err(InvitationError::SelfInvite.into());
        }
        if board.is_member(invitee.id) {
            return Err(InvitationError::AlreadyMember.into());
        }

        let now = Utc::now();
        if invitation_repo
            .find_pending_for_board_user(board.id, invitee.id, now)
            .await?
            .is_some()
        {
            return Err(InvitationError::DuplicateInvitation.into());
        }

        let invitation = invitation_repo
            .create(board.id, inviter_id, invitee.id, now + invitation_ttl())
            .await?;
        tracing::debug!(
            board_id,
            invitation_id = invitation.id,
            invited_user = invitee.id,
            "Created invitation"
        );

        let draft = NotificationDraft::invitation_sent(
            invitation.id,
            board.id,
            &board.name,
            inviter_id,
            invitee.id,
        );
        let notification = NotificationService::new(self.db)
            .dispatch(vec![draft])
            .await
            .pop();

        let users = user_repo.directory([inviter_id, invitee.id]).await?;

        Ok(InviteOutcome {
            invitation: InvitationWithBoard {
                invitation,
                board_name: board.name,
            },
            users,
            notification,
        })
    }

    /// Accepts or declines a pending invitation addressed to `user_id`.
    ///
    /// Returns the joined board on accept and `None` on decline. The inviter is notified
    /// either way.
    pub async fn respond(
        &self,
        invitation_id: i32,
        user_id: i32,
        accept: bool,
    ) -> Result<Option<BoardWithUsers>, AppError> {
        let invitation_repo = InvitationRepository::new(self.db);
        let now = Utc::now();

        let Some(invitation) = invitation_repo
            .find_pending_by_id(invitation_id, user_id, now)
            .await?
        else {
            return Err(InvitationError::InvitationNotFound.into());
        };
        let Some(board) = BoardRepository::new(self.db)
            .find_by_id(invitation.board_id)
            .await?
        else {
            return Err(BoardError::BoardNotFound(invitation.board_id).into());
        };

        let notifications = NotificationService::new(self.db);

        if accept {
            invitation_repo.accept(&invitation, now).await?;
            tracing::debug!(board_id = board.id, user_id, "Invitation accepted");

            notifications
                .dispatch(vec![NotificationDraft::invitation_accepted(
                    board.id,
                    &board.name,
                    invitation.invited_by,
                    user_id,
                )])
                .await;

            let Some(board) = BoardRepository::new(self.db).find_by_id(board.id).await? else {
                return Err(BoardError::BoardNotFound(invitation.board_id).into());
            };

            return Ok(Some(with_users(self.db, board).await?));
        }

        invitation_repo.delete(invitation.id).await?;
        tracing::debug!(board_id = board.id, user_id, "Invitation declined");

        notifications
            .dispatch(vec![NotificationDraft::invitation_declined(
                invitation.id,
                board.id,
                &board.name,
                invitation.invited_by,
                user_id,
            )])
            .await;

        Ok(None)
    }

    /// Lists the caller's pending invitations.
    pub async fn received(&self, user_id: i32) -> Result<InvitationList, AppError> {
        let invitations = InvitationRepository::new(self.db)
            .find_pending_for_user(user_id, Utc::now())
            .await?;

        let users = UserRepository::new(self.db)
            .directory(invitations.iter().flat_map(|i| {
                [i.invitation.invited_by, i.invitation.invited_user]
            }))
            .await?;

        Ok(InvitationList { invitations, users })
    }

    /// Removes the caller from the board's members and notifies the owner.
    pub async fn leave(&self, board_id: i32, user_id: i32) -> Result<(), AppError> {
        let board_repo = BoardRepository::new(self.db);
        let Some(mut board) = board_repo.find_by_id(board_id).await? else {
            return Err(BoardError::BoardNotFound(board_id).into());
        };

        if board.is_owner(user_id) {
            return Err(InvitationError::OwnerCannotLeave.into());
        }
        if !board.members.remove(&user_id) {
            return Err(InvitationError::NotAMember.into());
        }
        board.updated_at = Utc::now();

        let board = board_repo.save(&board).await?;
        tracing::debug!(board_id, user_id, "Member left board");

        NotificationService::new(self.db)
            .dispatch(vec![NotificationDraft::member_left(
                board.id,
                &board.name,
                board.owner_id,
                user_id,
            )])
            .await;

        Ok(())
    }

    /// Removes `member_id` from the board and notifies them. Owner only.
    pub async fn remove_member(
        &self,
        board_id: i32,
        owner_id: i32,
        member_id: i32,
    ) -> Result<(), AppError> {
        let mut board = load_authorized(self.db, board_id, owner_id, BoardRole::Owner).await?;

        if board.is_owner(member_id) {
            return Err(InvitationError::OwnerCannotLeave.into());
        }
        if !board.members.remove(&member_id) {
            return Err(InvitationError::MemberNotFound(member_id).into());
        }
        board.updated_at = Utc::now();

        let board = BoardRepository::new(self.db).save(&board).await?;
        tracing::debug!(board_id, member_id, "Removed member from board");

        NotificationService::new(self.db)
            .dispatch(vec![NotificationDraft::member_removed(
                board.id,
                &board.name,
                owner_id,
                member_id,
            )])
            .await;

        Ok(())
    }

    /// Deletes every expired, unaccepted invitation, notifying each inviter first.
    ///
    /// Returns the number of invitations deleted.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let invitation_repo = InvitationRepository::new(self.db);
        let notifications = NotificationService::new(self.db);

        let expired = invitation_repo.find_expired(now).await?;
        let mut deleted = 0;

        for InvitationWithBoard {
            invitation,
            board_name,
        } in expired
        {
            notifications
                .dispatch(vec![NotificationDraft::invitation_expired(
                    invitation.id,
                    invitation.board_id,
                    &board_name,
                    invitation.invited_by,
                    invitation.invited_user,
                )])
                .await;

            if invitation_repo.delete(invitation.id).await? {
                deleted += 1;
            }
        }

        if deleted > 0 {
            tracing::info!("Swept {} expired invitation(s)", deleted);
        }

        Ok(deleted)
    }
}
