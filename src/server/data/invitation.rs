use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::invitation::{BoardInvitation, InvitationWithBoard};

pub struct InvitationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvitationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending invitation.
    pub async fn create(
        &self,
        board_id: i32,
        invited_by: i32,
        invited_user: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<BoardInvitation, DbErr> {
        let now = Utc::now();
        let entity = entity::board_invitation::ActiveModel {
            board_id: ActiveValue::Set(board_id),
            invited_by: ActiveValue::Set(invited_by),
            invited_user: ActiveValue::Set(invited_user),
            is_accepted: ActiveValue::Set(false),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(BoardInvitation::from_entity(entity))
    }

    /// Finds the pending invitation for a (board, user) pair, if any.
    pub async fn find_pending_for_board_user(
        &self,
        board_id: i32,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<BoardInvitation>, DbErr> {
        let entity = entity::prelude::BoardInvitation::find()
            .filter(entity::board_invitation::Column::BoardId.eq(board_id))
            .filter(entity::board_invitation::Column::InvitedUser.eq(user_id))
            .filter(entity::board_invitation::Column::IsAccepted.eq(false))
            .filter(entity::board_invitation::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await?;

        Ok(entity.map(BoardInvitation::from_entity))
    }

    /// Finds a pending invitation by ID addressed to `user_id`.
    ///
    /// Accepted and expired invitations are excluded, so answering twice finds nothing.
    pub async fn find_pending_by_id(
        &self,
        invitation_id: i32,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<BoardInvitation>, DbErr> {
        let entity = entity::prelude::BoardInvitation::find_by_id(invitation_id)
            .filter(entity::board_invitation::Column::InvitedUser.eq(user_id))
            .filter(entity::board_invitation::Column::IsAccepted.eq(false))
            .filter(entity::board_invitation::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await?;

        Ok(entity.map(BoardInvitation::from_entity))
    }

    /// Gets the user's pending invitations with their board names, newest first.
    pub async fn find_pending_for_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<InvitationWithBoard>, DbErr> {
        let rows = entity::prelude::BoardInvitation::find()
            .filter(entity::board_invitation::Column::InvitedUser.eq(user_id))
            .filter(entity::board_invitation::Column::IsAccepted.eq(false))
            .filter(entity::board_invitation::Column::ExpiresAt.gt(now))
            .find_also_related(entity::prelude::Board)
            .order_by_desc(entity::board_invitation::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(invitation, board)| {
                board.map(|board| InvitationWithBoard {
                    invitation: BoardInvitation::from_entity(invitation),
                    board_name: board.name,
                })
            })
            .collect())
    }

    /// Gets every unaccepted invitation whose expiry has passed, with board names.
    pub async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<InvitationWithBoard>, DbErr> {
        let rows = entity::prelude::BoardInvitation::find()
            .filter(entity::board_invitation::Column::IsAccepted.eq(false))
            .filter(entity::board_invitation::Column::ExpiresAt.lt(now))
            .find_also_related(entity::prelude::Board)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(invitation, board)| InvitationWithBoard {
                board_name: board.map(|b| b.name).unwrap_or_default(),
                invitation: BoardInvitation::from_entity(invitation),
            })
            .collect())
    }

    /// Marks the invitation accepted and adds the invited user to the board's members.
    ///
    /// Both writes happen in one transaction. Adding an existing member is a no-op.
    pub async fn accept(&self, invitation: &BoardInvitation, now: DateTime<Utc>) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::BoardMember::find_by_id((
            invitation.board_id,
            invitation.invited_user,
        ))
        .one(&txn)
        .await?;

        if existing.is_none() {
            entity::board_member::ActiveModel {
                board_id: ActiveValue::Set(invitation.board_id),
                user_id: ActiveValue::Set(invitation.invited_user),
                joined_at: ActiveValue::Set(now),
            }
            .insert(&txn)
            .await?;
        }

        entity::board_invitation::ActiveModel {
            id: ActiveValue::Unchanged(invitation.id),
            is_accepted: ActiveValue::Set(true),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Deletes an invitation.
    ///
    /// # Returns
    /// - `Ok(true)` - Invitation deleted
    /// - `Ok(false)` - No invitation with that ID
    pub async fn delete(&self, invitation_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::BoardInvitation::delete_by_id(invitation_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
