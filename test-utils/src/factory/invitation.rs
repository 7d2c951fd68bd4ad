//! Board invitation factory for creating test invitation entities.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test invitations with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::invitation::InvitationFactory;
///
/// let expired = InvitationFactory::new(&db, board.id, owner.id, invitee.id)
///     .expires_at(Utc::now() - Duration::days(1))
///     .build()
///     .await?;
/// ```
pub struct InvitationFactory<'a> {
    db: &'a DatabaseConnection,
    board_id: i32,
    invited_by: i32,
    invited_user: i32,
    is_accepted: bool,
    expires_at: DateTime<Utc>,
}

impl<'a> InvitationFactory<'a> {
    /// Creates a new InvitationFactory with default values.
    ///
    /// Defaults:
    /// - is_accepted: `false`
    /// - expires_at: 7 days from now
    pub fn new(
        db: &'a DatabaseConnection,
        board_id: i32,
        invited_by: i32,
        invited_user: i32,
    ) -> Self {
        Self {
            db,
            board_id,
            invited_by,
            invited_user,
            is_accepted: false,
            expires_at: Utc::now() + Duration::days(7),
        }
    }

    /// Sets whether the invitation is already accepted.
    pub fn accepted(mut self, is_accepted: bool) -> Self {
        self.is_accepted = is_accepted;
        self
    }

    /// Sets the expiry timestamp.
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Builds and inserts the invitation entity into the database.
    pub async fn build(self) -> Result<entity::board_invitation::Model, DbErr> {
        let now = Utc::now();
        entity::board_invitation::ActiveModel {
            id: ActiveValue::NotSet,
            board_id: ActiveValue::Set(self.board_id),
            invited_by: ActiveValue::Set(self.invited_by),
            invited_user: ActiveValue::Set(self.invited_user),
            is_accepted: ActiveValue::Set(self.is_accepted),
            expires_at: ActiveValue::Set(self.expires_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending invitation with default values.
pub async fn create_invitation(
    db: &DatabaseConnection,
    board_id: i32,
    invited_by: i32,
    invited_user: i32,
) -> Result<entity::board_invitation::Model, DbErr> {
    InvitationFactory::new(db, board_id, invited_by, invited_user)
        .build()
        .await
}
