//! Board aggregate repository.
//!
//! A board is stored as one `board` row whose `columns` JSON document holds the ordered
//! columns, tasks and comments, plus one `board_member` row per member. `save` rewrites
//! both inside a single transaction so an aggregate is never partially persisted.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::server::model::board::{Board, CreateBoardParams};

pub struct BoardRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Loads member rows for the given boards, grouped by board.
async fn load_members<C: ConnectionTrait>(
    conn: &C,
    board_ids: Vec<i32>,
) -> Result<HashMap<i32, Vec<entity::board_member::Model>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<entity::board_member::Model>> = HashMap::new();
    if board_ids.is_empty() {
        return Ok(grouped);
    }

    let members = entity::prelude::BoardMember::find()
        .filter(entity::board_member::Column::BoardId.is_in(board_ids))
        .all(conn)
        .await?;

    for member in members {
        grouped.entry(member.board_id).or_default().push(member);
    }

    Ok(grouped)
}

/// Converts board rows to aggregates, attaching their members.
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<entity::board::Model>,
) -> Result<Vec<Board>, DbErr> {
    let mut members = load_members(conn, rows.iter().map(|b| b.id).collect()).await?;

    rows.into_iter()
        .map(|row| {
            let board_members = members.remove(&row.id).unwrap_or_default();
            Board::from_entity(row, board_members)
        })
        .collect()
}

impl<'a> BoardRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new board with the owner as its first member.
    pub async fn create(&self, params: CreateBoardParams) -> Result<Board, DbErr> {
        let now = chrono::Utc::now();
        let columns = serde_json::to_value(&params.columns)
            .map_err(|e| DbErr::Custom(format!("Failed to encode board columns: {}", e)))?;

        let txn = self.db.begin().await?;

        let board = entity::board::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            owner_id: ActiveValue::Set(params.owner_id),
            columns: ActiveValue::Set(columns),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let owner = entity::board_member::ActiveModel {
            board_id: ActiveValue::Set(board.id),
            user_id: ActiveValue::Set(params.owner_id),
            joined_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Board::from_entity(board, vec![owner])
    }

    /// Gets a board aggregate by ID.
    pub async fn find_by_id(&self, board_id: i32) -> Result<Option<Board>, DbErr> {
        let Some(row) = entity::prelude::Board::find_by_id(board_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(hydrate(self.db, vec![row]).await?.pop())
    }

    /// Finds the board that contains the column with `column_id`.
    ///
    /// Narrows candidates with a text match on the stored document, then confirms the
    /// column on the decoded aggregate.
    pub async fn find_by_column_id(&self, column_id: Uuid) -> Result<Option<Board>, DbErr> {
        let rows = entity::prelude::Board::find()
            .filter(entity::board::Column::Columns.like(format!("%{}%", column_id)))
            .all(self.db)
            .await?;

        Ok(hydrate(self.db, rows)
            .await?
            .into_iter()
            .find(|board| board.columns.iter().any(|c| c.id == column_id)))
    }

    /// Gets every board the user owns or is a member of, most recently updated first.
    pub async fn find_for_user(&self, user_id: i32) -> Result<Vec<Board>, DbErr> {
        let member_of: Vec<i32> = entity::prelude::BoardMember::find()
            .filter(entity::board_member::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| m.board_id)
            .collect();

        let rows = entity::prelude::Board::find()
            .filter(
                Condition::any()
                    .add(entity::board::Column::OwnerId.eq(user_id))
                    .add(entity::board::Column::Id.is_in(member_of)),
            )
            .order_by_desc(entity::board::Column::UpdatedAt)
            .all(self.db)
            .await?;

        hydrate(self.db, rows).await
    }

    /// Writes the whole aggregate back: scalar fields, column document and member set.
    ///
    /// Members that left are deleted and new members inserted; existing member rows keep
    /// their join time. Runs in one transaction.
    ///
    /// # Returns
    /// - `Ok(Board)` - The aggregate as stored
    /// - `Err(DbErr::RecordNotUpdated)` - The board row no longer exists
    pub async fn save(&self, board: &Board) -> Result<Board, DbErr> {
        let columns = board.columns_document()?;
        let txn = self.db.begin().await?;

        let row = entity::board::ActiveModel {
            id: ActiveValue::Unchanged(board.id),
            name: ActiveValue::Set(board.name.clone()),
            description: ActiveValue::Set(board.description.clone()),
            owner_id: ActiveValue::Unchanged(board.owner_id),
            columns: ActiveValue::Set(columns),
            created_at: ActiveValue::Unchanged(board.created_at),
            updated_at: ActiveValue::Set(board.updated_at),
        }
        .update(&txn)
        .await?;

        let existing: BTreeSet<i32> = entity::prelude::BoardMember::find()
            .filter(entity::board_member::Column::BoardId.eq(board.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect();

        let departed: Vec<i32> = existing.difference(&board.members).copied().collect();
        if !departed.is_empty() {
            entity::prelude::BoardMember::delete_many()
                .filter(entity::board_member::Column::BoardId.eq(board.id))
                .filter(entity::board_member::Column::UserId.is_in(departed))
                .exec(&txn)
                .await?;
        }

        for user_id in board.members.difference(&existing) {
            entity::board_member::ActiveModel {
                board_id: ActiveValue::Set(board.id),
                user_id: ActiveValue::Set(*user_id),
                joined_at: ActiveValue::Set(board.updated_at),
            }
            .insert(&txn)
            .await?;
        }

        let mut saved = hydrate(&txn, vec![row]).await?;
        txn.commit().await?;

        saved
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound(format!("Board {} after save", board.id)))
    }

    /// Deletes a board with its members and invitations.
    ///
    /// # Returns
    /// - `Ok(true)` - Board deleted
    /// - `Ok(false)` - No board with that ID
    pub async fn delete(&self, board_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::BoardInvitation::delete_many()
            .filter(entity::board_invitation::Column::BoardId.eq(board_id))
            .exec(&txn)
            .await?;
        entity::prelude::BoardMember::delete_many()
            .filter(entity::board_member::Column::BoardId.eq(board_id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Board::delete_by_id(board_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
