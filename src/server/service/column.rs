use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::board::BoardRepository,
    error::AppError,
    model::{
        board::BoardRole,
        column::{Column, ColumnChanges, NewColumn},
    },
    service::board::load_authorized,
};

pub struct ColumnService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ColumnService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the board's columns in order.
    pub async fn list(&self, board_id: i32, user_id: i32) -> Result<Vec<Column>, AppError> {
        let board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;

        Ok(board.columns)
    }

    /// Appends a column to the board.
    pub async fn create(
        &self,
        board_id: i32,
        user_id: i32,
        new_column: NewColumn,
    ) -> Result<Column, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        let column_id = board.insert_column(new_column, Utc::now())?.id;

        let board = BoardRepository::new(self.db).save(&board).await?;
        tracing::debug!(board_id, %column_id, "Created column");

        Ok(board.column(column_id)?.clone())
    }

    pub async fn update(
        &self,
        board_id: i32,
        user_id: i32,
        column_id: Uuid,
        changes: ColumnChanges,
    ) -> Result<Column, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        board.update_column(column_id, changes, Utc::now())?;

        let board = BoardRepository::new(self.db).save(&board).await?;

        Ok(board.column(column_id)?.clone())
    }

    /// Deletes an empty, non-default column. Owner only.
    pub async fn delete(&self, board_id: i32, user_id: i32, column_id: Uuid) -> Result<(), AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Owner).await?;
        board.remove_column(column_id, Utc::now())?;

        BoardRepository::new(self.db).save(&board).await?;
        tracing::debug!(board_id, %column_id, "Deleted column");

        Ok(())
    }

    /// Moves a column to `new_order` and returns the resulting column order.
    pub async fn reorder(
        &self,
        board_id: i32,
        user_id: i32,
        column_id: Uuid,
        new_order: i64,
    ) -> Result<Vec<Column>, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        board.reorder_column(column_id, new_order, Utc::now())?;

        let board = BoardRepository::new(self.db).save(&board).await?;

        Ok(board.columns)
    }
}

