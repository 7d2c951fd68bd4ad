use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{board::BoardRepository, user::UserRepository},
    error::{board::BoardError, AppError},
    model::{
        board::{Board, BoardChanges, BoardList, BoardRole, BoardWithUsers, CreateBoardParams},
        column::NewColumn,
        notification::NotificationDraft,
    },
    service::notification::NotificationService,
};

/// Loads a board and checks that `user_id` holds `role` on it.
///
/// # Returns
/// - `Ok(Board)` - Board exists and the caller is authorized
/// - `Err(BoardErr(BoardNotFound))` - No board with this id
/// - `Err(AuthErr(AccessDenied))` - Caller lacks the required role
/// - `Err(DbErr)` - Database error or undecodable column document
pub(super) async fn load_authorized(
    db: &DatabaseConnection,
    board_id: i32,
    user_id: i32,
    role: BoardRole,
) -> Result<Board, AppError> {
    let Some(board) = BoardRepository::new(db).find_by_id(board_id).await? else {
        return Err(BoardError::BoardNotFound(board_id).into());
    };

    board.authorize(user_id, role)?;

    Ok(board)
}

/// Attaches the users a board response references.
pub(super) async fn with_users(
    db: &DatabaseConnection,
    board: Board,
) -> Result<BoardWithUsers, AppError> {
    let users = UserRepository::new(db)
        .directory(board.referenced_users())
        .await?;

    Ok(BoardWithUsers { board, users })
}

pub struct BoardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BoardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a board owned by `owner_id`.
    ///
    /// Without an explicit column list the board gets the three default columns.
    pub async fn create(
        &self,
        owner_id: i32,
        name: &str,
        description: Option<String>,
        columns: Option<Vec<NewColumn>>,
    ) -> Result<BoardWithUsers, AppError> {
        let params = CreateBoardParams::new(owner_id, name, description, columns, Utc::now())?;
        let board = BoardRepository::new(self.db).create(params).await?;

        tracing::debug!(board_id = board.id, owner_id, "Created board");

        with_users(self.db, board).await
    }

    /// Lists every board the user owns or belongs to, most recently updated first.
    pub async fn list(&self, user_id: i32) -> Result<BoardList, AppError> {
        let boards = BoardRepository::new(self.db).find_for_user(user_id).await?;
        let users = UserRepository::new(self.db)
            .directory(boards.iter().flat_map(Board::referenced_users))
            .await?;

        Ok(BoardList { boards, users })
    }

    pub async fn get(&self, board_id: i32, user_id: i32) -> Result<BoardWithUsers, AppError> {
        let board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;

        with_users(self.db, board).await
    }

    /// Updates name and description. Owner only.
    ///
    /// Every other member receives a `BOARD_UPDATED` notification once the save succeeds.
    pub async fn update(
        &self,
        board_id: i32,
        user_id: i32,
        changes: BoardChanges,
    ) -> Result<BoardWithUsers, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Owner).await?;
        let outcome = board.apply(changes, Utc::now())?;

        let board = BoardRepository::new(self.db).save(&board).await?;

        let drafts = NotificationDraft::board_updated(
            board.id,
            user_id,
            &board.audience_except(user_id),
            &outcome.old_name,
            &outcome.new_name,
            outcome.name_changed,
            outcome.description_changed,
        );
        NotificationService::new(self.db).dispatch(drafts).await;

        with_users(self.db, board).await
    }

    /// Deletes a board with its members and invitations. Owner only.
    ///
    /// Every other member receives a `BOARD_DELETED` notification after the delete has
    /// committed.
    pub async fn delete(&self, board_id: i32, user_id: i32) -> Result<(), AppError> {
        let board = load_authorized(self.db, board_id, user_id, BoardRole::Owner).await?;

        if !BoardRepository::new(self.db).delete(board.id).await? {
            return Err(BoardError::BoardNotFound(board_id).into());
        }

        tracing::info!(board_id, user_id, "Deleted board \"{}\"", board.name);

        let drafts = NotificationDraft::board_deleted(
            board.id,
            &board.name,
            user_id,
            &board.audience_except(user_id),
        );
        NotificationService::new(self.db).dispatch(drafts).await;

        Ok(())
    }
}
