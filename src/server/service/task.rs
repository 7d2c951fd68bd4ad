//! Task, comment and assignee operations.
//!
//! Each operation loads the owning board, applies one ordering-engine step to it and saves
//! the whole aggregate. Assignment, completion and mention notifications are dispatched
//! only after that save.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{board::BoardRepository, user::UserRepository},
    error::{board::BoardError, AppError},
    model::{
        board::{Board, BoardRole},
        notification::NotificationDraft,
        task::{NewTask, Task, TaskChanges},
    },
    service::{board::load_authorized, notification::NotificationService},
};

pub struct TaskService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaskService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fails with 404 naming the first id that has no user row.
    async fn ensure_users_exist(&self, user_ids: &[i32]) -> Result<(), AppError> {
        let missing = UserRepository::new(self.db).missing_ids(user_ids).await?;
        match missing.first() {
            Some(id) => Err(AppError::NotFound(format!("User {} not found", id))),
            None => Ok(()),
        }
    }

    async fn save(&self, board: &Board) -> Result<Board, AppError> {
        Ok(BoardRepository::new(self.db).save(board).await?)
    }

    async fn notify(&self, drafts: Vec<NotificationDraft>) {
        if !drafts.is_empty() {
            NotificationService::new(self.db).dispatch(drafts).await;
        }
    }

    /// Creates a task at the end of a column.
    ///
    /// The board is located through the column id; a column that belongs to a different
    /// board than `board_id` is reported as not found.
    ///
    /// # Returns
    /// - `Ok(Task)` - The stored task
    /// - `Err(BoardErr(ColumnNotFound))` - No such column on this board
    /// - `Err(AuthErr(AccessDenied))` - Caller is not a member
    /// - `Err(NotFound)` - An assignee does not exist
    /// - `Err(BoardErr(TaskLimitExceeded))` - The column is full
    pub async fn create(
        &self,
        board_id: i32,
        column_id: Uuid,
        user_id: i32,
        new_task: NewTask,
    ) -> Result<Task, AppError> {
        let mut board = match BoardRepository::new(self.db)
            .find_by_column_id(column_id)
            .await?
        {
            Some(board) if board.id == board_id => board,
            _ => return Err(BoardError::ColumnNotFound(column_id).into()),
        };
        board.authorize(user_id, BoardRole::Member)?;
        self.ensure_users_exist(&new_task.assignees).await?;

        let task = Task::new(new_task, user_id, Utc::now())?;
        let task_id = board.insert_task(column_id, task, Utc::now())?.id;

        let board = self.save(&board).await?;
        let task = board.task(task_id)?.clone();
        tracing::debug!(board_id, %column_id, %task_id, "Created task");

        let assignees: Vec<i32> = task.assignees.iter().copied().collect();
        self.notify(NotificationDraft::assigned(
            board.id,
            user_id,
            &assignees,
            task.id,
            &task.title,
            task.column_id,
        ))
        .await;

        Ok(task)
    }

    /// Lists a column's tasks in order.
    pub async fn list(
        &self,
        board_id: i32,
        column_id: Uuid,
        user_id: i32,
    ) -> Result<Vec<Task>, AppError> {
        let board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;

        Ok(board.column(column_id)?.tasks.clone())
    }

    pub async fn get(&self, board_id: i32, task_id: Uuid, user_id: i32) -> Result<Task, AppError> {
        let board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;

        Ok(board.task(task_id)?.clone())
    }

    /// Applies a partial update.
    ///
    /// Completing the task notifies its assignees; newly added assignees are notified of
    /// the assignment. The actor is never notified.
    pub async fn update(
        &self,
        board_id: i32,
        task_id: Uuid,
        user_id: i32,
        changes: TaskChanges,
    ) -> Result<Task, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        if let Some(assignees) = &changes.assignees {
            self.ensure_users_exist(assignees).await?;
        }

        let outcome = board.task_mut(task_id)?.apply(changes, Utc::now())?;
        board.updated_at = Utc::now();

        let board = self.save(&board).await?;
        let task = board.task(task_id)?.clone();

        let mut drafts = Vec::new();
        if outcome.completed {
            let assignees: Vec<i32> = task.assignees.iter().copied().collect();
            drafts.extend(NotificationDraft::task_completed(
                board.id,
                user_id,
                &assignees,
                task.id,
                &task.title,
                task.column_id,
            ));
        }
        drafts.extend(NotificationDraft::assigned(
            board.id,
            user_id,
            &outcome.added_assignees,
            task.id,
            &task.title,
            task.column_id,
        ));
        self.notify(drafts).await;

        Ok(task)
    }

    pub async fn delete(&self, board_id: i32, task_id: Uuid, user_id: i32) -> Result<(), AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        board.remove_task(task_id, Utc::now())?;

        self.save(&board).await?;
        tracing::debug!(board_id, %task_id, "Deleted task");

        Ok(())
    }

    /// Moves a task to `order` within `target_column_id`, which may be its current column.
    ///
    /// Source and target are rewritten in the same save, so a half-moved task is never
    /// persisted.
    pub async fn move_task(
        &self,
        board_id: i32,
        task_id: Uuid,
        user_id: i32,
        target_column_id: Uuid,
        order: i64,
    ) -> Result<Task, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        board.move_task(task_id, target_column_id, order, Utc::now())?;

        let board = self.save(&board).await?;

        Ok(board.task(task_id)?.clone())
    }

    /// Adds a comment and notifies the users it mentions.
    pub async fn add_comment(
        &self,
        board_id: i32,
        task_id: Uuid,
        user_id: i32,
        content: &str,
    ) -> Result<Task, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        let now = Utc::now();
        let comment = board.task_mut(task_id)?.add_comment(user_id, content, now)?;
        let (comment_id, mentions) = (comment.id, comment.mentions.clone());
        board.updated_at = now;

        let board = self.save(&board).await?;
        let task = board.task(task_id)?.clone();

        self.notify(NotificationDraft::mentioned(
            board.id,
            user_id,
            &mentions,
            task.id,
            &task.title,
            comment_id,
        ))
        .await;

        Ok(task)
    }

    /// Edits a comment. Author only.
    ///
    /// Only users mentioned for the first time by the new content are notified.
    pub async fn edit_comment(
        &self,
        board_id: i32,
        task_id: Uuid,
        comment_id: Uuid,
        user_id: i32,
        content: &str,
    ) -> Result<Task, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        let now = Utc::now();
        let new_mentions = board
            .task_mut(task_id)?
            .edit_comment(comment_id, user_id, content, now)?;
        board.updated_at = now;

        let board = self.save(&board).await?;
        let task = board.task(task_id)?.clone();

        self.notify(NotificationDraft::mentioned(
            board.id,
            user_id,
            &new_mentions,
            task.id,
            &task.title,
            comment_id,
        ))
        .await;

        Ok(task)
    }

    /// Deletes a comment. Author only.
    pub async fn delete_comment(
        &self,
        board_id: i32,
        task_id: Uuid,
        comment_id: Uuid,
        user_id: i32,
    ) -> Result<Task, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        let now = Utc::now();
        board
            .task_mut(task_id)?
            .remove_comment(comment_id, user_id, now)?;
        board.updated_at = now;

        let board = self.save(&board).await?;

        Ok(board.task(task_id)?.clone())
    }

    /// Assigns `assignee_id` to the task.
    ///
    /// Idempotent: assigning an existing assignee saves nothing and sends no notification.
    pub async fn assign(
        &self,
        board_id: i32,
        task_id: Uuid,
        user_id: i32,
        assignee_id: i32,
    ) -> Result<Task, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;
        board.task(task_id)?;
        if !UserRepository::new(self.db).exists(assignee_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", assignee_id)));
        }

        let now = Utc::now();
        if !board.task_mut(task_id)?.assign(assignee_id, now) {
            return Ok(board.task(task_id)?.clone());
        }
        board.updated_at = now;

        let board = self.save(&board).await?;
        let task = board.task(task_id)?.clone();

        self.notify(NotificationDraft::assigned(
            board.id,
            user_id,
            &[assignee_id],
            task.id,
            &task.title,
            task.column_id,
        ))
        .await;

        Ok(task)
    }

    /// Removes `assignee_id` from the task. Removing a non-assignee is a no-op.
    pub async fn unassign(
        &self,
        board_id: i32,
        task_id: Uuid,
        user_id: i32,
        assignee_id: i32,
    ) -> Result<Task, AppError> {
        let mut board = load_authorized(self.db, board_id, user_id, BoardRole::Member).await?;

        let now = Utc::now();
        if !board.task_mut(task_id)?.unassign(assignee_id, now) {
            return Ok(board.task(task_id)?.clone());
        }
        board.updated_at = now;

        let board = self.save(&board).await?;

        Ok(board.task(task_id)?.clone())
    }
}
