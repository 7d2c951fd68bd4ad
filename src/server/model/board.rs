//! Board aggregate and the column/task ordering engine.
//!
//! A `Board` owns its columns, each column owns its tasks, and each task owns its comments.
//! Every operation here is pure: it validates first and only then mutates, so an `Err`
//! always leaves the aggregate exactly as it was. Persisting the result is the
//! repository's job.
//!
//! Ordering invariants maintained by every operation:
//! - `columns` is sorted by `order`, and the orders are exactly `0..columns.len()`
//! - within each column, `tasks` is sorted by `order`, and the orders are exactly `0..tasks.len()`

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::{board::BoardDto, user::UserSummaryDto},
    server::{
        error::{auth::AuthError, board::BoardError},
        model::{
            column::{Column, ColumnChanges, NewColumn},
            task::Task,
            user::UserDirectory,
        },
    },
};

pub const MAX_COLUMNS: usize = 10;

/// Role a caller must hold on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardRole {
    /// Board owner only.
    Owner,
    /// Owner or any member.
    Member,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub members: BTreeSet<i32>,
    pub columns: Vec<Column>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A board with the users it references, ready for DTO conversion.
#[derive(Debug, Clone)]
pub struct BoardWithUsers {
    pub board: Board,
    pub users: UserDirectory,
}

impl BoardWithUsers {
    pub fn into_dto(self) -> BoardDto {
        self.board.into_dto(&self.users)
    }
}

/// Several boards sharing one user directory.
#[derive(Debug, Clone)]
pub struct BoardList {
    pub boards: Vec<Board>,
    pub users: UserDirectory,
}

impl BoardList {
    pub fn into_dto(self) -> Vec<BoardDto> {
        let users = self.users;
        self.boards.into_iter().map(|b| b.into_dto(&users)).collect()
    }
}

/// Parameters for inserting a new board row.
#[derive(Debug, Clone)]
pub struct CreateBoardParams {
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub columns: Vec<Column>,
}

impl CreateBoardParams {
    /// Validates the name and lays out the initial columns.
    ///
    /// `columns` of `None` or an empty list yields the three default columns.
    pub fn new(
        owner_id: i32,
        name: &str,
        description: Option<String>,
        columns: Option<Vec<NewColumn>>,
        now: DateTime<Utc>,
    ) -> Result<Self, BoardError> {
        let name = validate_board_name(name)?;

        let new_columns = match columns {
            Some(columns) if !columns.is_empty() => columns,
            _ => NewColumn::defaults(),
        };
        if new_columns.len() > MAX_COLUMNS {
            return Err(BoardError::ColumnLimitExceeded { max: MAX_COLUMNS });
        }

        let columns = new_columns
            .into_iter()
            .enumerate()
            .map(|(order, params)| Column::new(params, order, now))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            owner_id,
            name,
            description,
            columns,
        })
    }
}

/// Partial board update.
#[derive(Debug, Clone, Default)]
pub struct BoardChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// What a board update changed, for the `BOARD_UPDATED` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardUpdateOutcome {
    pub old_name: String,
    pub new_name: String,
    pub name_changed: bool,
    pub description_changed: bool,
}

fn validate_board_name(name: &str) -> Result<String, BoardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BoardError::Validation("Board name is required".to_string()));
    }
    Ok(name.to_string())
}

impl Board {
    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// Columns and tasks are normalized on load so that a hand-edited or legacy
    /// document still satisfies the ordering invariants.
    ///
    /// # Returns
    /// - `Ok(Board)` - Successfully decoded aggregate
    /// - `Err(DbErr::Custom)` - The stored column document is not valid
    pub fn from_entity(
        entity: entity::board::Model,
        members: Vec<entity::board_member::Model>,
    ) -> Result<Self, DbErr> {
        let mut columns: Vec<Column> = serde_json::from_value(entity.columns).map_err(|e| {
            DbErr::Custom(format!(
                "Failed to decode columns of board {}: {}",
                entity.id, e
            ))
        })?;

        columns.sort_by_key(|c| c.order);
        for (order, column) in columns.iter_mut().enumerate() {
            column.order = order;
            column.normalize_task_order();
        }

        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            owner_id: entity.owner_id,
            members: members.into_iter().map(|m| m.user_id).collect(),
            columns,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Serializes the column tree for the `columns` JSON column.
    pub fn columns_document(&self) -> Result<serde_json::Value, DbErr> {
        serde_json::to_value(&self.columns).map_err(|e| {
            DbErr::Custom(format!(
                "Failed to encode columns of board {}: {}",
                self.id, e
            ))
        })
    }

    pub fn is_owner(&self, user_id: i32) -> bool {
        self.owner_id == user_id
    }

    /// The owner always counts as a member, listed or not.
    pub fn is_member(&self, user_id: i32) -> bool {
        self.is_owner(user_id) || self.members.contains(&user_id)
    }

    pub fn authorize(&self, user_id: i32, role: BoardRole) -> Result<(), AuthError> {
        let allowed = match role {
            BoardRole::Owner => self.is_owner(user_id),
            BoardRole::Member => self.is_member(user_id),
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthError::AccessDenied(
                user_id,
                format!("requires {:?} role on board {}", role, self.id),
            ))
        }
    }

    /// Every user id a response for this board may need to resolve.
    pub fn referenced_users(&self) -> impl Iterator<Item = i32> + '_ {
        std::iter::once(self.owner_id).chain(self.members.iter().copied())
    }

    /// Members other than `user_id`, including the owner.
    pub fn audience_except(&self, user_id: i32) -> Vec<i32> {
        let mut audience = self.members.clone();
        audience.insert(self.owner_id);
        audience.remove(&user_id);
        audience.into_iter().collect()
    }

    pub fn apply(&mut self, changes: BoardChanges, now: DateTime<Utc>) -> Result<BoardUpdateOutcome, BoardError> {
        let name = changes.name.as_deref().map(validate_board_name).transpose()?;

        let old_name = self.name.clone();
        let name_changed = name.as_ref().is_some_and(|n| *n != self.name);
        let description_changed = changes
            .description
            .as_ref()
            .is_some_and(|d| Some(d) != self.description.as_ref());

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        self.updated_at = now;

        Ok(BoardUpdateOutcome {
            old_name,
            new_name: self.name.clone(),
            name_changed,
            description_changed,
        })
    }

    fn column_index(&self, column_id: Uuid) -> Result<usize, BoardError> {
        self.columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or(BoardError::ColumnNotFound(column_id))
    }

    pub fn column(&self, column_id: Uuid) -> Result<&Column, BoardError> {
        let index = self.column_index(column_id)?;
        Ok(&self.columns[index])
    }

    pub fn column_mut(&mut self, column_id: Uuid) -> Result<&mut Column, BoardError> {
        let index = self.column_index(column_id)?;
        Ok(&mut self.columns[index])
    }

    /// Appends a column after the existing ones.
    pub fn insert_column(&mut self, params: NewColumn, now: DateTime<Utc>) -> Result<&Column, BoardError> {
        if self.columns.len() >= MAX_COLUMNS {
            return Err(BoardError::ColumnLimitExceeded { max: MAX_COLUMNS });
        }

        let column = Column::new(params, self.columns.len(), now)?;
        self.columns.push(column);
        self.updated_at = now;

        let index = self.columns.len() - 1;
        Ok(&self.columns[index])
    }

    /// Removes an empty, non-default column and closes the gap in column order.
    pub fn remove_column(&mut self, column_id: Uuid, now: DateTime<Utc>) -> Result<Column, BoardError> {
        let index = self.column_index(column_id)?;
        let column = &self.columns[index];
        if column.is_default {
            return Err(BoardError::ProtectedColumn(column_id));
        }
        if !column.tasks.is_empty() {
            return Err(BoardError::ColumnNotEmpty(column_id));
        }

        let removed_order = column.order;
        let removed = self.columns.remove(index);
        for column in self.columns.iter_mut() {
            if column.order > removed_order {
                column.order -= 1;
            }
        }
        self.updated_at = now;

        Ok(removed)
    }

    /// Moves a column to `new_order`, shifting the columns in between by one.
    pub fn reorder_column(
        &mut self,
        column_id: Uuid,
        new_order: i64,
        now: DateTime<Utc>,
    ) -> Result<(), BoardError> {
        let index = self.column_index(column_id)?;
        let len = self.columns.len();
        if new_order < 0 || new_order >= len as i64 {
            return Err(BoardError::InvalidRange { new_order, len });
        }

        let old_order = self.columns[index].order;
        let new_order = new_order as usize;
        if old_order == new_order {
            return Ok(());
        }

        for column in self.columns.iter_mut() {
            if column.id == column_id {
                continue;
            }
            if old_order < new_order && column.order > old_order && column.order <= new_order {
                column.order -= 1;
            } else if new_order < old_order && column.order >= new_order && column.order < old_order
            {
                column.order += 1;
            }
        }
        self.columns[index].order = new_order;
        self.columns.sort_by_key(|c| c.order);
        self.updated_at = now;

        Ok(())
    }

    pub fn update_column(
        &mut self,
        column_id: Uuid,
        changes: ColumnChanges,
        now: DateTime<Utc>,
    ) -> Result<&Column, BoardError> {
        let index = self.column_index(column_id)?;
        self.columns[index].apply(changes, now)?;
        self.updated_at = now;

        Ok(&self.columns[index])
    }

    /// Position of a task as `(column index, task index)`.
    fn locate_task(&self, task_id: Uuid) -> Result<(usize, usize), BoardError> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, column)| {
                column
                    .tasks
                    .iter()
                    .position(|t| t.id == task_id)
                    .map(|ti| (ci, ti))
            })
            .ok_or(BoardError::TaskNotFound(task_id))
    }

    pub fn task(&self, task_id: Uuid) -> Result<&Task, BoardError> {
        let (ci, ti) = self.locate_task(task_id)?;
        Ok(&self.columns[ci].tasks[ti])
    }

    pub fn task_mut(&mut self, task_id: Uuid) -> Result<&mut Task, BoardError> {
        let (ci, ti) = self.locate_task(task_id)?;
        Ok(&mut self.columns[ci].tasks[ti])
    }

    pub fn insert_task(
        &mut self,
        column_id: Uuid,
        task: Task,
        now: DateTime<Utc>,
    ) -> Result<&Task, BoardError> {
        let index = self.column_index(column_id)?;
        self.columns[index].insert_task(task, now)?;
        self.updated_at = now;

        self.columns[index]
            .tasks
            .last()
            .ok_or(BoardError::ColumnNotFound(column_id))
    }

    pub fn remove_task(&mut self, task_id: Uuid, now: DateTime<Utc>) -> Result<Task, BoardError> {
        let (ci, _) = self.locate_task(task_id)?;
        let task = self.columns[ci].remove_task(task_id, now)?;
        self.updated_at = now;

        Ok(task)
    }

    /// Moves a task to `new_order` within the target column, which may be its own column.
    ///
    /// The target's limit is checked against its current count before anything moves;
    /// moves within one column never change its count and are not limit-checked.
    /// `new_order` is clamped to `0..=target_len`.
    pub fn move_task(
        &mut self,
        task_id: Uuid,
        target_column_id: Uuid,
        new_order: i64,
        now: DateTime<Utc>,
    ) -> Result<&Task, BoardError> {
        let (source, task_index) = self.locate_task(task_id)?;
        let target = self.column_index(target_column_id)?;
        if source != target {
            self.columns[target].ensure_capacity()?;
        }

        let task = self.columns[source].tasks.remove(task_index);
        self.columns[source].normalize_task_order();
        self.columns[source].updated_at = now;

        let position = self.columns[target].place_task(task, new_order, now);
        self.updated_at = now;

        Ok(&self.columns[target].tasks[position])
    }

    /// Converts to a DTO, resolving owner and members through `users`.
    pub fn into_dto(self, users: &UserDirectory) -> BoardDto {
        let members: Vec<UserSummaryDto> = self
            .members
            .iter()
            .map(|id| users.resolve(*id).into_dto())
            .collect();

        BoardDto {
            id: self.id,
            owner: users.resolve(self.owner_id).into_dto(),
            name: self.name,
            description: self.description,
            members,
            columns: self.columns.into_iter().map(Column::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
