//! Column model and the task-ordering rules within a single column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    model::column::{ColumnDto, ColumnType, CreateColumnDto, UpdateColumnDto},
    server::{error::board::BoardError, model::task::Task},
};

/// Largest accepted per-column task limit.
pub const MAX_COLUMN_LIMIT: u32 = 100;
pub const MAX_COLUMN_NAME_LEN: usize = 50;
pub const DEFAULT_COLUMN_COLOR: &str = "#E2E8F0";

/// A column as stored inside the board document.
///
/// `tasks` is kept sorted by `order`, and `order` is dense `0..len` after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub name: String,
    pub order: usize,
    pub is_default: bool,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub color: String,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for a column that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewColumn {
    pub name: String,
    pub column_type: ColumnType,
    pub color: Option<String>,
    pub limit: Option<u32>,
    pub is_default: bool,
}

impl NewColumn {
    pub fn from_dto(dto: CreateColumnDto) -> Self {
        Self {
            name: dto.name,
            column_type: dto.column_type.unwrap_or(ColumnType::Custom),
            color: dto.color,
            limit: dto.limit,
            is_default: false,
        }
    }

    /// Columns every board starts with when none are supplied.
    ///
    /// "To Do" is not protected; "In Progress" and "Done" are.
    pub fn defaults() -> Vec<Self> {
        [
            ("To Do", ColumnType::Todo, false),
            ("In Progress", ColumnType::InProgress, true),
            ("Done", ColumnType::Done, true),
        ]
        .into_iter()
        .map(|(name, column_type, is_default)| Self {
            name: name.to_string(),
            column_type,
            color: None,
            limit: None,
            is_default,
        })
        .collect()
    }
}

/// Partial column update.
#[derive(Debug, Clone, Default)]
pub struct ColumnChanges {
    pub name: Option<String>,
    pub column_type: Option<ColumnType>,
    pub color: Option<String>,
    /// `Some(None)` clears the limit.
    pub limit: Option<Option<u32>>,
}

impl ColumnChanges {
    pub fn from_dto(dto: UpdateColumnDto) -> Self {
        let limit = if dto.clear_limit {
            Some(None)
        } else {
            dto.limit.map(Some)
        };

        Self {
            name: dto.name,
            column_type: dto.column_type,
            color: dto.color,
            limit,
        }
    }
}

fn validate_name(name: &str) -> Result<String, BoardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BoardError::Validation("Column name is required".to_string()));
    }
    if name.chars().count() > MAX_COLUMN_NAME_LEN {
        return Err(BoardError::Validation(format!(
            "Column name cannot exceed {} characters",
            MAX_COLUMN_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

impl Column {
    /// Builds a column at `order`, validating name and limit.
    pub fn new(params: NewColumn, order: usize, now: DateTime<Utc>) -> Result<Self, BoardError> {
        let name = validate_name(&params.name)?;
        if let Some(limit) = params.limit {
            if limit > MAX_COLUMN_LIMIT {
                return Err(BoardError::InvalidLimit {
                    limit,
                    task_count: 0,
                });
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            order,
            is_default: params.is_default,
            column_type: params.column_type,
            color: params
                .color
                .unwrap_or_else(|| DEFAULT_COLUMN_COLOR.to_string()),
            limit: params.limit,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn task(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Fails when one more task would exceed the column limit.
    pub fn ensure_capacity(&self) -> Result<(), BoardError> {
        match self.limit {
            Some(limit) if self.tasks.len() >= limit as usize => {
                Err(BoardError::TaskLimitExceeded {
                    column_id: self.id,
                    limit,
                })
            }
            _ => Ok(()),
        }
    }

    /// Stable-sorts tasks by their current order and reassigns `0..len`.
    pub fn normalize_task_order(&mut self) {
        self.tasks.sort_by_key(|t| t.order);
        self.renumber_tasks();
    }

    /// Reassigns `order` from vector position.
    fn renumber_tasks(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.order = index;
        }
    }

    /// Appends `task` at the end of the column.
    pub fn insert_task(&mut self, mut task: Task, now: DateTime<Utc>) -> Result<&Task, BoardError> {
        self.ensure_capacity()?;
        self.normalize_task_order();

        task.order = self.tasks.len();
        task.column_id = self.id;
        self.tasks.push(task);
        self.updated_at = now;

        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Inserts `task` at `position` (clamped to the current length) and renumbers.
    ///
    /// Capacity is the caller's concern; this is the second half of a move.
    pub(super) fn place_task(&mut self, mut task: Task, position: i64, now: DateTime<Utc>) -> usize {
        self.normalize_task_order();

        let position = position.clamp(0, self.tasks.len() as i64) as usize;
        task.column_id = self.id;
        task.updated_at = now;
        self.tasks.insert(position, task);
        self.renumber_tasks();
        self.updated_at = now;

        position
    }

    pub fn remove_task(&mut self, task_id: Uuid, now: DateTime<Utc>) -> Result<Task, BoardError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or(BoardError::TaskNotFound(task_id))?;

        let task = self.tasks.remove(index);
        self.normalize_task_order();
        self.updated_at = now;

        Ok(task)
    }

    pub fn update_limit(&mut self, limit: Option<u32>) -> Result<(), BoardError> {
        if let Some(limit) = limit {
            if limit > MAX_COLUMN_LIMIT || (limit as usize) < self.tasks.len() {
                return Err(BoardError::InvalidLimit {
                    limit,
                    task_count: self.tasks.len(),
                });
            }
        }
        self.limit = limit;
        Ok(())
    }

    /// Applies a partial update. All fields are validated before any is written.
    pub fn apply(&mut self, changes: ColumnChanges, now: DateTime<Utc>) -> Result<(), BoardError> {
        let name = changes.name.as_deref().map(validate_name).transpose()?;

        if let Some(column_type) = changes.column_type {
            if self.is_default && column_type != self.column_type {
                return Err(BoardError::ProtectedColumn(self.id));
            }
        }

        if let Some(limit) = changes.limit {
            self.update_limit(limit)?;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(column_type) = changes.column_type {
            self.column_type = column_type;
        }
        if let Some(color) = changes.color {
            self.color = color;
        }
        self.updated_at = now;

        Ok(())
    }

    pub fn into_dto(self) -> ColumnDto {
        ColumnDto {
            id: self.id,
            name: self.name,
            order: self.order,
            is_default: self.is_default,
            column_type: self.column_type,
            color: self.color,
            limit: self.limit,
            tasks: self.tasks.into_iter().map(Task::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
