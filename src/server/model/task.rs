//! Task and comment models.

use std::{collections::BTreeSet, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    model::{
        comment::{CommentDto, CommentEditDto},
        task::{CreateTaskDto, TaskDto, TaskPriority, TaskStatus, UpdateTaskDto},
    },
    server::error::board::BoardError,
};

pub const MAX_TASK_TITLE_LEN: usize = 200;
pub const MAX_TASK_DESCRIPTION_LEN: usize = 50_000;
pub const MAX_COMMENT_LEN: usize = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub column_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub creator_id: i32,
    #[serde(default)]
    pub assignees: BTreeSet<i32>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub order: usize,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEdit {
    pub content: String,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub author_id: i32,
    #[serde(default)]
    pub mentions: Vec<i32>,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub edit_history: Vec<CommentEdit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for a task that does not exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignees: Vec<i32>,
    pub labels: Vec<String>,
}

impl NewTask {
    pub fn from_dto(dto: CreateTaskDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            priority: dto.priority,
            status: dto.status,
            due_date: dto.due_date,
            assignees: dto.assignees,
            labels: dto.labels,
        }
    }
}

/// Partial task update.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignees: Option<Vec<i32>>,
    pub labels: Option<Vec<String>>,
    pub is_archived: Option<bool>,
}

impl TaskChanges {
    pub fn from_dto(dto: UpdateTaskDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            priority: dto.priority,
            status: dto.status,
            due_date: dto.due_date,
            assignees: dto.assignees,
            labels: dto.labels,
            is_archived: dto.is_archived,
        }
    }
}

/// What an update changed that other users care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdateOutcome {
    /// The status moved to `completed` from anything else.
    pub completed: bool,
    /// Assignees present after the update but not before.
    pub added_assignees: Vec<i32>,
}

fn validate_title(title: &str) -> Result<String, BoardError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BoardError::Validation("Task title is required".to_string()));
    }
    if title.chars().count() > MAX_TASK_TITLE_LEN {
        return Err(BoardError::Validation(format!(
            "Task title cannot exceed {} characters",
            MAX_TASK_TITLE_LEN
        )));
    }
    Ok(title.to_string())
}

fn validate_description(description: &str) -> Result<(), BoardError> {
    if description.chars().count() > MAX_TASK_DESCRIPTION_LEN {
        return Err(BoardError::Validation(format!(
            "Task description cannot exceed {} characters",
            MAX_TASK_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

fn validate_comment(content: &str) -> Result<String, BoardError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(BoardError::Validation(
            "Comment content is required".to_string(),
        ));
    }
    if content.chars().count() > MAX_COMMENT_LEN {
        return Err(BoardError::Validation(format!(
            "Comment cannot exceed {} characters",
            MAX_COMMENT_LEN
        )));
    }
    Ok(content.to_string())
}

fn clean_labels(labels: Vec<String>) -> BTreeSet<String> {
    labels
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// `@[Display Name](userId)`; the display name must be non-empty.
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\[([^\]]+)\]\((\w+)\)").expect("mention pattern is valid"));

/// Extracts user ids from `@[Display Name](userId)` mentions, in first-seen order
/// and without duplicates. Mentions whose id is not a number are ignored.
pub fn parse_mentions(content: &str) -> Vec<i32> {
    let mut mentions = Vec::new();

    for captures in MENTION.captures_iter(content) {
        if let Ok(id) = captures[2].parse::<i32>() {
            if !mentions.contains(&id) {
                mentions.push(id);
            }
        }
    }

    mentions
}

impl Task {
    /// Builds a task owned by `creator_id`. Column and order are assigned on insert.
    pub fn new(params: NewTask, creator_id: i32, now: DateTime<Utc>) -> Result<Self, BoardError> {
        let title = validate_title(&params.title)?;
        let description = params.description.unwrap_or_default();
        validate_description(&description)?;

        Ok(Self {
            id: Uuid::new_v4(),
            column_id: Uuid::nil(),
            title,
            description,
            priority: params.priority.unwrap_or_default(),
            status: params.status.unwrap_or_default(),
            due_date: params.due_date,
            creator_id,
            assignees: params.assignees.into_iter().collect(),
            labels: clean_labels(params.labels),
            comments: Vec::new(),
            order: 0,
            is_archived: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update. All fields are validated before any is written.
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        now: DateTime<Utc>,
    ) -> Result<TaskUpdateOutcome, BoardError> {
        let title = changes.title.as_deref().map(validate_title).transpose()?;
        if let Some(description) = &changes.description {
            validate_description(description)?;
        }

        let mut outcome = TaskUpdateOutcome::default();

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(status) = changes.status {
            outcome.completed =
                status == TaskStatus::Completed && self.status != TaskStatus::Completed;
            self.status = status;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(assignees) = changes.assignees {
            let assignees: BTreeSet<i32> = assignees.into_iter().collect();
            outcome.added_assignees = assignees.difference(&self.assignees).copied().collect();
            self.assignees = assignees;
        }
        if let Some(labels) = changes.labels {
            self.labels = clean_labels(labels);
        }
        if let Some(is_archived) = changes.is_archived {
            self.is_archived = is_archived;
        }
        self.updated_at = now;

        Ok(outcome)
    }

    /// Adds an assignee. Returns `false` when the user was already assigned.
    pub fn assign(&mut self, user_id: i32, now: DateTime<Utc>) -> bool {
        let added = self.assignees.insert(user_id);
        if added {
            self.updated_at = now;
        }
        added
    }

    /// Removes an assignee. Returns `false` when the user was not assigned.
    pub fn unassign(&mut self, user_id: i32, now: DateTime<Utc>) -> bool {
        let removed = self.assignees.remove(&user_id);
        if removed {
            self.updated_at = now;
        }
        removed
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    pub fn add_comment(
        &mut self,
        author_id: i32,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&Comment, BoardError> {
        let content = validate_comment(content)?;

        self.comments.push(Comment {
            id: Uuid::new_v4(),
            mentions: parse_mentions(&content),
            content,
            author_id,
            is_edited: false,
            edit_history: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        self.updated_at = now;

        let index = self.comments.len() - 1;
        Ok(&self.comments[index])
    }

    /// Replaces a comment's content, keeping the previous text in its edit history.
    ///
    /// Returns the ids mentioned by the new content that the old content did not mention.
    pub fn edit_comment(
        &mut self,
        comment_id: Uuid,
        author_id: i32,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<i32>, BoardError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(BoardError::CommentNotFound(comment_id))?;
        if comment.author_id != author_id {
            return Err(BoardError::NotCommentAuthor(comment_id));
        }
        let content = validate_comment(content)?;

        let mentions = parse_mentions(&content);
        let new_mentions = mentions
            .iter()
            .copied()
            .filter(|id| !comment.mentions.contains(id))
            .collect();

        let previous = std::mem::replace(&mut comment.content, content);
        comment.edit_history.push(CommentEdit {
            content: previous,
            edited_at: now,
        });
        comment.mentions = mentions;
        comment.is_edited = true;
        comment.updated_at = now;
        self.updated_at = now;

        Ok(new_mentions)
    }

    pub fn remove_comment(
        &mut self,
        comment_id: Uuid,
        author_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Comment, BoardError> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(BoardError::CommentNotFound(comment_id))?;
        if self.comments[index].author_id != author_id {
            return Err(BoardError::NotCommentAuthor(comment_id));
        }

        self.updated_at = now;
        Ok(self.comments.remove(index))
    }

    pub fn into_dto(self) -> TaskDto {
        TaskDto {
            id: self.id,
            column_id: self.column_id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            due_date: self.due_date,
            creator_id: self.creator_id,
            assignees: self.assignees.into_iter().collect(),
            labels: self.labels.into_iter().collect(),
            comments: self.comments.into_iter().map(Comment::into_dto).collect(),
            order: self.order,
            is_archived: self.is_archived,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Comment {
    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.id,
            content: self.content,
            author_id: self.author_id,
            mentions: self.mentions,
            is_edited: self.is_edited,
            edit_history: self
                .edit_history
                .into_iter()
                .map(|e| CommentEditDto {
                    content: e.content,
                    edited_at: e.edited_at,
                })
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
