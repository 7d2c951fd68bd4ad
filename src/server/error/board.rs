use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

/// Violations of the board aggregate rules.
///
/// Raised by the ordering engine before anything is mutated, so a returned error
/// always means the aggregate is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board {0} not found")]
    BoardNotFound(i32),

    #[error("Column {0} not found")]
    ColumnNotFound(Uuid),

    #[error("Task {0} not found")]
    TaskNotFound(Uuid),

    #[error("Comment {0} not found")]
    CommentNotFound(Uuid),

    #[error("A board cannot have more than {max} columns")]
    ColumnLimitExceeded { max: usize },

    #[error("Column {column_id} has reached its limit of {limit} tasks")]
    TaskLimitExceeded { column_id: Uuid, limit: u32 },

    /// Deleting a default column or changing its type.
    #[error("Column {0} is a default column and cannot be deleted or retyped")]
    ProtectedColumn(Uuid),

    #[error("Column {0} still contains tasks")]
    ColumnNotEmpty(Uuid),

    #[error("Order {new_order} is outside the range 0..{len}")]
    InvalidRange { new_order: i64, len: usize },

    #[error("Limit {limit} is invalid for a column holding {task_count} tasks")]
    InvalidLimit { limit: u32, task_count: usize },

    #[error("{0}")]
    Validation(String),

    #[error("Only the author can modify comment {0}")]
    NotCommentAuthor(Uuid),
}

/// Converts board errors into HTTP responses.
///
/// - Not-found variants → 404 Not Found
/// - `NotCommentAuthor` → 403 Forbidden
/// - Every other rule violation → 400 Bad Request
impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BoardNotFound(_)
            | Self::ColumnNotFound(_)
            | Self::TaskNotFound(_)
            | Self::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Self::NotCommentAuthor(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorDto::new(self.to_string()))).into_response()
    }
}
