use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{api::ErrorDto, comment::CommentContentDto, task::TaskDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::task::TaskService,
        state::AppState,
    },
};

/// Tag for grouping comment endpoints in OpenAPI documentation
pub static COMMENT_TAG: &str = "comment";

/// Comment on a task.
///
/// Users mentioned as `@[Name](id)` receive a `MENTIONED` notification.
#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/tasks/{task_id}/comments",
    tag = COMMENT_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = CommentContentDto,
    responses(
        (status = 201, description = "Task with the new comment", body = TaskDto),
        (status = 400, description = "Empty or oversized comment", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board or task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id)): Path<(i32, Uuid)>,
    Json(payload): Json<CommentContentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .add_comment(board_id, task_id, user.id, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(task.into_dto())))
}

/// Edit a comment.
///
/// The previous content is kept in the comment's edit history.
///
/// # Access Control
/// - Comment author only
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/tasks/{task_id}/comments/{comment_id}",
    tag = COMMENT_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = CommentContentDto,
    responses(
        (status = 200, description = "Task with the edited comment", body = TaskDto),
        (status = 400, description = "Empty or oversized comment", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the comment author", body = ErrorDto),
        (status = 404, description = "Board, task or comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id, comment_id)): Path<(i32, Uuid, Uuid)>,
    Json(payload): Json<CommentContentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .edit_comment(board_id, task_id, comment_id, user.id, &payload.content)
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

/// Delete a comment.
///
/// # Access Control
/// - Comment author only
#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}/tasks/{task_id}/comments/{comment_id}",
    tag = COMMENT_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Task without the comment", body = TaskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the comment author", body = ErrorDto),
        (status = 404, description = "Board, task or comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id, comment_id)): Path<(i32, Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .delete_comment(board_id, task_id, comment_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}
