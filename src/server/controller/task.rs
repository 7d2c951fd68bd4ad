use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        task::{CreateTaskDto, MoveTaskDto, TaskDto, UpdateTaskDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::task::{NewTask, Task, TaskChanges},
        service::task::TaskService,
        state::AppState,
    },
};

/// Tag for grouping task endpoints in OpenAPI documentation
pub static TASK_TAG: &str = "task";

/// Create a task at the end of a column.
///
/// Assignees other than the caller receive an `ASSIGNED` notification.
///
/// # Access Control
/// - Owner or member
///
/// # Returns
/// - `201 Created` - Task created
/// - `400 Bad Request` - Invalid task data or the column is at its limit
/// - `404 Not Found` - Column not on this board, or an assignee does not exist
#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/columns/{column_id}/tasks",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("column_id" = Uuid, Path, description = "Column ID")
    ),
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = TaskDto),
        (status = 400, description = "Invalid task or column limit reached", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Column or assignee not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, column_id)): Path<(i32, Uuid)>,
    Json(payload): Json<CreateTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .create(board_id, column_id, user.id, NewTask::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(task.into_dto())))
}

/// List a column's tasks in order.
#[utoipa::path(
    get,
    path = "/api/boards/{board_id}/columns/{column_id}/tasks",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("column_id" = Uuid, Path, description = "Column ID")
    ),
    responses(
        (status = 200, description = "Tasks sorted by order", body = Vec<TaskDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board or column not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, column_id)): Path<(i32, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let tasks = TaskService::new(&state.db)
        .list(board_id, column_id, user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(tasks.into_iter().map(Task::into_dto).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/boards/{board_id}/tasks/{task_id}",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task", body = TaskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board or task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id)): Path<(i32, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .get(board_id, task_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

/// Update a task.
///
/// Setting `status` to `completed` notifies the assignees; newly added assignees are
/// notified of the assignment.
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/tasks/{task_id}",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Updated task", body = TaskDto),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board, task or assignee not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id)): Path<(i32, Uuid)>,
    Json(payload): Json<UpdateTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .update(board_id, task_id, user.id, TaskChanges::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}/tasks/{task_id}",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board or task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id)): Path<(i32, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    TaskService::new(&state.db)
        .delete(board_id, task_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Task deleted successfully"))))
}

/// Move a task to a position in a column.
///
/// `order` is clamped to the target column's bounds. Moving into another column fails
/// when that column is at its limit; nothing is changed in that case.
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/tasks/{task_id}/move",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = MoveTaskDto,
    responses(
        (status = 200, description = "Moved task", body = TaskDto),
        (status = 400, description = "Target column at its limit", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board, task or column not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn move_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id)): Path<(i32, Uuid)>,
    Json(payload): Json<MoveTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .move_task(
            board_id,
            task_id,
            user.id,
            payload.target_column_id,
            payload.order,
        )
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

/// Assign a user to a task.
///
/// Idempotent. The user is notified only when newly assigned.
#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/tasks/{task_id}/assign/{user_id}",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID"),
        ("user_id" = i32, Path, description = "User to assign")
    ),
    responses(
        (status = 200, description = "Updated task", body = TaskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board, task or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn assign_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id, assignee_id)): Path<(i32, Uuid, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .assign(board_id, task_id, user.id, assignee_id)
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}/tasks/{task_id}/assign/{user_id}",
    tag = TASK_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("task_id" = Uuid, Path, description = "Task ID"),
        ("user_id" = i32, Path, description = "User to unassign")
    ),
    responses(
        (status = 200, description = "Updated task", body = TaskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board or task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn unassign_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, task_id, assignee_id)): Path<(i32, Uuid, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let task = TaskService::new(&state.db)
        .unassign(board_id, task_id, user.id, assignee_id)
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}
