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
        column::{ColumnDto, CreateColumnDto, ReorderColumnDto, UpdateColumnDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::column::{Column, ColumnChanges, NewColumn},
        service::column::ColumnService,
        state::AppState,
    },
};

/// Tag for grouping column endpoints in OpenAPI documentation
pub static COLUMN_TAG: &str = "column";

/// List a board's columns in order.
///
/// # Access Control
/// - Owner or member
#[utoipa::path(
    get,
    path = "/api/boards/{board_id}/columns",
    tag = COLUMN_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    responses(
        (status = 200, description = "Columns sorted by order", body = Vec<ColumnDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_columns(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let columns = ColumnService::new(&state.db).list(board_id, user.id).await?;

    Ok((
        StatusCode::OK,
        Json(columns.into_iter().map(Column::into_dto).collect::<Vec<_>>()),
    ))
}

/// Add a column at the end of the board.
///
/// # Access Control
/// - Owner or member
///
/// # Returns
/// - `201 Created` - Column created
/// - `400 Bad Request` - Invalid name or limit, or the board already has ten columns
#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/columns",
    tag = COLUMN_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    request_body = CreateColumnDto,
    responses(
        (status = 201, description = "Column created", body = ColumnDto),
        (status = 400, description = "Invalid column or column limit reached", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_column(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
    Json(payload): Json<CreateColumnDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let column = ColumnService::new(&state.db)
        .create(board_id, user.id, NewColumn::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(column.into_dto())))
}

/// Update a column's name, type, color or task limit.
///
/// Default columns keep their type. A limit below the current task count is rejected.
///
/// # Access Control
/// - Owner or member
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/columns/{column_id}",
    tag = COLUMN_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("column_id" = Uuid, Path, description = "Column ID")
    ),
    request_body = UpdateColumnDto,
    responses(
        (status = 200, description = "Updated column", body = ColumnDto),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board or column not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_column(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, column_id)): Path<(i32, Uuid)>,
    Json(payload): Json<UpdateColumnDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let column = ColumnService::new(&state.db)
        .update(board_id, user.id, column_id, ColumnChanges::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(column.into_dto())))
}

/// Delete an empty, non-default column.
///
/// # Access Control
/// - Owner only
#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}/columns/{column_id}",
    tag = COLUMN_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("column_id" = Uuid, Path, description = "Column ID")
    ),
    responses(
        (status = 200, description = "Column deleted", body = MessageDto),
        (status = 400, description = "Default column or column still has tasks", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the board owner", body = ErrorDto),
        (status = 404, description = "Board or column not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_column(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, column_id)): Path<(i32, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    ColumnService::new(&state.db)
        .delete(board_id, user.id, column_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Column deleted successfully"))))
}

/// Move a column to a new position.
///
/// Columns between the old and new position shift by one.
///
/// # Access Control
/// - Owner or member
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/columns/reorder",
    tag = COLUMN_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    request_body = ReorderColumnDto,
    responses(
        (status = 200, description = "Columns reordered", body = MessageDto),
        (status = 400, description = "Position out of range", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board or column not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn reorder_columns(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
    Json(payload): Json<ReorderColumnDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    ColumnService::new(&state.db)
        .reorder(board_id, user.id, payload.column_id, payload.new_order)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Columns reordered successfully"))))
}
