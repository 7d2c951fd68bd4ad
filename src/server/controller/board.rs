use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        board::{BoardDto, CreateBoardDto, UpdateBoardDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{board::BoardChanges, column::NewColumn},
        service::board::BoardService,
        state::AppState,
    },
};

/// Tag for grouping board endpoints in OpenAPI documentation
pub static BOARD_TAG: &str = "board";

/// Create a new board.
///
/// Creates a board owned by the caller. When `columns` is omitted or empty the board
/// starts with the "To Do", "In Progress" and "Done" columns.
///
/// # Returns
/// - `201 Created` - Board created
/// - `400 Bad Request` - Blank name, invalid column or more than ten columns
/// - `401 Unauthorized` - Missing or invalid bearer token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/boards",
    tag = BOARD_TAG,
    request_body = CreateBoardDto,
    responses(
        (status = 201, description = "Board created", body = BoardDto),
        (status = 400, description = "Invalid board data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBoardDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let columns = payload
        .columns
        .map(|columns| columns.into_iter().map(NewColumn::from_dto).collect());

    let board = BoardService::new(&state.db)
        .create(user.id, &payload.name, payload.description, columns)
        .await?;

    Ok((StatusCode::CREATED, Json(board.into_dto())))
}

/// List the caller's boards.
///
/// Returns boards the caller owns or is a member of, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/boards",
    tag = BOARD_TAG,
    responses(
        (status = 200, description = "Boards visible to the caller", body = Vec<BoardDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_boards(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let boards = BoardService::new(&state.db).list(user.id).await?;

    Ok((StatusCode::OK, Json(boards.into_dto())))
}

/// Get a board with its columns and tasks.
///
/// # Access Control
/// - Owner or member
#[utoipa::path(
    get,
    path = "/api/boards/{board_id}",
    tag = BOARD_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    responses(
        (status = 200, description = "Board", body = BoardDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the board", body = ErrorDto),
        (status = 404, description = "Board not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let board = BoardService::new(&state.db).get(board_id, user.id).await?;

    Ok((StatusCode::OK, Json(board.into_dto())))
}

/// Update a board's name or description.
///
/// Other members receive a `BOARD_UPDATED` notification.
///
/// # Access Control
/// - Owner only
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}",
    tag = BOARD_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    request_body = UpdateBoardDto,
    responses(
        (status = 200, description = "Updated board", body = BoardDto),
        (status = 400, description = "Invalid board data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the board owner", body = ErrorDto),
        (status = 404, description = "Board not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
    Json(payload): Json<UpdateBoardDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let changes = BoardChanges {
        name: payload.name,
        description: payload.description,
    };
    let board = BoardService::new(&state.db)
        .update(board_id, user.id, changes)
        .await?;

    Ok((StatusCode::OK, Json(board.into_dto())))
}

/// Delete a board.
///
/// Removes the board with its members and invitations. Other members receive a
/// `BOARD_DELETED` notification.
///
/// # Access Control
/// - Owner only
#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}",
    tag = BOARD_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    responses(
        (status = 200, description = "Board deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the board owner", body = ErrorDto),
        (status = 404, description = "Board not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    BoardService::new(&state.db)
        .delete(board_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Board deleted successfully"))))
}
