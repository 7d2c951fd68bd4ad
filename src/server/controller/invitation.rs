use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        invitation::{
            InvitationDto, InviteDto, InviteResultDto, RespondInvitationDto, RespondResultDto,
        },
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::board::BoardWithUsers,
        service::invitation::InvitationService, state::AppState,
    },
};

/// Tag for grouping membership endpoints in OpenAPI documentation
pub static INVITATION_TAG: &str = "invitation";

/// Invite a registered user to a board by email.
///
/// # Access Control
/// - Board owner only
///
/// # Returns
/// - `200 OK` - Invitation created and the invited user notified
/// - `400 Bad Request` - Self-invite, already a member, or a pending invitation exists
/// - `404 Not Found` - Board or user not found
#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/invite",
    tag = INVITATION_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    request_body = InviteDto,
    responses(
        (status = 200, description = "Invitation sent", body = InviteResultDto),
        (status = 400, description = "Invitation not allowed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the board owner", body = ErrorDto),
        (status = 404, description = "Board or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn invite_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
    Json(payload): Json<InviteDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let outcome = InvitationService::new(&state.db)
        .invite(board_id, user.id, &payload.email)
        .await?;

    Ok((StatusCode::OK, Json(outcome.into_dto())))
}

/// Accept or decline an invitation addressed to the caller.
#[utoipa::path(
    post,
    path = "/api/boards/invitations/{invitation_id}/respond",
    tag = INVITATION_TAG,
    params(("invitation_id" = i32, Path, description = "Invitation ID")),
    request_body = RespondInvitationDto,
    responses(
        (status = 200, description = "Invitation answered", body = RespondResultDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No pending invitation for the caller", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn respond_to_invitation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(invitation_id): Path<i32>,
    Json(payload): Json<RespondInvitationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let board = InvitationService::new(&state.db)
        .respond(invitation_id, user.id, payload.accept)
        .await?;

    Ok((
        StatusCode::OK,
        Json(RespondResultDto {
            board: board.map(BoardWithUsers::into_dto),
            success: true,
        }),
    ))
}

/// List the caller's pending invitations.
#[utoipa::path(
    get,
    path = "/api/boards/invitations/received",
    tag = INVITATION_TAG,
    responses(
        (status = 200, description = "Pending invitations", body = Vec<InvitationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_received_invitations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    let invitations = InvitationService::new(&state.db).received(user.id).await?;

    Ok((StatusCode::OK, Json(invitations.into_dto())))
}

/// Leave a board. The owner cannot leave their own board.
#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/leave",
    tag = INVITATION_TAG,
    params(("board_id" = i32, Path, description = "Board ID")),
    responses(
        (status = 200, description = "Left the board", body = MessageDto),
        (status = 400, description = "Owner cannot leave or not a member", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Board not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn leave_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(board_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    InvitationService::new(&state.db)
        .leave(board_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Left board successfully"))))
}

/// Remove a member from a board.
///
/// # Access Control
/// - Board owner only
#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}/members/{member_id}",
    tag = INVITATION_TAG,
    params(
        ("board_id" = i32, Path, description = "Board ID"),
        ("member_id" = i32, Path, description = "Member to remove")
    ),
    responses(
        (status = 200, description = "Member removed", body = MessageDto),
        (status = 400, description = "Cannot remove the owner", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the board owner", body = ErrorDto),
        (status = 404, description = "Board or member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((board_id, member_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.token_keys)
        .require(&headers)
        .await?;

    InvitationService::new(&state.db)
        .remove_member(board_id, user.id, member_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Member removed successfully"))))
}
