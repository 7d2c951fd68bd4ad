use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvitationError {
    #[error("No user found with that email")]
    UserNotFound,

    /// No pending invitation with this id addressed to the caller.
    #[error("Invitation not found or already handled")]
    InvitationNotFound,

    #[error("User {0} is not a member of this board")]
    MemberNotFound(i32),

    #[error("You cannot invite yourself")]
    SelfInvite,

    #[error("User is already a member of this board")]
    AlreadyMember,

    #[error("An invitation is already pending for this user")]
    DuplicateInvitation,

    #[error("The board owner cannot leave the board")]
    OwnerCannotLeave,

    #[error("You are not a member of this board")]
    NotAMember,
}

/// Converts invitation errors into HTTP responses.
///
/// - `UserNotFound` / `InvitationNotFound` / `MemberNotFound` → 404 Not Found
/// - Every other lifecycle violation → 400 Bad Request
impl IntoResponse for InvitationError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::UserNotFound | Self::InvitationNotFound | Self::MemberNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorDto::new(self.to_string()))).into_response()
    }
}
