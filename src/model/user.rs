use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public view of a user referenced by a board, task or invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}
