use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentEditDto {
    pub content: String,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: Uuid,
    pub content: String,
    pub author_id: i32,
    pub mentions: Vec<i32>,
    pub is_edited: bool,
    pub edit_history: Vec<CommentEditDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or editing a comment. Mentions use `@[Name](userId)`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentContentDto {
    pub content: String,
}
