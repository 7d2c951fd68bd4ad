use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::task::TaskDto;

/// Workflow role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    Todo,
    InProgress,
    Done,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDto {
    pub id: Uuid,
    pub name: String,
    pub order: usize,
    pub is_default: bool,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub color: String,
    pub limit: Option<u32>,
    pub tasks: Vec<TaskDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnDto {
    pub name: String,
    #[serde(default, rename = "type")]
    pub column_type: Option<ColumnType>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Partial column update. A `limit` of `null` leaves the limit untouched;
/// use `clearLimit` to remove it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumnDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub column_type: Option<ColumnType>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub clear_limit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnDto {
    pub column_id: Uuid,
    pub new_order: i64,
}
