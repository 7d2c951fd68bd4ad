use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    column::{ColumnDto, CreateColumnDto},
    user::UserSummaryDto,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner: UserSummaryDto,
    pub members: Vec<UserSummaryDto>,
    pub columns: Vec<ColumnDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Initial columns; the three default columns are used when omitted or empty.
    #[serde(default)]
    pub columns: Option<Vec<CreateColumnDto>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
