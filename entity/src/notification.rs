use sea_orm::entity::prelude::*;

/// Notification rows outlive the boards they mention, so `board_id` is not a foreign key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub recipient_id: i32,
    pub sender_id: i32,
    pub board_id: i32,
    pub notification_type: String,
    pub priority: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub metadata: Json,
    pub is_read: bool,
    pub created_at: DateTimeUtc,
    pub read_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
