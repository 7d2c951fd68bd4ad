use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "board")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub owner_id: i32,
    /// Ordered column documents, each embedding its ordered tasks and their comments.
    pub columns: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::board_member::Entity")]
    BoardMember,
    #[sea_orm(has_many = "super::board_invitation::Entity")]
    BoardInvitation,
}

impl Related<super::board_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoardMember.def()
    }
}

impl Related<super::board_invitation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoardInvitation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
