use sea_orm_migration::{prelude::*, schema::*};

use super::m20261019_000002_create_board_table::Board;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BoardMember::Table)
                    .if_not_exists()
                    .col(integer(BoardMember::BoardId))
                    .col(integer(BoardMember::UserId))
                    .col(
                        timestamp_with_time_zone(BoardMember::JoinedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(BoardMember::BoardId)
                            .col(BoardMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_board_member_board_id")
                            .from(BoardMember::Table, BoardMember::BoardId)
                            .to(Board::Table, Board::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_board_member_user_id")
                    .table(BoardMember::Table)
                    .col(BoardMember::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BoardMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BoardMember {
    Table,
    BoardId,
    UserId,
    JoinedAt,
}
