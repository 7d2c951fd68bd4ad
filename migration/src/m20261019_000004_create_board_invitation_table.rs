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
                    .table(BoardInvitation::Table)
                    .if_not_exists()
                    .col(pk_auto(BoardInvitation::Id))
                    .col(integer(BoardInvitation::BoardId))
                    .col(integer(BoardInvitation::InvitedBy))
                    .col(integer(BoardInvitation::InvitedUser))
                    .col(boolean(BoardInvitation::IsAccepted).default(false))
                    .col(timestamp_with_time_zone(BoardInvitation::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(BoardInvitation::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(BoardInvitation::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_board_invitation_board_id")
                            .from(BoardInvitation::Table, BoardInvitation::BoardId)
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
                    .name("idx_board_invitation_invited_user")
                    .table(BoardInvitation::Table)
                    .col(BoardInvitation::InvitedUser)
                    .col(BoardInvitation::IsAccepted)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BoardInvitation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BoardInvitation {
    Table,
    Id,
    BoardId,
    InvitedBy,
    InvitedUser,
    IsAccepted,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
