pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_user_table;
mod m20261019_000002_create_board_table;
mod m20261019_000003_create_board_member_table;
mod m20261019_000004_create_board_invitation_table;
mod m20261019_000005_create_notification_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_user_table::Migration),
            Box::new(m20261019_000002_create_board_table::Migration),
            Box::new(m20261019_000003_create_board_member_table::Migration),
            Box::new(m20261019_000004_create_board_invitation_table::Migration),
            Box::new(m20261019_000005_create_notification_table::Migration),
        ]
    }
}
