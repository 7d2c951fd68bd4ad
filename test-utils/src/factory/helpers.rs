//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique names and emails in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an owner, a second user, and a board owned by the first with the second as member.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((owner, member, board))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_shared_board(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::user::Model,
        entity::board::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_user(db).await?;
    let member = crate::factory::user::create_user(db).await?;
    let board = crate::factory::board::BoardFactory::new(db, owner.id)
        .member(member.id)
        .build()
        .await?;

    Ok((owner, member, board))
}
