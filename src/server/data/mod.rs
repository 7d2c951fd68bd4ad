//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! The board repository persists the whole board aggregate in one transaction per save.

pub mod board;
pub mod invitation;
pub mod notification;
pub mod user;

#[cfg(test)]
mod test;
