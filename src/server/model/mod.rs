//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer. The board
//! aggregate (`board`, `column`, `task`) owns its columns, tasks and comments by value and
//! implements the ordering rules directly, so every mutation is checked and applied in
//! memory before the repository writes the aggregate back as one unit. Domain models are
//! converted from entity models at the repository boundary and transformed to DTOs at the
//! controller boundary.

pub mod board;
pub mod column;
pub mod invitation;
pub mod notification;
pub mod task;
pub mod user;

#[cfg(test)]
mod test;
