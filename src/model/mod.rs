//! Wire-level DTOs shared by the HTTP layer and the OpenAPI document.
//!
//! Every type here serializes with camelCase field names. Domain models under
//! `server::model` convert into these at the controller boundary.

pub mod api;
pub mod board;
pub mod column;
pub mod comment;
pub mod invitation;
pub mod notification;
pub mod task;
pub mod user;
