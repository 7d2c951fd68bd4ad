//! HTTP request handlers.
//!
//! Each handler authenticates the caller with `AuthGuard`, converts the request DTO into
//! domain parameters, calls the matching service and converts the result back into a DTO.
//! Board-level access checks live in the services so every entry point shares them.

pub mod board;
pub mod column;
pub mod comment;
pub mod invitation;
pub mod notification;
pub mod task;
