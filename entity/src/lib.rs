//! SeaORM entity definitions for the kanban board store.
//!
//! A board row carries its whole column/task/comment tree as a JSON document, so the
//! only relational edges are the member set and the invitations that hang off a board.
//! User, sender and recipient ids elsewhere are weak references without foreign keys.

pub mod prelude;

pub mod board;
pub mod board_invitation;
pub mod board_member;
pub mod notification;
pub mod user;
