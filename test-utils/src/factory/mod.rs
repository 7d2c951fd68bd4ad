//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let owner = factory::user::create_user(&db).await?;
//!     let board = factory::board::create_board(&db, owner.id).await?;
//!
//!     // Owner, member and a board shared between them
//!     let (owner, member, board) = factory::helpers::create_shared_board(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let user = factory::user::UserFactory::new(&db)
//!     .name("Ada")
//!     .email("ada@example.com")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `board` - Create board entities along with their member rows
//! - `invitation` - Create board invitation entities
//! - `notification` - Create notification entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod board;
pub mod helpers;
pub mod invitation;
pub mod notification;
pub mod user;

pub use board::create_board;
pub use invitation::create_invitation;
pub use notification::create_notification;
pub use user::create_user;
