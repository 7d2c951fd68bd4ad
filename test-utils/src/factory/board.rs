//! Board factory for creating test board entities.
//!
//! Boards are created with an empty column document by default. Tests that need a
//! populated aggregate usually go through the repository with a domain `Board`, or pass
//! a prepared JSON document through `columns()`.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test boards with customizable fields.
///
/// The owner is always written as a member row, matching how the server creates boards.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::board::BoardFactory;
///
/// let board = BoardFactory::new(&db, owner.id)
///     .name("Roadmap")
///     .member(other.id)
///     .build()
///     .await?;
/// ```
pub struct BoardFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    description: Option<String>,
    members: Vec<i32>,
    columns: serde_json::Value,
}

impl<'a> BoardFactory<'a> {
    /// Creates a new BoardFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Board {n}"`
    /// - description: `None`
    /// - members: the owner only
    /// - columns: `[]`
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("Board {}", id),
            description: None,
            members: vec![owner_id],
            columns: serde_json::Value::Array(Vec::new()),
        }
    }

    /// Sets the board name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the board description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Adds a member to the board.
    pub fn member(mut self, user_id: i32) -> Self {
        if !self.members.contains(&user_id) {
            self.members.push(user_id);
        }
        self
    }

    /// Replaces the stored column document.
    pub fn columns(mut self, columns: serde_json::Value) -> Self {
        self.columns = columns;
        self
    }

    /// Builds and inserts the board entity and its member rows.
    ///
    /// # Returns
    /// - `Ok(entity::board::Model)` - Created board entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::board::Model, DbErr> {
        let now = Utc::now();
        let board = entity::board::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            owner_id: ActiveValue::Set(self.owner_id),
            columns: ActiveValue::Set(self.columns),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        for user_id in self.members {
            entity::board_member::ActiveModel {
                board_id: ActiveValue::Set(board.id),
                user_id: ActiveValue::Set(user_id),
                joined_at: ActiveValue::Set(now),
            }
            .insert(self.db)
            .await?;
        }

        Ok(board)
    }
}

/// Creates a board with default values owned by `owner_id`.
pub async fn create_board(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::board::Model, DbErr> {
    BoardFactory::new(db, owner_id).build().await
}
