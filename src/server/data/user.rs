//! User data repository for database operations.
//!
//! The `user` table mirrors the identity provider's id space. This repository only reads
//! it: authentication checks token subjects against it, invitations resolve emails through
//! it, and responses resolve weak user references with it.

use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter,
};

use crate::server::model::user::{UserDirectory, UserSummary};

/// Repository providing read access to user records.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    /// Finds a user by email, ignoring ASCII case.
    ///
    /// SQLite's `LOWER()` folds ASCII letters only, so the argument is folded the same way.
    ///
    /// # Arguments
    /// - `email` - Email address to match exactly apart from case
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - User found
    /// - `Ok(None)` - No user with that email
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(Expr::cust_with_values(
                "LOWER(\"email\") = ?",
                [email.trim().to_ascii_lowercase()],
            ))
            .one(self.db)
            .await
    }

    /// Returns true when a user with this ID exists.
    pub async fn exists(&self, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Id.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Returns the subset of `user_ids` that do not exist.
    pub async fn missing_ids(&self, user_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<i32> = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids.to_vec()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        Ok(user_ids
            .iter()
            .copied()
            .filter(|id| !found.contains(id))
            .collect())
    }

    /// Loads the users referenced by `user_ids` into a directory for DTO conversion.
    ///
    /// Ids without a user row are simply absent; the directory resolves them to the
    /// placeholder user.
    pub async fn directory(
        &self,
        user_ids: impl IntoIterator<Item = i32>,
    ) -> Result<UserDirectory, DbErr> {
        let mut ids: Vec<i32> = user_ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(UserDirectory::default());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(UserSummary::from_entity)
            .collect();

        Ok(UserDirectory::new(users))
    }
}
