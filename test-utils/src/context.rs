use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
};

use crate::error::TestError;

/// An isolated in-memory SQLite database for one test.
///
/// Every context owns its own database; nothing is shared between tests. The connection
/// is opened on first use.
pub struct TestContext {
    /// Connection to the test database, `None` until `database()` has been called.
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    pub fn new() -> Self {
        Self { db: None }
    }

    /// Returns the test database, connecting on first call.
    ///
    /// SQL statement logging is disabled so failing tests print only their own output.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        let db = match self.db.take() {
            Some(db) => db,
            None => {
                let mut options = ConnectOptions::new("sqlite::memory:");
                options.sqlx_logging(false);
                Database::connect(options).await?
            }
        };

        Ok(self.db.insert(db))
    }

    /// Runs the given CREATE TABLE statements in order.
    ///
    /// Called by `TestBuilder::build()`; statements for referenced tables must come first.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in &stmts {
            db.execute(stmt).await?;
        }

        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
