//! Shared state handed to every request handler.

use sea_orm::DatabaseConnection;

use crate::server::service::auth::TokenKeys;

/// Resources built once at startup and cloned into each handler by Axum.
///
/// Both fields are cheap to clone: the connection is a pool handle and the token keys
/// are derived once from the configured secret.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Verifies bearer tokens on every protected route.
    pub token_keys: TokenKeys,
}

impl AppState {
    pub fn new(db: DatabaseConnection, token_keys: TokenKeys) -> Self {
        Self { db, token_keys }
    }
}
