use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    error::{auth::AuthError, AppError},
    service::auth::{AuthService, TokenKeys},
};

const BEARER_PREFIX: &str = "Bearer ";

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    keys: &'a TokenKeys,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, keys: &'a TokenKeys) -> Self {
        Self { db, keys }
    }

    /// Resolves the `Authorization: Bearer <token>` header to a user.
    ///
    /// Board roles are checked later by the services, once the board is loaded.
    ///
    /// # Returns
    /// - `Ok(Model)` - Authenticated user
    /// - `Err(AuthErr(MissingToken))` - Header absent or not a bearer credential
    /// - `Err(AuthErr(InvalidToken))` - Token failed verification
    /// - `Err(AuthErr(UserNotInDatabase))` - Token subject has no user row
    pub async fn require(&self, headers: &HeaderMap) -> Result<entity::user::Model, AppError> {
        let Some(token) = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
        else {
            return Err(AuthError::MissingToken.into());
        };

        AuthService::new(self.db, self.keys).authenticate(token).await
    }
}
