//! Bearer token verification.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the user id. The identity provider issues
//! them; this service verifies them and checks that the subject exists locally.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, internal::InternalError, AppError},
};

/// JWT claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    keys: &'a TokenKeys,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, keys: &'a TokenKeys) -> Self {
        Self { db, keys }
    }

    /// Verifies signature and expiry and returns the subject's user id.
    pub fn verify_token(&self, token: &str) -> Result<i32, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        data.claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken(format!("non-numeric subject '{}'", data.claims.sub)))
    }

    /// Resolves a bearer token to an existing user.
    ///
    /// # Returns
    /// - `Ok(Model)` - Token valid and user exists
    /// - `Err(AuthErr(InvalidToken))` - Signature, expiry or subject invalid
    /// - `Err(AuthErr(UserNotInDatabase))` - Subject has no user row
    /// - `Err(DbErr)` - Database error during lookup
    pub async fn authenticate(&self, token: &str) -> Result<entity::user::Model, AppError> {
        let user_id = self.verify_token(token)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        Ok(user)
    }

    /// Signs a token for `user_id` valid for `ttl`.
    pub fn issue_token(&self, user_id: i32, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| InternalError::TokenSigning(e).into())
    }
}
