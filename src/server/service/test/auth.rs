use super::*;
use crate::server::service::auth::{AuthService, TokenKeys};

/// Tests issuing and verifying a token.
///
/// Expected: subject resolves back to the user id and the user row
#[tokio::test]
async fn issued_token_authenticates_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_user(db).await?;
    let keys = TokenKeys::from_secret("test-secret");

    let service = AuthService::new(db, &keys);
    let token = service.issue_token(user.id, Duration::hours(1))?;

    assert_eq!(service.verify_token(&token)?, user.id);
    assert_eq!(service.authenticate(&token).await?.id, user.id);

    Ok(())
}

/// Tests rejection of tampered, expired and foreign tokens.
///
/// Expected: InvalidToken in each case
#[tokio::test]
async fn rejects_invalid_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = TokenKeys::from_secret("test-secret");
    let other_keys = TokenKeys::from_secret("other-secret");
    let service = AuthService::new(db, &keys);

    let expired = service.issue_token(1, Duration::hours(-2))?;
    let foreign = AuthService::new(db, &other_keys).issue_token(1, Duration::hours(1))?;

    for token in ["not-a-jwt", expired.as_str(), foreign.as_str()] {
        assert!(matches!(
            service.verify_token(token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    Ok(())
}

/// Tests a valid token whose subject has no user row.
///
/// Expected: Err(UserNotInDatabase)
#[tokio::test]
async fn rejects_unknown_subject() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = TokenKeys::from_secret("test-secret");
    let service = AuthService::new(db, &keys);

    let token = service.issue_token(4242, Duration::hours(1))?;

    assert!(matches!(
        service.authenticate(&token).await,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}
