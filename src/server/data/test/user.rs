use super::*;

/// Tests email lookup ignoring case.
///
/// Expected: Ok(Some) for a differently cased email, Ok(None) for an unknown one
#[tokio::test]
async fn finds_user_by_email_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("Ada.Lovelace@Example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo.find_by_email("  ada.lovelace@example.COM ").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    assert!(repo.find_by_email("ada@example.com").await?.is_none());

    Ok(())
}

/// Tests email lookup for an address with non-ASCII letters.
///
/// Expected: Ok(Some) when only the ASCII letters differ in case
#[tokio::test]
async fn finds_non_ascii_email_ignoring_ascii_case() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("ÉMILE@Example.com")
        .build()
        .await?;

    let found = UserRepository::new(db)
        .find_by_email("ÉMILE@EXAMPLE.COM")
        .await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests the user directory used for DTO conversion.
///
/// Expected: known ids resolve to the user, stale ids to the placeholder
#[tokio::test]
async fn directory_resolves_stale_ids_to_placeholder() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserRepository::new(db);

    let directory = repo.directory([user.id, 9999, user.id]).await?;

    assert_eq!(directory.resolve(user.id).name, user.name);
    let stale = directory.resolve(9999);
    assert_eq!(stale.id, 9999);
    assert_eq!(stale.name, "Unknown");
    assert_eq!(stale.email, "unknown@email.com");

    assert_eq!(repo.missing_ids(&[user.id, 9999]).await?, vec![9999]);
    assert!(repo.exists(user.id).await?);

    Ok(())
}
