use super::*;
use crate::{model::column::ColumnType, server::model::column::NewColumn};

/// Tests board creation without columns.
///
/// Expected: three default columns, owner resolved and listed as member
#[tokio::test]
async fn creates_board_with_default_columns() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::UserFactory::new(db).name("Ada").build().await?;

    let created = BoardService::new(db)
        .create(owner.id, "Roadmap", Some("Q3".to_string()), None)
        .await?;

    let names: Vec<&str> = created.board.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["To Do", "In Progress", "Done"]);
    assert!(created.board.members.contains(&owner.id));

    let dto = created.into_dto();
    assert_eq!(dto.owner.name, "Ada");
    assert_eq!(dto.description.as_deref(), Some("Q3"));

    Ok(())
}

/// Tests board creation with more than ten columns.
///
/// Expected: Err(ColumnLimitExceeded), nothing stored
#[tokio::test]
async fn rejects_board_with_too_many_columns() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::create_user(db).await?;

    let columns = (0..11)
        .map(|i| NewColumn {
            name: format!("Column {}", i),
            column_type: ColumnType::Custom,
            color: None,
            limit: None,
            is_default: false,
        })
        .collect();
    let result = BoardService::new(db)
        .create(owner.id, "Roadmap", None, Some(columns))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BoardErr(BoardError::ColumnLimitExceeded { max: 10 }))
    ));
    assert!(BoardService::new(db).list(owner.id).await?.boards.is_empty());

    Ok(())
}

/// Tests reading a board as an outsider and a missing board.
///
/// Expected: AccessDenied for the outsider, BoardNotFound for a missing id
#[tokio::test]
async fn get_checks_existence_then_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, member_id, board) = create_shared_board(db).await?;
    let outsider = factory::user::create_user(db).await?;

    let service = BoardService::new(db);
    assert!(service.get(board.id, member_id).await.is_ok());
    assert!(matches!(
        service.get(board.id, outsider.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert!(matches!(
        service.get(board.id + 100, member_id).await,
        Err(AppError::BoardErr(BoardError::BoardNotFound(_)))
    ));

    Ok(())
}

/// Tests listing boards for owners and members.
///
/// Expected: owned and shared boards listed, foreign boards not
#[tokio::test]
async fn lists_owned_and_shared_boards() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, shared) = create_shared_board(db).await?;
    let own = create_board(db, member_id).await?;
    create_board(db, owner_id).await?;

    let boards = BoardService::new(db).list(member_id).await?.boards;
    let mut ids: Vec<i32> = boards.iter().map(|b| b.id).collect();
    ids.sort_unstable();

    let mut expected = vec![shared.id, own.id];
    expected.sort_unstable();
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests renaming a board as owner.
///
/// Expected: member gets BOARD_UPDATED with old and new names; owner gets nothing
#[tokio::test]
async fn update_notifies_other_members() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;

    let updated = BoardService::new(db)
        .update(
            board.id,
            owner_id,
            BoardChanges {
                name: Some("Roadmap 2".to_string()),
                description: None,
            },
        )
        .await?;
    assert_eq!(updated.board.name, "Roadmap 2");

    let received = notifications_of(db, member_id, "BOARD_UPDATED").await?;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].metadata["oldName"], "Roadmap");
    assert_eq!(received[0].metadata["newName"], "Roadmap 2");
    assert_eq!(received[0].metadata["nameChanged"], true);
    assert_eq!(received[0].metadata["descriptionChanged"], false);
    assert!(notifications_of(db, owner_id, "BOARD_UPDATED").await?.is_empty());

    Ok(())
}

/// Tests that members cannot update a board.
///
/// Expected: AccessDenied, name unchanged
#[tokio::test]
async fn update_requires_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, member_id, board) = create_shared_board(db).await?;

    let result = BoardService::new(db)
        .update(
            board.id,
            member_id,
            BoardChanges {
                name: Some("Mine now".to_string()),
                description: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))));
    assert_eq!(BoardService::new(db).get(board.id, member_id).await?.board.name, "Roadmap");

    Ok(())
}

/// Tests deleting a board.
///
/// Expected: board gone, member gets a HIGH BOARD_DELETED notification
#[tokio::test]
async fn delete_removes_board_and_notifies_members() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;

    BoardService::new(db).delete(board.id, owner_id).await?;

    assert!(matches!(
        BoardService::new(db).get(board.id, owner_id).await,
        Err(AppError::BoardErr(BoardError::BoardNotFound(_)))
    ));

    let received = notifications_of(db, member_id, "BOARD_DELETED").await?;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].priority.as_str(), "HIGH");
    assert_eq!(received[0].metadata["boardName"], "Roadmap");
    assert!(notifications_of(db, owner_id, "BOARD_DELETED").await?.is_empty());

    Ok(())
}
