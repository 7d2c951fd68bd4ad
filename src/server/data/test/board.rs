use super::*;
use crate::server::model::task::{NewTask, Task};

/// Tests creating a board with default columns.
///
/// Expected: board row, owner member row and three columns stored
#[tokio::test]
async fn creates_board_with_owner_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::create_user(db).await?;

    let repo = BoardRepository::new(db);
    let params = CreateBoardParams::new(owner.id, "Launch", None, None, Utc::now()).unwrap();
    let board = repo.create(params).await?;

    assert_eq!(board.name, "Launch");
    assert!(board.members.contains(&owner.id));
    assert_eq!(board.columns.len(), 3);

    let reloaded = repo.find_by_id(board.id).await?.unwrap();
    assert_eq!(reloaded, board);

    Ok(())
}

/// Tests that save round-trips the nested document and member changes.
///
/// Expected: tasks and member set persisted exactly
#[tokio::test]
async fn save_persists_whole_aggregate() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::create_user(db).await?;
    let member = factory::user::create_user(db).await?;

    let repo = BoardRepository::new(db);
    let params = CreateBoardParams::new(owner.id, "Launch", None, None, Utc::now()).unwrap();
    let mut board = repo.create(params).await?;

    let column_id = board.columns[0].id;
    let task = Task::new(
        NewTask {
            title: "Write docs".to_string(),
            ..Default::default()
        },
        owner.id,
        Utc::now(),
    )
    .unwrap();
    board.insert_task(column_id, task, Utc::now()).unwrap();
    board.members.insert(member.id);

    let saved = repo.save(&board).await?;
    assert_eq!(saved.columns[0].tasks[0].title, "Write docs");
    assert!(saved.members.contains(&member.id));

    board.members.remove(&member.id);
    let saved = repo.save(&board).await?;
    assert!(!saved.members.contains(&member.id));

    let reloaded = repo.find_by_id(board.id).await?.unwrap();
    assert_eq!(reloaded.columns, board.columns);
    assert_eq!(reloaded.members, board.members);

    Ok(())
}

/// Tests saving a board that was deleted in the meantime.
///
/// Expected: Err and no orphan member rows
#[tokio::test]
async fn save_fails_for_deleted_board() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::create_user(db).await?;

    let repo = BoardRepository::new(db);
    let params = CreateBoardParams::new(owner.id, "Gone", None, None, Utc::now()).unwrap();
    let mut board = repo.create(params).await?;
    repo.delete(board.id).await?;

    board.members.insert(4242);
    assert!(repo.save(&board).await.is_err());

    let members = entity::prelude::BoardMember::find().all(db).await?;
    assert!(members.is_empty());

    Ok(())
}

/// Tests locating a board through one of its column ids.
///
/// Expected: the owning board, None for an unknown column
#[tokio::test]
async fn finds_board_by_column_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::create_user(db).await?;

    let repo = BoardRepository::new(db);
    let first = repo
        .create(CreateBoardParams::new(owner.id, "First", None, None, Utc::now()).unwrap())
        .await?;
    let second = repo
        .create(CreateBoardParams::new(owner.id, "Second", None, None, Utc::now()).unwrap())
        .await?;

    let found = repo.find_by_column_id(second.columns[1].id).await?.unwrap();
    assert_eq!(found.id, second.id);

    let found = repo.find_by_column_id(first.columns[2].id).await?.unwrap();
    assert_eq!(found.id, first.id);

    assert!(repo.find_by_column_id(uuid::Uuid::new_v4()).await?.is_none());

    Ok(())
}

/// Tests listing boards for owners and members.
///
/// Expected: each user sees owned and joined boards only
#[tokio::test]
async fn lists_boards_for_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, member, shared) = factory::helpers::create_shared_board(db).await?;
    let own = factory::board::create_board(db, member.id).await?;
    let outsider = factory::user::create_user(db).await?;
    factory::board::create_board(db, outsider.id).await?;

    let repo = BoardRepository::new(db);

    let ids: Vec<i32> = repo.find_for_user(owner.id).await?.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![shared.id]);

    let mut ids: Vec<i32> = repo.find_for_user(member.id).await?.iter().map(|b| b.id).collect();
    ids.sort();
    assert_eq!(ids, vec![shared.id, own.id]);

    Ok(())
}

/// Tests deleting a board.
///
/// Expected: board, members and invitations removed; notifications kept
#[tokio::test]
async fn delete_removes_members_and_invitations() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, member, board) = factory::helpers::create_shared_board(db).await?;
    let invitee = factory::user::create_user(db).await?;
    factory::invitation::create_invitation(db, board.id, owner.id, invitee.id).await?;
    factory::notification::create_notification(db, owner.id, member.id, board.id).await?;

    let repo = BoardRepository::new(db);
    assert!(repo.delete(board.id).await?);
    assert!(!repo.delete(board.id).await?);

    assert!(repo.find_by_id(board.id).await?.is_none());
    assert!(entity::prelude::BoardMember::find().all(db).await?.is_empty());
    assert!(entity::prelude::BoardInvitation::find().all(db).await?.is_empty());
    assert_eq!(entity::prelude::Notification::find().all(db).await?.len(), 1);

    Ok(())
}
