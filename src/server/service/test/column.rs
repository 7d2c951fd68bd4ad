use super::*;
use crate::{
    model::column::ColumnType,
    server::model::{
        column::{ColumnChanges, NewColumn},
        task::NewTask,
    },
};

fn custom(name: &str) -> NewColumn {
    NewColumn {
        name: name.to_string(),
        column_type: ColumnType::Custom,
        color: None,
        limit: None,
        is_default: false,
    }
}

/// Tests that a member can append a column.
///
/// Expected: column stored at the end with default color
#[tokio::test]
async fn member_creates_column_at_end() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, member_id, board) = create_shared_board(db).await?;

    let column = ColumnService::new(db)
        .create(board.id, member_id, custom("Review"))
        .await?;

    assert_eq!(column.order, 3);
    assert_eq!(column.color, "#E2E8F0");

    let columns = ColumnService::new(db).list(board.id, member_id).await?;
    assert_eq!(columns.len(), 4);
    assert_eq!(columns[3].id, column.id);

    Ok(())
}

/// Tests that only the owner deletes columns and default columns stay protected.
///
/// Expected: AccessDenied for member, ProtectedColumn for "Done", success for custom column
#[tokio::test]
async fn delete_enforces_owner_and_protection() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;
    let service = ColumnService::new(db);
    let review = service.create(board.id, owner_id, custom("Review")).await?;

    assert!(matches!(
        service.delete(board.id, member_id, review.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert!(matches!(
        service.delete(board.id, owner_id, board.columns[2].id).await,
        Err(AppError::BoardErr(BoardError::ProtectedColumn(_)))
    ));

    service.delete(board.id, owner_id, review.id).await?;
    assert_eq!(service.list(board.id, owner_id).await?.len(), 3);

    Ok(())
}

/// Tests deleting a column that still holds tasks.
///
/// Expected: Err(ColumnNotEmpty)
#[tokio::test]
async fn delete_rejects_column_with_tasks() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, _, board) = create_shared_board(db).await?;
    let todo = board.columns[0].id;

    TaskService::new(db)
        .create(
            board.id,
            todo,
            owner_id,
            NewTask {
                title: "Ship".to_string(),
                ..Default::default()
            },
        )
        .await?;

    let result = ColumnService::new(db).delete(board.id, owner_id, todo).await;
    assert!(matches!(result, Err(AppError::BoardErr(BoardError::ColumnNotEmpty(_)))));

    Ok(())
}

/// Tests reordering columns and persisting the new order.
///
/// Expected: "Done" first, orders dense after reload
#[tokio::test]
async fn reorder_persists_dense_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, _, board) = create_shared_board(db).await?;
    let done = board.columns[2].id;

    ColumnService::new(db).reorder(board.id, owner_id, done, 0).await?;

    let columns = ColumnService::new(db).list(board.id, owner_id).await?;
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Done", "To Do", "In Progress"]);
    let orders: Vec<usize> = columns.iter().map(|c| c.order).collect();
    assert_eq!(orders, [0, 1, 2]);

    let result = ColumnService::new(db).reorder(board.id, owner_id, done, 3).await;
    assert!(matches!(
        result,
        Err(AppError::BoardErr(BoardError::InvalidRange { new_order: 3, len: 3 }))
    ));

    Ok(())
}

/// Tests updating a column's limit below its task count.
///
/// Expected: Err(InvalidLimit), limit unchanged
#[tokio::test]
async fn update_rejects_limit_below_task_count() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, _, board) = create_shared_board(db).await?;
    let todo = board.columns[0].id;

    for title in ["One", "Two"] {
        TaskService::new(db)
            .create(
                board.id,
                todo,
                owner_id,
                NewTask {
                    title: title.to_string(),
                    ..Default::default()
                },
            )
            .await?;
    }

    let result = ColumnService::new(db)
        .update(
            board.id,
            owner_id,
            todo,
            ColumnChanges {
                limit: Some(Some(1)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(AppError::BoardErr(BoardError::InvalidLimit { limit: 1, task_count: 2 }))
    ));

    let column = ColumnService::new(db)
        .update(
            board.id,
            owner_id,
            todo,
            ColumnChanges {
                name: Some("Backlog".to_string()),
                limit: Some(Some(2)),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(column.name, "Backlog");
    assert_eq!(column.limit, Some(2));

    Ok(())
}
