use super::*;
use crate::{
    model::task::TaskStatus,
    server::model::{
        column::ColumnChanges,
        task::{NewTask, TaskChanges},
    },
};

fn titled(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        ..Default::default()
    }
}

/// Tests creating tasks through the column id.
///
/// Expected: dense orders, creator recorded, assignee notified but not the actor
#[tokio::test]
async fn create_appends_and_notifies_assignees() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;
    let todo = board.columns[0].id;
    let service = TaskService::new(db);

    let first = service.create(board.id, todo, owner_id, titled("First")).await?;
    let second = service
        .create(
            board.id,
            todo,
            owner_id,
            NewTask {
                assignees: vec![owner_id, member_id],
                ..titled("Second")
            },
        )
        .await?;

    assert_eq!((first.order, second.order), (0, 1));
    assert_eq!(second.creator_id, owner_id);
    assert_eq!(second.column_id, todo);

    let received = notifications_of(db, member_id, "ASSIGNED").await?;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].metadata["taskTitle"], "Second");
    assert!(notifications_of(db, owner_id, "ASSIGNED").await?.is_empty());

    Ok(())
}

/// Tests creating a task with a column id from another board.
///
/// Expected: Err(ColumnNotFound)
#[tokio::test]
async fn create_rejects_column_of_other_board() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, _, board) = create_shared_board(db).await?;
    let other = create_board(db, owner_id).await?;

    let result = TaskService::new(db)
        .create(board.id, other.columns[0].id, owner_id, titled("Lost"))
        .await;

    assert!(matches!(result, Err(AppError::BoardErr(BoardError::ColumnNotFound(_)))));

    Ok(())
}

/// Tests creating a task with an unknown assignee.
///
/// Expected: Err(NotFound), no task stored
#[tokio::test]
async fn create_rejects_unknown_assignee() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, _, board) = create_shared_board(db).await?;
    let todo = board.columns[0].id;

    let result = TaskService::new(db)
        .create(
            board.id,
            todo,
            owner_id,
            NewTask {
                assignees: vec![9999],
                ..titled("Ghost")
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(TaskService::new(db).list(board.id, todo, owner_id).await?.is_empty());

    Ok(())
}

/// Tests the column limit on create.
///
/// Expected: first insert succeeds at order 0, second fails with TaskLimitExceeded
#[tokio::test]
async fn create_respects_column_limit() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, _, board) = create_shared_board(db).await?;
    let todo = board.columns[0].id;

    ColumnService::new(db)
        .update(
            board.id,
            owner_id,
            todo,
            ColumnChanges {
                limit: Some(Some(1)),
                ..Default::default()
            },
        )
        .await?;

    let service = TaskService::new(db);
    let first = service.create(board.id, todo, owner_id, titled("One")).await?;
    assert_eq!(first.order, 0);

    let result = service.create(board.id, todo, owner_id, titled("Two")).await;
    assert!(matches!(
        result,
        Err(AppError::BoardErr(BoardError::TaskLimitExceeded { limit: 1, .. }))
    ));

    Ok(())
}

/// Tests moving a task between columns and persisting both sides.
///
/// Expected: source renumbered to [0], task at position 1 of the target
#[tokio::test]
async fn move_persists_source_and_target() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;
    let (todo, doing) = (board.columns[0].id, board.columns[1].id);
    let service = TaskService::new(db);

    let moved = service.create(board.id, todo, owner_id, titled("A0")).await?;
    service.create(board.id, todo, owner_id, titled("A1")).await?;
    service.create(board.id, doing, owner_id, titled("B0")).await?;
    service.create(board.id, doing, owner_id, titled("B1")).await?;

    let task = service
        .move_task(board.id, moved.id, member_id, doing, 1)
        .await?;
    assert_eq!(task.column_id, doing);
    assert_eq!(task.order, 1);

    let source = service.list(board.id, todo, owner_id).await?;
    let target = service.list(board.id, doing, owner_id).await?;
    let source: Vec<(&str, usize)> = source.iter().map(|t| (t.title.as_str(), t.order)).collect();
    let target: Vec<(&str, usize)> = target.iter().map(|t| (t.title.as_str(), t.order)).collect();
    assert_eq!(source, [("A1", 0)]);
    assert_eq!(target, [("B0", 0), ("A0", 1), ("B1", 2)]);

    Ok(())
}

/// Tests that an update completing the task notifies assignees other than the actor.
///
/// Expected: one TASK_COMPLETED for the member, none for the owner
#[tokio::test]
async fn completing_task_notifies_assignees() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;
    let service = TaskService::new(db);

    let task = service
        .create(
            board.id,
            board.columns[0].id,
            owner_id,
            NewTask {
                assignees: vec![owner_id, member_id],
                ..titled("Release")
            },
        )
        .await?;

    let completed = TaskChanges {
        status: Some(TaskStatus::Completed),
        ..Default::default()
    };
    service.update(board.id, task.id, owner_id, completed.clone()).await?;
    service.update(board.id, task.id, owner_id, completed).await?;

    assert_eq!(notifications_of(db, member_id, "TASK_COMPLETED").await?.len(), 1);
    assert!(notifications_of(db, owner_id, "TASK_COMPLETED").await?.is_empty());

    Ok(())
}

/// Tests that assigning is idempotent.
///
/// Expected: single ASSIGNED notification after two assigns; unknown user is 404
#[tokio::test]
async fn assign_notifies_only_new_assignee() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;
    let service = TaskService::new(db);
    let task = service
        .create(board.id, board.columns[0].id, owner_id, titled("Review"))
        .await?;

    service.assign(board.id, task.id, owner_id, member_id).await?;
    let task = service.assign(board.id, task.id, owner_id, member_id).await?;
    assert!(task.assignees.contains(&member_id));
    assert_eq!(notifications_of(db, member_id, "ASSIGNED").await?.len(), 1);

    assert!(matches!(
        service.assign(board.id, task.id, owner_id, 9999).await,
        Err(AppError::NotFound(_))
    ));

    let task = service.unassign(board.id, task.id, owner_id, member_id).await?;
    assert!(task.assignees.is_empty());

    Ok(())
}

/// Tests comments with mentions and author-only edits.
///
/// Expected: mention notified once, edit history recorded, non-author edit forbidden
#[tokio::test]
async fn comments_notify_mentions_and_guard_author() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, member_id, board) = create_shared_board(db).await?;
    let service = TaskService::new(db);
    let task = service
        .create(board.id, board.columns[0].id, owner_id, titled("Docs"))
        .await?;

    let content = format!("@[Member]({}) can you review?", member_id);
    let task = service.add_comment(board.id, task.id, owner_id, &content).await?;
    let comment_id = task.comments[0].id;
    assert_eq!(notifications_of(db, member_id, "MENTIONED").await?.len(), 1);

    let edited = format!("@[Member]({}) please review today", member_id);
    let task = service
        .edit_comment(board.id, task.id, comment_id, owner_id, &edited)
        .await?;
    assert!(task.comments[0].is_edited);
    assert_eq!(task.comments[0].edit_history[0].content, content);
    assert_eq!(notifications_of(db, member_id, "MENTIONED").await?.len(), 1);

    assert!(matches!(
        service
            .delete_comment(board.id, task.id, comment_id, member_id)
            .await,
        Err(AppError::BoardErr(BoardError::NotCommentAuthor(_)))
    ));

    let task = service
        .delete_comment(board.id, task.id, comment_id, owner_id)
        .await?;
    assert!(task.comments.is_empty());

    Ok(())
}

/// Tests deleting a task from the middle of a column.
///
/// Expected: remaining tasks renumbered densely
#[tokio::test]
async fn delete_closes_gap() -> Result<(), AppError> {
    let test = TestBuilder::new().with_board_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner_id, _, board) = create_shared_board(db).await?;
    let todo = board.columns[0].id;
    let service = TaskService::new(db);

    service.create(board.id, todo, owner_id, titled("A")).await?;
    let middle = service.create(board.id, todo, owner_id, titled("B")).await?;
    service.create(board.id, todo, owner_id, titled("C")).await?;

    service.delete(board.id, middle.id, owner_id).await?;

    let tasks = service.list(board.id, todo, owner_id).await?;
    let tasks: Vec<(&str, usize)> = tasks.iter().map(|t| (t.title.as_str(), t.order)).collect();
    assert_eq!(tasks, [("A", 0), ("C", 1)]);

    assert!(matches!(
        service.get(board.id, middle.id, owner_id).await,
        Err(AppError::BoardErr(BoardError::TaskNotFound(_)))
    ));

    Ok(())
}
