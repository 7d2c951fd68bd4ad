use super::*;
use crate::{
    model::task::TaskStatus,
    server::model::task::{parse_mentions, TaskChanges},
};

/// Tests that inserted tasks take the next dense order.
///
/// Expected: orders 0, 1, 2 in insertion order
#[test]
fn insert_task_appends_with_dense_order() {
    let mut board = default_board();
    let todo = board.columns[0].id;

    for title in ["A", "B", "C"] {
        add_task(&mut board, todo, title);
    }

    assert_eq!(titles(&board, todo), vec!["A", "B", "C"]);
    assert_dense_tasks(&board);
}

/// Tests a column with a limit of one.
///
/// Expected: first insert gets order 0, second fails with TaskLimitExceeded
#[test]
fn insert_task_respects_limit() {
    let mut board = default_board();
    let todo = board.columns[0].id;
    board.column_mut(todo).unwrap().update_limit(Some(1)).unwrap();

    let task = board.insert_task(todo, new_task("Only"), Utc::now()).unwrap();
    assert_eq!(task.order, 0);

    let result = board.insert_task(todo, new_task("Second"), Utc::now());
    assert_eq!(
        result.unwrap_err(),
        BoardError::TaskLimitExceeded {
            column_id: todo,
            limit: 1
        }
    );
    assert_eq!(board.column(todo).unwrap().tasks.len(), 1);
}

/// Tests that a limit of zero accepts no tasks.
///
/// Expected: Err(TaskLimitExceeded)
#[test]
fn zero_limit_accepts_nothing() {
    let mut board = default_board();
    let todo = board.columns[0].id;
    board.column_mut(todo).unwrap().update_limit(Some(0)).unwrap();

    assert!(matches!(
        board.insert_task(todo, new_task("Nope"), Utc::now()),
        Err(BoardError::TaskLimitExceeded { .. })
    ));
}

/// Tests deleting from the middle of a column.
///
/// Expected: gap closed, remaining tasks dense
#[test]
fn remove_task_closes_gap() {
    let mut board = default_board();
    let todo = board.columns[0].id;
    add_task(&mut board, todo, "A");
    let b = add_task(&mut board, todo, "B");
    add_task(&mut board, todo, "C");

    let removed = board.remove_task(b, Utc::now()).unwrap();

    assert_eq!(removed.title, "B");
    assert_eq!(titles(&board, todo), vec!["A", "C"]);
    assert_dense_tasks(&board);
}

/// Tests deleting an unknown task.
///
/// Expected: Err(TaskNotFound)
#[test]
fn remove_missing_task_fails() {
    let mut board = default_board();
    let id = Uuid::new_v4();

    assert_eq!(
        board.remove_task(id, Utc::now()).unwrap_err(),
        BoardError::TaskNotFound(id)
    );
}

/// Tests a move between columns into the middle of the target.
///
/// Column A holds two tasks, B holds two. Moving A's first task into B at order 1 leaves
/// A with one task at order 0 and B with three dense tasks, the moved one at position 1.
///
/// Expected: A = [a2], B = [b1, a1, b2]
#[test]
fn move_task_between_columns() {
    let mut board = default_board();
    let a = board.columns[0].id;
    let b = board.columns[1].id;
    let a1 = add_task(&mut board, a, "a1");
    add_task(&mut board, a, "a2");
    add_task(&mut board, b, "b1");
    add_task(&mut board, b, "b2");

    let moved = board.move_task(a1, b, 1, Utc::now()).unwrap();
    assert_eq!(moved.order, 1);
    assert_eq!(moved.column_id, b);

    assert_eq!(titles(&board, a), vec!["a2"]);
    assert_eq!(titles(&board, b), vec!["b1", "a1", "b2"]);
    assert_dense_tasks(&board);
}

/// Tests clamping of the requested position.
///
/// Expected: large orders append, negative orders prepend
#[test]
fn move_task_clamps_order() {
    let mut board = default_board();
    let a = board.columns[0].id;
    let b = board.columns[1].id;
    let first = add_task(&mut board, a, "first");
    let second = add_task(&mut board, a, "second");
    add_task(&mut board, b, "b1");

    board.move_task(first, b, 99, Utc::now()).unwrap();
    board.move_task(second, b, -5, Utc::now()).unwrap();

    assert_eq!(titles(&board, b), vec!["second", "b1", "first"]);
    assert_dense_tasks(&board);
}

/// Tests reordering inside a single column.
///
/// Expected: task moved to the requested slot, orders dense
#[test]
fn move_task_within_column() {
    let mut board = default_board();
    let a = board.columns[0].id;
    let t1 = add_task(&mut board, a, "t1");
    add_task(&mut board, a, "t2");
    add_task(&mut board, a, "t3");

    board.move_task(t1, a, 2, Utc::now()).unwrap();

    assert_eq!(titles(&board, a), vec!["t2", "t3", "t1"]);
    assert_dense_tasks(&board);
}

/// Tests that a full column still accepts reordering of its own tasks.
///
/// Expected: Ok
#[test]
fn move_within_full_column_is_not_limit_checked() {
    let mut board = default_board();
    let a = board.columns[0].id;
    let t1 = add_task(&mut board, a, "t1");
    add_task(&mut board, a, "t2");
    board.column_mut(a).unwrap().update_limit(Some(2)).unwrap();

    board.move_task(t1, a, 1, Utc::now()).unwrap();

    assert_eq!(titles(&board, a), vec!["t2", "t1"]);
}

/// Tests moving into a column at its limit.
///
/// Expected: Err(TaskLimitExceeded) and both columns unchanged
#[test]
fn move_task_into_full_column_changes_nothing() {
    let mut board = default_board();
    let a = board.columns[0].id;
    let b = board.columns[1].id;
    let a1 = add_task(&mut board, a, "a1");
    add_task(&mut board, b, "b1");
    board.column_mut(b).unwrap().update_limit(Some(1)).unwrap();
    let before = board.clone();

    let result = board.move_task(a1, b, 0, Utc::now());

    assert_eq!(
        result.unwrap_err(),
        BoardError::TaskLimitExceeded {
            column_id: b,
            limit: 1
        }
    );
    assert_eq!(board, before);
}

/// Tests moving to an unknown column and moving an unknown task.
///
/// Expected: Err(ColumnNotFound) / Err(TaskNotFound), board unchanged
#[test]
fn move_task_with_missing_ids_fails() {
    let mut board = default_board();
    let a = board.columns[0].id;
    let t1 = add_task(&mut board, a, "t1");
    let before = board.clone();

    let missing_column = Uuid::new_v4();
    assert_eq!(
        board.move_task(t1, missing_column, 0, Utc::now()).unwrap_err(),
        BoardError::ColumnNotFound(missing_column)
    );

    let missing_task = Uuid::new_v4();
    assert_eq!(
        board.move_task(missing_task, a, 0, Utc::now()).unwrap_err(),
        BoardError::TaskNotFound(missing_task)
    );
    assert_eq!(board, before);
}

/// Tests that long mixed sequences of insert/move/remove keep every column dense.
///
/// Expected: dense orders after each step
#[test]
fn mixed_operations_keep_tasks_dense() {
    let mut board = default_board();
    let columns: Vec<Uuid> = board.columns.iter().map(|c| c.id).collect();
    let mut tasks = Vec::new();

    for i in 0..12 {
        tasks.push(add_task(&mut board, columns[i % 3], &format!("t{}", i)));
    }
    for (i, task) in tasks.iter().enumerate() {
        board
            .move_task(*task, columns[(i + 1) % 3], (i as i64 * 3) % 5 - 1, Utc::now())
            .unwrap();
        assert_dense_tasks(&board);
    }
    for task in tasks.iter().step_by(3) {
        board.remove_task(*task, Utc::now()).unwrap();
        assert_dense_tasks(&board);
    }

    let total: usize = board.columns.iter().map(|c| c.tasks.len()).sum();
    assert_eq!(total, 8);
}

/// Tests task field validation.
///
/// Expected: Err(Validation) for an empty or over-long title
#[test]
fn task_title_is_validated() {
    let empty = Task::new(NewTask::default(), 1, Utc::now());
    assert!(matches!(empty, Err(BoardError::Validation(_))));

    let long = Task::new(
        NewTask {
            title: "x".repeat(201),
            ..Default::default()
        },
        1,
        Utc::now(),
    );
    assert!(matches!(long, Err(BoardError::Validation(_))));
}

/// Tests the defaults of a new task.
///
/// Expected: medium priority, todo status, not archived
#[test]
fn task_defaults() {
    let task = new_task("Defaults");

    assert_eq!(task.priority, crate::model::task::TaskPriority::Medium);
    assert_eq!(task.status, TaskStatus::Todo);
    assert!(!task.is_archived);
    assert_eq!(task.description, "");
}

/// Tests the outcome reported by a task update.
///
/// Expected: completion flagged once, newly added assignees reported
#[test]
fn task_update_reports_outcome() {
    let mut task = new_task("Ship it");
    task.assign(2, Utc::now());

    let outcome = task
        .apply(
            TaskChanges {
                status: Some(TaskStatus::Completed),
                assignees: Some(vec![2, 3, 4]),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
    assert!(outcome.completed);
    assert_eq!(outcome.added_assignees, vec![3, 4]);

    let outcome = task
        .apply(
            TaskChanges {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
    assert!(!outcome.completed);
}

/// Tests that assignment is idempotent.
///
/// Expected: second assign returns false
#[test]
fn assign_is_idempotent() {
    let mut task = new_task("Assign");

    assert!(task.assign(5, Utc::now()));
    assert!(!task.assign(5, Utc::now()));
    assert_eq!(task.assignees.len(), 1);
    assert!(task.unassign(5, Utc::now()));
    assert!(!task.unassign(5, Utc::now()));
}

/// Tests comment editing and authorship checks.
///
/// Expected: history recorded for the author, NotCommentAuthor for anyone else
#[test]
fn comment_edit_keeps_history() {
    let mut task = new_task("Discuss");
    let comment_id = task.add_comment(1, "First draft", Utc::now()).unwrap().id;

    assert_eq!(
        task.edit_comment(comment_id, 2, "Hijack", Utc::now())
            .unwrap_err(),
        BoardError::NotCommentAuthor(comment_id)
    );

    let new_mentions = task
        .edit_comment(comment_id, 1, "Second draft cc @[Bo](7)", Utc::now())
        .unwrap();
    assert_eq!(new_mentions, vec![7]);

    let comment = task.comment(comment_id).unwrap();
    assert_eq!(comment.content, "Second draft cc @[Bo](7)");
    assert!(comment.is_edited);
    assert_eq!(comment.edit_history.len(), 1);
    assert_eq!(comment.edit_history[0].content, "First draft");

    assert_eq!(
        task.remove_comment(comment_id, 2, Utc::now()).unwrap_err(),
        BoardError::NotCommentAuthor(comment_id)
    );
    task.remove_comment(comment_id, 1, Utc::now()).unwrap();
    assert!(task.comments.is_empty());
}

/// Tests comment length validation.
///
/// Expected: Err(Validation) for blank and over 5000 characters
#[test]
fn comment_content_is_validated() {
    let mut task = new_task("Discuss");

    assert!(matches!(
        task.add_comment(1, "  ", Utc::now()),
        Err(BoardError::Validation(_))
    ));
    assert!(matches!(
        task.add_comment(1, &"x".repeat(5001), Utc::now()),
        Err(BoardError::Validation(_))
    ));
}

/// Tests mention extraction.
///
/// Expected: distinct ids in order, malformed mentions skipped
#[test]
fn parses_mentions() {
    let content = "hey @[Ann Lee](3) and @[Bob](12), also @[Ann Lee](3) @[bad](x) @[open](5";
    assert_eq!(parse_mentions(content), vec![3, 12]);
    assert!(parse_mentions("no mentions here").is_empty());
}

/// Tests mention extraction around incomplete mention markers.
///
/// Expected: an unclosed `@[` does not swallow the next mention; an empty display name
/// or a padded id is not a mention
#[test]
fn parses_mentions_after_incomplete_marker() {
    assert_eq!(parse_mentions("@[a] and @[Bob](3)"), vec![3]);
    assert!(parse_mentions("@[](5)").is_empty());
    assert!(parse_mentions("@[Bob]( 5 )").is_empty());
}
