use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    model::column::ColumnType,
    server::{
        error::board::BoardError,
        model::{
            board::{Board, CreateBoardParams, MAX_COLUMNS},
            column::NewColumn,
            task::{NewTask, Task},
        },
    },
};

mod notification;
mod task;

/// Builds an in-memory board with the default columns and owner 1.
fn default_board() -> Board {
    let now = Utc::now();
    let params = CreateBoardParams::new(1, "Roadmap", None, None, now).unwrap();

    Board {
        id: 1,
        name: params.name,
        description: params.description,
        owner_id: params.owner_id,
        members: BTreeSet::from([params.owner_id]),
        columns: params.columns,
        created_at: now,
        updated_at: now,
    }
}

fn custom_column(name: &str) -> NewColumn {
    NewColumn {
        name: name.to_string(),
        column_type: ColumnType::Custom,
        color: None,
        limit: None,
        is_default: false,
    }
}

fn new_task(title: &str) -> Task {
    Task::new(
        NewTask {
            title: title.to_string(),
            ..Default::default()
        },
        1,
        Utc::now(),
    )
    .unwrap()
}

/// Adds a task titled `title` to `column_id` and returns its id.
fn add_task(board: &mut Board, column_id: Uuid, title: &str) -> Uuid {
    board
        .insert_task(column_id, new_task(title), Utc::now())
        .unwrap()
        .id
}

/// Asserts the column orders are exactly `0..len` and agree with vector position.
fn assert_dense_columns(board: &Board) {
    for (index, column) in board.columns.iter().enumerate() {
        assert_eq!(column.order, index, "column {} out of place", column.name);
    }
}

/// Asserts every column's task orders are exactly `0..len` and agree with vector position.
fn assert_dense_tasks(board: &Board) {
    for column in &board.columns {
        for (index, task) in column.tasks.iter().enumerate() {
            assert_eq!(task.order, index, "task {} out of place", task.title);
            assert_eq!(task.column_id, column.id);
        }
    }
}

fn titles(board: &Board, column_id: Uuid) -> Vec<String> {
    board
        .column(column_id)
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.title.clone())
        .collect()
}
