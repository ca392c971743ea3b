//! Todo Commands

use serde::Serialize;

use super::{query, send, BridgeError};
use crate::models::TodoItem;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddTodoArgs<'a> {
    title: &'a str,
    /// Unix seconds
    due_ts: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TodoIdArgs {
    todo_id: i64,
}

// ========================
// Commands
// ========================

pub async fn get_todos() -> Result<Vec<TodoItem>, BridgeError> {
    let items: Option<Vec<TodoItem>> = query("get_todos").await?;
    Ok(items.unwrap_or_default())
}

pub async fn add_todo(title: &str, due_ts: f64) -> Result<(), BridgeError> {
    send("add_todo", &AddTodoArgs { title, due_ts }).await
}

pub async fn remove_todo(todo_id: i64) -> Result<(), BridgeError> {
    send("remove_todo", &TodoIdArgs { todo_id }).await
}
