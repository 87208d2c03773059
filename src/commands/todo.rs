//! Todo Commands
//!
//! Frontend bindings for `TodoEndpoint`.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::models::Todo;
use super::{call, EndpointError};

const ENDPOINT: &str = "TodoEndpoint";

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct NoArgs {}

#[derive(Serialize)]
struct SaveArgs<'a> {
    todo: &'a Todo,
}

#[derive(Serialize)]
struct RemoveArgs<'a> {
    todos: &'a [Todo],
}

// ========================
// Commands
// ========================

/// All todos, unpaged
pub async fn find_all_todos(config: &ClientConfig) -> Result<Vec<Todo>, EndpointError> {
    let todos: Option<Vec<Todo>> = call(config, ENDPOINT, "findAll", &NoArgs {}).await?;
    Ok(todos.unwrap_or_default())
}

/// Insert (no id) or update (with id); `None` when the backend returns nothing
pub async fn save_todo(config: &ClientConfig, todo: &Todo) -> Result<Option<Todo>, EndpointError> {
    call(config, ENDPOINT, "save", &SaveArgs { todo }).await
}

pub async fn remove_todos(config: &ClientConfig, todos: &[Todo]) -> Result<(), EndpointError> {
    let _: Option<serde_json::Value> = call(config, ENDPOINT, "remove", &RemoveArgs { todos }).await?;
    Ok(())
}
