use serde::{Deserialize, Serialize};

use crate::models::todo_model::TodoItem;
use crate::schema::todos;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: String,
}

/// Fields a caller may change on an existing todo; absent ones stay as they are
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, AsChangeset)]
#[serde(rename_all = "camelCase")]
#[table_name = "todos"]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.due_date.is_none() && self.done.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoItemResponse {
    pub item: TodoItem,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub items: Vec<TodoItem>,
}
