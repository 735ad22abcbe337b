use crate::api::{dtos::todo::UpdateTodoRequest, errors::TodoApiError};
use crate::schema::*;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable, Queryable)]
#[serde(rename_all = "camelCase")]
#[table_name = "todos"]
pub struct TodoItem {
    pub user_id: String,
    pub todo_id: String,
    pub created_at: chrono::NaiveDateTime,
    pub name: String,
    pub due_date: String,
    pub done: bool,
    pub attachment_url: Option<String>,
}

impl TodoItem {
    pub fn new(user_id: String, name: String, due_date: String) -> Self {
        Self {
            user_id,
            todo_id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
            name,
            due_date,
            done: false,
            attachment_url: None,
        }
    }
}

/// Persistence for todo items, keyed by `(user_id, todo_id)`.
///
/// `update` and `delete` report whether a row matched so the caller can
/// decide between success and not-found.
pub trait TodoStore: Send + Sync {
    fn insert(&self, item: &TodoItem) -> Result<(), TodoApiError>;

    /// Items of one user, oldest first
    fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>, TodoApiError>;

    fn update(
        &self,
        user_id: &str,
        todo_id: &str,
        changes: &UpdateTodoRequest,
    ) -> Result<bool, TodoApiError>;

    fn delete(&self, user_id: &str, todo_id: &str) -> Result<bool, TodoApiError>;
}
