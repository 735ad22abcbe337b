use std::collections::HashMap;
use std::sync::RwLock;

use super::todo_model::{TodoItem, TodoStore};
use crate::api::{dtos::todo::UpdateTodoRequest, errors::TodoApiError};

type Key = (String, String);

/// In-process `TodoStore`, used when no database is configured
#[derive(Default)]
pub struct MemoryTodoStore {
    items: RwLock<HashMap<Key, TodoItem>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(user_id: &str, todo_id: &str) -> Key {
    (user_id.to_string(), todo_id.to_string())
}

fn poisoned<T>(_: T) -> TodoApiError {
    log::error!("memory store lock poisoned");
    TodoApiError::InternalServerError
}

impl TodoStore for MemoryTodoStore {
    fn insert(&self, item: &TodoItem) -> Result<(), TodoApiError> {
        let mut items = self.items.write().map_err(poisoned)?;

        let k = key(&item.user_id, &item.todo_id);
        if items.contains_key(&k) {
            return Err(TodoApiError::BadRequest(String::from("Todo already exists")));
        }

        items.insert(k, item.clone());

        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>, TodoApiError> {
        let items = self.items.read().map_err(poisoned)?;

        let mut list: Vec<TodoItem> = items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();

        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.todo_id.cmp(&b.todo_id))
        });

        Ok(list)
    }

    fn update(
        &self,
        user_id: &str,
        todo_id: &str,
        changes: &UpdateTodoRequest,
    ) -> Result<bool, TodoApiError> {
        let mut items = self.items.write().map_err(poisoned)?;

        match items.get_mut(&key(user_id, todo_id)) {
            Some(item) => {
                if let Some(name) = &changes.name {
                    item.name = name.clone();
                }
                if let Some(due_date) = &changes.due_date {
                    item.due_date = due_date.clone();
                }
                if let Some(done) = changes.done {
                    item.done = done;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, user_id: &str, todo_id: &str) -> Result<bool, TodoApiError> {
        let mut items = self.items.write().map_err(poisoned)?;

        Ok(items.remove(&key(user_id, todo_id)).is_some())
    }
}
