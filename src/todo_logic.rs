use crate::api::{
    auth_utils::parse_user_id,
    dtos::todo::{CreateTodoRequest, UpdateTodoRequest},
    errors::TodoApiError,
};
use crate::models::todo_model::{TodoItem, TodoStore};

/// Business operations the handlers delegate to.
///
/// Every call gets the caller's raw bearer token; resolving who the caller
/// is, and whether they own the item, happens behind this trait. Calls are
/// blocking and are run through `web::block` by the handlers.
pub trait TodoLogic: Send + Sync {
    fn create_todo(&self, token: &str, request: CreateTodoRequest)
        -> Result<TodoItem, TodoApiError>;

    fn get_todos(&self, token: &str) -> Result<Vec<TodoItem>, TodoApiError>;

    fn update_todo(
        &self,
        token: &str,
        todo_id: &str,
        request: UpdateTodoRequest,
    ) -> Result<(), TodoApiError>;

    fn delete_todo(&self, token: &str, todo_id: &str) -> Result<(), TodoApiError>;
}

pub struct TodoService<S> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: TodoStore> TodoLogic for TodoService<S> {
    fn create_todo(
        &self,
        token: &str,
        request: CreateTodoRequest,
    ) -> Result<TodoItem, TodoApiError> {
        let user_id = parse_user_id(token)?;

        if request.name.trim().is_empty() {
            return Err(TodoApiError::BadRequest(String::from(
                "Todo name must not be empty",
            )));
        }

        let item = TodoItem::new(user_id, request.name, request.due_date);
        self.store.insert(&item)?;

        Ok(item)
    }

    fn get_todos(&self, token: &str) -> Result<Vec<TodoItem>, TodoApiError> {
        let user_id = parse_user_id(token)?;

        self.store.list_for_user(&user_id)
    }

    fn update_todo(
        &self,
        token: &str,
        todo_id: &str,
        request: UpdateTodoRequest,
    ) -> Result<(), TodoApiError> {
        let user_id = parse_user_id(token)?;

        if self.store.update(&user_id, todo_id, &request)? {
            Ok(())
        } else {
            Err(TodoApiError::NotFound(String::from("Todo")))
        }
    }

    fn delete_todo(&self, token: &str, todo_id: &str) -> Result<(), TodoApiError> {
        let user_id = parse_user_id(token)?;

        if self.store.delete(&user_id, todo_id)? {
            Ok(())
        } else {
            Err(TodoApiError::NotFound(String::from("Todo")))
        }
    }
}
