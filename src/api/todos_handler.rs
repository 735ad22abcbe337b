use actix_web::{web, HttpResponse};

use super::dtos::todo::{CreateTodoRequest, TodoItemResponse, TodoListResponse, UpdateTodoRequest};
use super::errors::TodoApiError;
use super::logging::LogSink;
use super::middlewares::auth::BearerToken;
use crate::todo_logic::TodoLogic;

pub const DELETED_BODY: &str = "Sucessfully deleted!";
pub const UPDATED_BODY: &str = "Sucessfully updated!";

/// Create a new todo
pub async fn create_todo(
    token: BearerToken,
    body: web::Bytes,
    logic: web::Data<dyn TodoLogic>,
    logger: web::Data<dyn LogSink>,
) -> Result<HttpResponse, TodoApiError> {
    let request: CreateTodoRequest = serde_json::from_slice(&body)?;

    let item = web::block(move || logic.create_todo(&token, request)).await??;

    logger.info("Create Todo", &format!("Created todo item {}", item.todo_id));

    Ok(HttpResponse::Created().json(TodoItemResponse { item }))
}

/// Api handler for getting all todos of the caller
pub async fn get_todos(
    token: BearerToken,
    logic: web::Data<dyn TodoLogic>,
    logger: web::Data<dyn LogSink>,
) -> Result<HttpResponse, TodoApiError> {
    let items = web::block(move || logic.get_todos(&token)).await??;

    logger.info("Get Todos", &format!("Fetched {} todo items", items.len()));

    Ok(HttpResponse::Ok().json(TodoListResponse { items }))
}

/// Update a todo with whatever fields the body carries
pub async fn update_todo(
    todo_id: web::Path<String>,
    token: BearerToken,
    body: web::Bytes,
    logic: web::Data<dyn TodoLogic>,
    logger: web::Data<dyn LogSink>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = todo_id.into_inner();
    // Parsed before anything is delegated, a bad body never reaches the store
    let updated: UpdateTodoRequest = serde_json::from_slice(&body)?;

    let id = todo_id.clone();
    web::block(move || logic.update_todo(&token, &id, updated)).await??;

    logger.info("Update Todo", &format!("Update Todo Item {}", todo_id));

    Ok(text_response(UPDATED_BODY))
}

/// Api to Delete a TODO
pub async fn delete_todo(
    todo_id: web::Path<String>,
    token: BearerToken,
    logic: web::Data<dyn TodoLogic>,
    logger: web::Data<dyn LogSink>,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = todo_id.into_inner();

    let id = todo_id.clone();
    web::block(move || logic.delete_todo(&token, &id)).await??;

    logger.info(
        "Delete Todo",
        &format!("Successfully delete todo item {}", todo_id),
    );

    Ok(text_response(DELETED_BODY))
}

/// Fallback for anything the router does not know
pub async fn not_found() -> Result<HttpResponse, TodoApiError> {
    Err(TodoApiError::NotFound(String::from("Route")))
}

fn text_response(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}
