pub mod api;
pub(crate) mod auth_utils;
pub mod dtos;
pub(crate) mod errors;
pub mod logging;
pub mod middlewares;
mod todos_handler;
