use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use diesel::r2d2::ConnectionManager;

#[macro_use]
extern crate diesel;

mod api;
mod config;
mod errors;
mod models;
mod schema;
mod todo_logic;

use api::logging::{EnvLogSink, LogSink};
use config::Config;
use errors::StartupError;
use models::{memory_store::MemoryTodoStore, pg_store::PgTodoStore, Pool};
use todo_logic::{TodoLogic, TodoService};

/// Pick the store the business layer runs on
fn build_logic(config: &Config) -> Result<Arc<dyn TodoLogic>, StartupError> {
    match &config.database_url {
        Some(database_url) => {
            let manager = ConnectionManager::<diesel::PgConnection>::new(database_url);
            let pool: Pool = Pool::builder().build(manager)?;

            Ok(Arc::new(TodoService::new(PgTodoStore::new(pool))))
        }
        None => {
            log::warn!("DATABASE_URL not set, todo items are kept in memory");

            Ok(Arc::new(TodoService::new(MemoryTodoStore::new())))
        }
    }
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("todo_api=info,actix_web=info"),
    )
    .init();

    let config = Config::parse();
    let policy = config.cors_policy()?;

    let logic = web::Data::from(build_logic(&config)?);
    let sink: Arc<dyn LogSink> = Arc::new(EnvLogSink);

    api::api::start_server(config, policy, logic, web::Data::from(sink)).await?;

    Ok(())
}
