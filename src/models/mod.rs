pub mod memory_store;
pub mod pg_store;
pub mod todo_model;

use diesel::{r2d2::ConnectionManager, PgConnection};

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;
