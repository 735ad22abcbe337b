use clap::Parser;

use crate::api::middlewares::cors::CorsPolicy;
use crate::errors::StartupError;

/// Server settings, read from flags or the environment (a `.env` file is
/// loaded first when present).
#[derive(Debug, Clone, Parser)]
#[clap(author, version, about, long_about = "Serve the todo CRUD handlers")]
pub struct Config {
    /// Address to listen on
    #[clap(long, env = "API_URL", default_value = "localhost:9000")]
    pub bind: String,

    /// Postgres connection string; items are kept in memory when absent
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Value of `Access-Control-Allow-Origin`; `*` echoes the caller's `Origin`
    #[clap(long, env = "CORS_ORIGIN", default_value = "*")]
    pub cors_origin: String,

    /// Num of worker threads
    #[clap(long, env = "WORKERS", default_value_t = 1)]
    pub workers: usize,
}

impl Config {
    /// Credentials are always allowed; an origin that cannot be sent as a
    /// header value stops startup.
    pub fn cors_policy(&self) -> Result<CorsPolicy, StartupError> {
        CorsPolicy::new(&self.cors_origin, true)
            .map_err(|_| StartupError::InvalidCorsOrigin(self.cors_origin.clone()))
    }
}
