mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    IRecipientRepo, IReminderQueueRepo, InMemoryRecipientRepo, InMemoryReminderQueueRepo, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

/// Everything a dispatcher run needs. Built once at startup and passed by
/// reference into every usecase.
#[derive(Clone)]
pub struct HubContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl HubContext {
    async fn create(params: ContextParams) -> Self {
        let pool = connect(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        Self {
            repos: Repos::create_postgres(pool.clone()),
            services: Services::create(pool, &config),
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context backed by inmemory repositories and services, used for testing
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            services: Services::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> HubContext {
    HubContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

async fn connect(connection_string: &str) -> Result<PgPool, sqlx::Error> {
    info!("DB CHECKING CONNECTION ...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(connection_string)
        .await?;
    info!("DB CHECKING CONNECTION ... [done]");
    Ok(pool)
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
