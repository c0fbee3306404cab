use super::IAggregationTrigger;
use sqlx::PgPool;
use tracing::error;

/// Calls the `collect_incomplete_playlists` procedure of the hub schema
pub struct PostgresAggregationTrigger {
    pool: PgPool,
}

impl PostgresAggregationTrigger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IAggregationTrigger for PostgresAggregationTrigger {
    async fn trigger(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT collect_incomplete_playlists()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Unable to collect incomplete playlists. DB returned error: {:?}",
                    e
                );
                e
            })?;
        Ok(())
    }
}
