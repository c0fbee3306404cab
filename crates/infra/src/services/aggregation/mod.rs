mod inmemory;
mod postgres;

pub use inmemory::InMemoryAggregationTrigger;
pub use postgres::PostgresAggregationTrigger;

/// Recomputes which playlists a user has left unfinished. The store may
/// enqueue new reminder entries as a result, which is opaque to the caller.
#[async_trait::async_trait]
pub trait IAggregationTrigger: Send + Sync {
    async fn trigger(&self) -> anyhow::Result<()>;
}
