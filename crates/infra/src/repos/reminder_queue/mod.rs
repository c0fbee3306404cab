mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderQueueRepo;
use playhub_domain::{DeliveryWindow, ReminderEntry, ID};
pub use postgres::PostgresReminderQueueRepo;

/// The durable notification queue
///
/// Entries are enqueued by the hub and its aggregation procedure, the dispatcher
/// itself only calls `find_due` and `mark_sent`.
#[async_trait::async_trait]
pub trait IReminderQueueRepo: Send + Sync {
    /// Enqueues an entry. Used to seed the queue in tests and tooling.
    async fn insert(&self, entry: &ReminderEntry) -> anyhow::Result<()>;
    /// Used to inspect the queue in tests and tooling
    async fn find(&self, entry_id: &ID) -> Option<ReminderEntry>;
    /// Unsent entries with `scheduled_for` inside the window, oldest first
    async fn find_due(&self, window: &DeliveryWindow) -> anyhow::Result<Vec<ReminderEntry>>;
    /// Sets `sent_at` if it is not set yet. Returns `false` if the entry
    /// was already sent or does not exist.
    async fn mark_sent(&self, entry_id: &ID, sent_at: i64) -> anyhow::Result<bool>;
}
