mod recipient;
mod reminder_queue;
mod shared;

pub use recipient::{IRecipientRepo, InMemoryRecipientRepo, PostgresRecipientRepo};
pub use reminder_queue::{
    IReminderQueueRepo, InMemoryReminderQueueRepo, PostgresReminderQueueRepo,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderQueueRepo>,
    pub recipients: Arc<dyn IRecipientRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            reminders: Arc::new(PostgresReminderQueueRepo::new(pool.clone())),
            recipients: Arc::new(PostgresRecipientRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderQueueRepo::new()),
            recipients: Arc::new(InMemoryRecipientRepo::new()),
        }
    }
}
