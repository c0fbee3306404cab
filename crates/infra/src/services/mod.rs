mod aggregation;
mod email;

pub use aggregation::{IAggregationTrigger, InMemoryAggregationTrigger, PostgresAggregationTrigger};
pub use email::{EmailError, IEmailSender, InMemoryEmailSender, OutgoingEmail, ResendEmailSender};
use crate::Config;
use sqlx::PgPool;
use std::sync::Arc;

/// The external collaborators, other than the store, a dispatcher run talks to
#[derive(Clone)]
pub struct Services {
    pub email: Arc<dyn IEmailSender>,
    pub aggregation: Arc<dyn IAggregationTrigger>,
}

impl Services {
    pub fn create(pool: PgPool, config: &Config) -> Self {
        Self {
            email: Arc::new(ResendEmailSender::new(config)),
            aggregation: Arc::new(PostgresAggregationTrigger::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            email: Arc::new(InMemoryEmailSender::new()),
            aggregation: Arc::new(InMemoryAggregationTrigger::new()),
        }
    }
}
