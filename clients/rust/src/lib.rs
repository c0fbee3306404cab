mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use playhub_api_structs::dtos::*;
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;

/// Playhub reminder dispatcher SDK
///
/// Typed access to the trigger and health endpoints of the dispatcher.
#[derive(Clone)]
pub struct PlayhubSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl PlayhubSDK {
    pub fn new<T: Into<String>>(address: String, trigger_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_trigger_key(trigger_key.into());
        let base = Arc::new(base);

        Self {
            reminder: ReminderClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
