use crate::{APIResponse, BaseClient};
use playhub_api_structs::dispatch_reminders;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Runs the reminder dispatcher once
    pub async fn dispatch(&self) -> APIResponse<dispatch_reminders::APIResponse> {
        self.base
            .post("reminders/dispatch".into(), StatusCode::OK)
            .await
    }
}
