use crate::dtos::DispatchSummaryDTO;
use playhub_domain::DispatchSummary;
use serde::{Deserialize, Serialize};

pub mod dispatch_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub summary: DispatchSummaryDTO,
    }

    impl APIResponse {
        pub fn new(summary: DispatchSummary) -> Self {
            Self {
                message: "ok".into(),
                summary: DispatchSummaryDTO::new(summary),
            }
        }
    }
}
