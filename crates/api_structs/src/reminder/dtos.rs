use playhub_domain::DispatchSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummaryDTO {
    /// Entries found in the delivery window
    pub due: usize,
    pub sent: usize,
    /// Entries whose owner has no email address
    pub skipped: usize,
    pub failed: usize,
    /// Entries that were emailed but could not be marked as sent
    pub unmarked: usize,
}

impl DispatchSummaryDTO {
    pub fn new(summary: DispatchSummary) -> Self {
        Self {
            due: summary.due,
            sent: summary.sent,
            skipped: summary.skipped,
            failed: summary.failed,
            unmarked: summary.unmarked,
        }
    }
}
