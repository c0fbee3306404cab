/// Where a single due entry ended up after a dispatcher run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The owner has no email address. The entry stays due.
    Skipped,
    /// Email accepted and `sent_at` written
    Sent,
    /// Email accepted but writing `sent_at` failed. The entry may be sent again.
    SentUnmarked,
    /// The email endpoint rejected the email or could not be reached. The entry stays due.
    SendFailed,
}

/// Per run counts of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    pub due: usize,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
    pub unmarked: usize,
}

impl DispatchSummary {
    pub fn record(&mut self, outcome: DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::Skipped => self.skipped += 1,
            DeliveryOutcome::Sent => self.sent += 1,
            DeliveryOutcome::SentUnmarked => self.unmarked += 1,
            DeliveryOutcome::SendFailed => self.failed += 1,
        }
    }

    /// Number of emails the endpoint accepted during the run
    pub fn delivered(&self) -> usize {
        self.sent + self.unmarked
    }
}
