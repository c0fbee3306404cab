use super::{EmailError, IEmailSender, OutgoingEmail};
use std::sync::Mutex;

/// Keeps every accepted email in memory. Can be told to reject
/// emails for certain recipients.
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing_recipients: Mutex<Vec<String>>,
    attempts: Mutex<usize>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
        }
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// All calls to `send`, accepted or not
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Default for InMemoryEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailSender for InMemoryEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        *self.attempts.lock().unwrap() += 1;
        if self.failing_recipients.lock().unwrap().contains(&email.to) {
            return Err(EmailError::Rejected {
                status: 503,
                body: format!("Delivery to {} is failing", email.to),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
