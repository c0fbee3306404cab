mod inmemory;
mod resend;

pub use inmemory::InMemoryEmailSender;
pub use resend::ResendEmailSender;
use thiserror::Error;

/// A rendered email ready to be handed to the email endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Unable to reach the email endpoint: {0}")]
    Network(String),
    #[error("Email endpoint rejected the email with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Email endpoint returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Delivers a single email. Implementations make exactly one attempt per call.
#[async_trait::async_trait]
pub trait IEmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}
