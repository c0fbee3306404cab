use crate::shared::entity::ID;

/// The contact details of a user as far as reminders are concerned.
/// Owned by the user profiles of the hub and only read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub user_id: ID,
    pub email: Option<String>,
}

impl Recipient {
    pub fn new(user_id: ID, email: Option<String>) -> Self {
        Self { user_id, email }
    }

    /// The address to deliver to, blank addresses count as missing
    pub fn address(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}
