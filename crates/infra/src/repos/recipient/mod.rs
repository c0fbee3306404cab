mod inmemory;
mod postgres;

pub use inmemory::InMemoryRecipientRepo;
use playhub_domain::{Recipient, ID};
pub use postgres::PostgresRecipientRepo;

/// Read only access to the contact details in the user profiles
#[async_trait::async_trait]
pub trait IRecipientRepo: Send + Sync {
    /// Users without a profile are left out of the result
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Recipient>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_requested_recipients() {
        let repo = InMemoryRecipientRepo::new();
        let with_email = Recipient::new(Default::default(), Some("a@example.com".into()));
        let without_email = Recipient::new(Default::default(), None);
        let other = Recipient::new(Default::default(), Some("b@example.com".into()));
        repo.add(with_email.clone());
        repo.add(without_email.clone());
        repo.add(other);

        let unknown = ID::default();
        let mut res = repo
            .find_many(&[with_email.user_id, without_email.user_id, unknown])
            .await
            .unwrap();
        res.sort_by_key(|r| r.email.is_none());
        assert_eq!(res, vec![with_email, without_email]);
    }
}
