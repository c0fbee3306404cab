use super::IRecipientRepo;
use crate::repos::shared::inmemory_repo::*;
use playhub_domain::{Recipient, ID};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub struct InMemoryRecipientRepo {
    recipients: Mutex<Vec<Recipient>>,
    reads_fail: AtomicBool,
}

impl InMemoryRecipientRepo {
    pub fn new() -> Self {
        Self {
            recipients: Mutex::new(Vec::new()),
            reads_fail: AtomicBool::new(false),
        }
    }

    pub fn add(&self, recipient: Recipient) {
        insert(&recipient, &self.recipients);
    }

    /// Simulates an unreachable user profile store
    pub fn set_reads_fail(&self, fail: bool) {
        self.reads_fail.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryRecipientRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IRecipientRepo for InMemoryRecipientRepo {
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Recipient>> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("user profiles are unavailable"));
        }
        Ok(find_by(&self.recipients, |r| user_ids.contains(&r.user_id)))
    }
}
