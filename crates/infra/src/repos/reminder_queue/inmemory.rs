use super::IReminderQueueRepo;
use crate::repos::shared::inmemory_repo::*;
use playhub_domain::{DeliveryWindow, ReminderEntry, ID};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub struct InMemoryReminderQueueRepo {
    entries: Mutex<Vec<ReminderEntry>>,
    reads_fail: AtomicBool,
    writes_fail: AtomicBool,
    stale_reads: AtomicBool,
}

impl InMemoryReminderQueueRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            reads_fail: AtomicBool::new(false),
            writes_fail: AtomicBool::new(false),
            stale_reads: AtomicBool::new(false),
        }
    }

    /// Simulates a store outage for `find_due`
    pub fn set_reads_fail(&self, fail: bool) {
        self.reads_fail.store(fail, Ordering::SeqCst);
    }

    /// Simulates failing `mark_sent` writes
    pub fn set_writes_fail(&self, fail: bool) {
        self.writes_fail.store(fail, Ordering::SeqCst);
    }

    /// Makes `find_due` ignore `sent_at`, like a read that raced the write of an
    /// overlapping run
    pub fn set_stale_reads(&self, stale: bool) {
        self.stale_reads.store(stale, Ordering::SeqCst);
    }
}

impl Default for InMemoryReminderQueueRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderQueueRepo for InMemoryReminderQueueRepo {
    async fn insert(&self, entry: &ReminderEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find(&self, entry_id: &ID) -> Option<ReminderEntry> {
        find(entry_id, &self.entries)
    }

    async fn find_due(&self, window: &DeliveryWindow) -> anyhow::Result<Vec<ReminderEntry>> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("notification queue is unavailable"));
        }
        let stale_reads = self.stale_reads.load(Ordering::SeqCst);
        let mut due = find_by(&self.entries, |e| {
            (stale_reads || !e.is_sent()) && window.contains(e.scheduled_for)
        });
        due.sort_by_key(|e| e.scheduled_for);
        Ok(due)
    }

    async fn mark_sent(&self, entry_id: &ID, sent_at: i64) -> anyhow::Result<bool> {
        if self.writes_fail.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("notification queue rejected the write"));
        }
        Ok(update_one(entry_id, &self.entries, |e| e.mark_sent(sent_at)).unwrap_or(false))
    }
}
