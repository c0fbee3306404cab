use super::IAggregationTrigger;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct InMemoryAggregationTrigger {
    calls: AtomicUsize,
    fails: AtomicBool,
}

impl InMemoryAggregationTrigger {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fails: AtomicBool::new(false),
        }
    }

    pub fn set_fails(&self, fail: bool) {
        self.fails.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryAggregationTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IAggregationTrigger for InMemoryAggregationTrigger {
    async fn trigger(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fails.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("collect_incomplete_playlists is unavailable"));
        }
        Ok(())
    }
}
