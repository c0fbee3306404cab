/// The inclusive range of `scheduled_for` timestamps (millis) that a dispatcher
/// run considers due.
///
/// Entries scheduled after `end` are not fetched yet and entries older than
/// `start` are never retried by later runs. The window length is therefore
/// the maximum delivery lateness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    pub start: i64,
    pub end: i64,
}

impl DeliveryWindow {
    pub const DEFAULT_SIZE_MILLIS: i64 = 1000 * 60 * 60;

    pub fn ending_at(now: i64, size_millis: i64) -> Self {
        Self {
            start: now - size_millis.max(0),
            end: now,
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}
