use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Generator for identifiers missing from builder input
///
/// Ids are `<prefix>_<counter>_<suffix>`: the counter is monotonic for the
/// allocator's lifetime and the suffix is random, so ids never collide
/// within a call and are unlikely to collide across processes.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counter: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let random = Uuid::new_v4().simple().to_string();
        format!("{}_{}_{}", prefix, n, &random[..8])
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
