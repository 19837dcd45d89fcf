use std::time::{Duration, Instant};

use crate::id::Id;

#[derive(Debug)]
pub(super) struct Job<J> {
    pub(super) id: Id,
    pub(super) payload: J,
    pub(super) run_at: Instant,
    /// Insertion sequence, keeps jobs with equal deadlines in FIFO order.
    pub(super) seq: u64,
}

impl<J> Job<J> {
    pub(super) fn new(id: Id, timeout: Duration, now: Instant, seq: u64, payload: J) -> Self {
        Self { id, payload, run_at: now + timeout, seq }
    }
}

impl<J> PartialEq for Job<J> {
    fn eq(&self, other: &Self) -> bool {
        self.run_at == other.run_at && self.seq == other.seq
    }
}
impl<J> Eq for Job<J> {}

impl<J> PartialOrd for Job<J> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<J> Ord for Job<J> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.run_at.cmp(&other.run_at).then(self.seq.cmp(&other.seq))
    }
}
