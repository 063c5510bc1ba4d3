use serde::{Deserialize, Serialize};

/// Outcome counters across all processed query targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another tally into this one by pairwise addition.
    pub fn add(&mut self, other: Tally) {
        self.skipped += other.skipped;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }

    pub fn total(&self) -> usize {
        self.skipped + self.succeeded + self.failed
    }
}
