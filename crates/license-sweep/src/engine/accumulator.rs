//! Thread-safe result tallies
//!
//! Region and handler tasks only ever add to the counters. The orchestrator
//! reads them once, through [`ResultAccumulator::finish`], after every task
//! has been joined.

use license_sweep_common::SweepResult;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

#[derive(Debug, Default)]
struct Tallies {
    items_found: u64,
    changes: u64,
    message: Option<String>,
}

/// Counters for examined and changed resources plus the completion message
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    tallies: Mutex<Tallies>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tallies> {
        self.tallies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count resources found by a region search
    pub fn add_items_found(&self, n: usize) {
        self.lock().items_found += n as u64;
    }

    /// Count resources whose license was changed
    pub fn add_changes(&self, n: usize) {
        self.lock().changes += n as u64;
    }

    /// Set the completion message and take the final snapshot.
    ///
    /// The message is assigned once; a second call keeps the first message.
    pub fn finish(&self, message: &str) -> SweepResult {
        let mut tallies = self.lock();
        match &tallies.message {
            Some(existing) => {
                warn!(existing = %existing, ignored = %message, "Result message already set");
            }
            None => tallies.message = Some(message.to_string()),
        }

        debug_assert!(
            tallies.changes <= tallies.items_found,
            "more changes ({}) than items found ({})",
            tallies.changes,
            tallies.items_found
        );

        SweepResult {
            message: tallies.message.clone(),
            error: None,
            items_found: tallies.items_found,
            license_changes: tallies.changes,
        }
    }
}
