//! Optional cap on in-flight sweep tasks

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits how many region or handler tasks run at once.
///
/// Tasks are always spawned; each one waits for a permit before doing any
/// I/O, so the phase barriers stay unchanged whether or not a cap is set.
#[derive(Debug, Clone, Default)]
pub struct TaskGate {
    permits: Option<Arc<Semaphore>>,
}

impl TaskGate {
    /// A gate admitting `max` tasks at a time; `0` means no cap
    pub fn new(max: usize) -> Self {
        if max == 0 {
            return Self::unbounded();
        }
        Self {
            permits: Some(Arc::new(Semaphore::new(max))),
        }
    }

    pub fn unbounded() -> Self {
        Self { permits: None }
    }

    pub fn is_bounded(&self) -> bool {
        self.permits.is_some()
    }

    /// Wait for a slot. The slot is released when the returned permit drops.
    pub async fn enter(&self) -> Option<OwnedSemaphorePermit> {
        let permits = self.permits.as_ref()?;
        // Never closed, so this only fails if the runtime is shutting down
        Arc::clone(permits).acquire_owned().await.ok()
    }
}
