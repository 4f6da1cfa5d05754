//! Bounded worker pool gating command execution.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

/// Fixed number of execution slots shared by every command.
///
/// Waiters are served in FIFO order by the underlying semaphore.
#[derive(Clone)]
pub struct WorkerPool {
    sem: Arc<Semaphore>,
    capacity: usize,
}

/// An occupied slot; released on drop.
pub struct Slot {
    _permit: OwnedSemaphorePermit,
}

impl WorkerPool {
    pub const DEFAULT_CAPACITY: usize = 2;

    /// `capacity` is raised to 1 when given as 0.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            sem: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait for a free slot.
    pub async fn acquire(&self) -> Slot {
        let permit = Arc::clone(&self.sem)
            .acquire_owned()
            .await
            .expect("worker pool semaphore is never closed");
        trace!(in_use = self.in_use(), capacity = self.capacity, "slot acquired");
        Slot { _permit: permit }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.capacity - self.sem.available_permits()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
