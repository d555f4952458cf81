//! Worker-to-coordinator messaging and shared search state.

use crate::search::result::Solution;
use crate::search::worker::WorkerExit;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Worker found a magic square.
    Found { worker_id: usize, solution: Solution },
    /// Worker stopped without a solution.
    Finished {
        worker_id: usize,
        exit: WorkerExit,
        /// Last cursor value the worker decoded, if any.
        position: Option<u64>,
    },
}

/// State shared by every worker of a search.
///
/// Only atomics: the attempt counter is a diagnostic and the stop flag is
/// advisory, so no locking is needed.
#[derive(Debug, Default)]
pub struct SharedState {
    attempts: AtomicU64,
    should_stop: AtomicBool,
}

impl SharedState {
    /// Count one attempt. Returns false, without counting, once `limit`
    /// attempts have been recorded.
    pub fn try_record_attempt(&self, limit: Option<u64>) -> bool {
        let Some(limit) = limit else {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            return true;
        };
        let mut current = self.attempts.load(Ordering::Relaxed);
        loop {
            if current >= limit {
                return false;
            }
            match self.attempts.compare_exchange_weak(
                current,
                current + 1,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(c) => current = c,
            }
        }
    }

    /// Total attempts recorded so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Check if we should stop searching.
    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Ordering::SeqCst)
    }

    /// Signal all workers to stop.
    pub fn signal_stop(&self) {
        self.should_stop.store(true, Ordering::SeqCst);
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    /// Shared counter and stop flag.
    pub shared: Arc<SharedState>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
    /// Shared state.
    pub shared: Arc<SharedState>,
}

/// Create channels for a search with the given number of workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    let shared = Arc::new(SharedState::default());

    // Unbounded so a finishing worker never blocks
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = (0..num_workers)
        .map(|_| WorkerChannels {
            to_coordinator: worker_tx.clone(),
            shared: Arc::clone(&shared),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        shared,
    };

    (coordinator, worker_channels)
}
