//! Synchronization primitives shared between the front-end thread and the search worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperatively-checked stop flag. The front-end sets it; the worker polls it at
/// `consts::NODE_POLL_INTERVAL`-node intervals. Once set it is never cleared by the
/// worker -- only a fresh `StopSignal` is handed out for the next search.
#[derive(Clone)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    /// Creates a new, unset signal.
    pub fn new() -> Self {
        StopSignal {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests a stop. Visible to all clones.
    #[inline]
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns whether a stop has been requested.
    #[inline]
    pub fn stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        StopSignal::new()
    }
}
