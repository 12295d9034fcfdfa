//! Busy flag guarding the export entry point against re-entrant requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared busy flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ExportGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of one export; dropping it clears the flag, on success or failure.
#[derive(Debug)]
pub struct ExportTicket {
    busy: Arc<AtomicBool>,
}

impl ExportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Sets the flag and returns a ticket, or `None` if an export is already running.
    pub fn try_begin(&self) -> Option<ExportTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportTicket {
                busy: Arc::clone(&self.busy),
            })
    }
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
