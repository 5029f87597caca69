//! Concrete observer implementations.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::constants::PROGRESS_REPORT_THRESHOLD;
use crate::observer::ProgressObserver;
use crate::progress::ProgressUpdate;

/// Observer that logs progress updates through `tracing`.
///
/// Intermediate updates are throttled to one per
/// [`PROGRESS_REPORT_THRESHOLD`] of progress, tracked separately for each
/// calculation index so parallel runs in a batch do not mask each other.
pub struct LoggingObserver {
    last_reported: Mutex<HashMap<usize, f64>>,
}

impl LoggingObserver {
    /// Create a new logging observer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_reported: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for LoggingObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        if update.done {
            self.last_reported.lock().remove(&update.calc_index);
            info!(
                calc = update.calc_index,
                algorithm = %update.algorithm,
                "Calculation complete"
            );
            return;
        }

        {
            let mut reported = self.last_reported.lock();
            let last = reported.entry(update.calc_index).or_insert(0.0);
            if (update.progress - *last).abs() < PROGRESS_REPORT_THRESHOLD {
                return;
            }
            *last = update.progress;
        }
        debug!(
            calc = update.calc_index,
            algorithm = %update.algorithm,
            progress = format!("{:.1}%", update.progress * 100.0),
            step = update.current_step,
            total = update.total_steps,
            "Progress update"
        );
    }
}

/// Null object pattern: does nothing with progress updates.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer that discards all progress updates.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}
