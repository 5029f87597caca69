//! Progress tracking and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::calculator::FibError;

/// Progress update sent from calculators to observers.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Calculation index (position in a batch).
    pub calc_index: usize,
    /// Name of the algorithm producing this update.
    pub algorithm: &'static str,
    /// Current progress as a fraction in [0.0, 1.0].
    pub progress: f64,
    /// Doubling steps completed.
    pub current_step: u64,
    /// Total number of doubling steps.
    pub total_steps: u64,
    /// Whether this is the final update.
    pub done: bool,
}

impl ProgressUpdate {
    /// Create a new progress update.
    #[must_use]
    pub fn new(
        calc_index: usize,
        algorithm: &'static str,
        progress: f64,
        current: u64,
        total: u64,
    ) -> Self {
        Self {
            calc_index,
            algorithm,
            progress,
            current_step: current,
            total_steps: total,
            done: false,
        }
    }

    /// Create a completion update.
    #[must_use]
    pub fn done(calc_index: usize, algorithm: &'static str) -> Self {
        Self {
            calc_index,
            algorithm,
            progress: 1.0,
            current_step: 0,
            total_steps: 0,
            done: true,
        }
    }
}

/// Cooperative cancellation token shared between clones.
///
/// A token may also carry a deadline, after which every checkpoint fails
/// with `FibError::Timeout`. Clones share the manual flag.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use fibdrv_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
/// token.cancel();
/// assert!(observer.is_cancelled());
/// assert!(observer.check_cancelled().is_err());
///
/// let expired = CancellationToken::new().with_timeout(Duration::ZERO);
/// assert!(expired.check_cancelled().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Deadline>,
}

#[derive(Clone, Copy, Debug)]
struct Deadline {
    at: Instant,
    timeout: Duration,
}

impl CancellationToken {
    /// Create a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A token sharing this one's flag that also expires `timeout` from now.
    ///
    /// An earlier deadline already on the token wins. A timeout too large
    /// to represent never expires.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let requested = Instant::now()
            .checked_add(timeout)
            .map(|at| Deadline { at, timeout });
        let deadline = match (self.deadline, requested) {
            (Some(current), Some(new)) if current.at <= new.at => Some(current),
            (current, None) => current,
            (_, new) => new,
        };
        Self {
            cancelled: Arc::clone(&self.cancelled),
            deadline,
        }
    }

    /// Check if cancellation has been requested or the deadline passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed) || self.is_expired()
    }

    /// Whether the deadline, if any, has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d.at)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checkpoint for algorithm loops.
    ///
    /// Manual cancellation is reported before expiry.
    pub fn check_cancelled(&self) -> Result<(), FibError> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(FibError::Cancelled);
        }
        match self.deadline {
            Some(d) if Instant::now() >= d.at => Err(FibError::Timeout(format!("{:?}", d.timeout))),
            _ => Ok(()),
        }
    }
}
