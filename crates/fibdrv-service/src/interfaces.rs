//! Service interfaces.

use std::time::Duration;

use fibdrv_core::calculator::FibError;
use fibdrv_core::digits::Digits;

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a single computed value.
    fn present_result(&self, index: u64, value: &Digits, duration: Duration, details: bool);

    /// Present a summary of a batch.
    fn present_summary(&self, results: &[CalculationResult]);

    /// Present an error.
    fn present_error(&self, index: u64, error: &FibError);
}

/// Result of computing a single index.
#[derive(Debug, Clone)]
pub struct CalculationResult {
    /// Fibonacci index.
    pub index: u64,
    /// Algorithm name.
    pub algorithm: String,
    /// The computed value or a structured error.
    pub outcome: Result<Digits, FibError>,
    /// Computation duration.
    pub duration: Duration,
}

impl CalculationResult {
    /// The computed value, if the calculation succeeded.
    #[must_use]
    pub fn value(&self) -> Option<&Digits> {
        self.outcome.as_ref().ok()
    }
}
