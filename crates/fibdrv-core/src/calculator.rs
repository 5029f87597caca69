//! Calculator traits and the `FibCalculator` decorator.
//!
//! `Calculator` is the public trait consumed by the service layer.
//! `CoreCalculator` is the internal trait implemented by algorithms.
//! `FibCalculator` is a decorator that adds the capacity pre-check,
//! the initial cancellation checkpoint and completion reporting.

use std::sync::Arc;

use tracing::debug;

use crate::capacity::estimate_digits;
use crate::digits::Digits;
use crate::observer::ProgressObserver;
use crate::options::Options;
use crate::progress::{CancellationToken, ProgressUpdate};

/// Error type for decimal arithmetic and Fibonacci calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// A working buffer could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// A decimal string contained a non-digit byte.
    #[error("invalid digit {byte:#04x} at position {position}")]
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Zero-based position of the byte in the input.
        position: usize,
    },

    /// A decimal string was empty.
    #[error("empty decimal string")]
    Empty,

    /// Subtraction with a minuend smaller than the subtrahend.
    #[error("subtraction underflow: minuend is smaller than subtrahend")]
    Underflow,

    /// A value needs more digits than the configured capacity allows.
    #[error("capacity exceeded: {digits} digits needed, capacity is {capacity}")]
    CapacityExceeded {
        /// Digits the value needs (a lower bound when rejected up front).
        digits: usize,
        /// Configured maximum digit count.
        capacity: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Calculation was cancelled.
    #[error("calculation cancelled")]
    Cancelled,

    /// Calculation timed out.
    #[error("calculation timed out after {0}")]
    Timeout(String),

    /// A computed value disagrees with the reference implementation.
    #[error("result mismatch against reference at F({index})")]
    Mismatch {
        /// Fibonacci index whose value disagreed.
        index: u64,
    },
}

/// Public trait for Fibonacci calculators, consumed by the service layer.
pub trait Calculator: Send + Sync {
    /// Calculate F(n) with the given options.
    fn calculate(
        &self,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        n: u64,
        opts: &Options,
    ) -> Result<Digits, FibError>;

    /// Get the name of this calculator.
    fn name(&self) -> &str;
}

/// Internal trait for algorithm implementations.
/// Wrapped by `FibCalculator`.
pub trait CoreCalculator: Send + Sync {
    /// Perform the core calculation.
    fn calculate_core(
        &self,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        n: u64,
        opts: &Options,
    ) -> Result<Digits, FibError>;

    /// Get the name of this algorithm.
    fn name(&self) -> &'static str;
}

/// Decorator that wraps a `CoreCalculator` with the capacity pre-check
/// and progress reporting.
///
/// The token is checked before and after the core runs, so an expired
/// deadline always surfaces as `FibError::Timeout`.
pub struct FibCalculator {
    inner: Arc<dyn CoreCalculator>,
}

impl FibCalculator {
    /// Create a new `FibCalculator` wrapping the given core calculator.
    #[must_use]
    pub fn new(inner: Arc<dyn CoreCalculator>) -> Self {
        Self { inner }
    }

    /// Reject indices whose working set clearly cannot fit.
    ///
    /// The engine always materialises F(n+1); the estimate is allowed one
    /// digit of slack so floating-point rounding never rejects a valid index.
    fn precheck_capacity(n: u64, opts: &Options) -> Result<(), FibError> {
        let capacity = opts.capacity().max_digits();
        let needed = estimate_digits(n.saturating_add(1));
        if needed > capacity.saturating_add(1) {
            return Err(FibError::CapacityExceeded {
                digits: needed,
                capacity,
            });
        }
        Ok(())
    }
}

impl Calculator for FibCalculator {
    fn calculate(
        &self,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        n: u64,
        opts: &Options,
    ) -> Result<Digits, FibError> {
        cancel.check_cancelled()?;
        Self::precheck_capacity(n, opts)?;

        debug!(n, capacity = opts.max_digits, algorithm = self.inner.name(), "computing");
        let value = self
            .inner
            .calculate_core(cancel, observer, calc_index, n, opts)?;
        // A run that finished past its deadline still counts as timed out.
        cancel.check_cancelled()?;

        observer.on_progress(&ProgressUpdate::done(calc_index, self.inner.name()));
        Ok(value)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
