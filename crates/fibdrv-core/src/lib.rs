//! # fibdrv-core
//!
//! Exact Fibonacci numbers as decimal text. Provides a digit-string bignum,
//! the schoolbook primitives on it, and the fast doubling engine that drives
//! them under an explicit digit capacity.

pub mod arith;
pub mod calculator;
pub mod capacity;
pub mod constants;
pub mod digits;
pub mod fastdoubling;
pub mod iterator;
pub mod observer;
pub mod observers;
pub mod options;
pub mod progress;
pub mod reverse;

// Re-exports
pub use calculator::{Calculator, CoreCalculator, FibCalculator, FibError};
pub use capacity::Capacity;
pub use constants::{exit_codes, DEFAULT_MAX_DIGITS, DEFAULT_MAX_OFFSET};
pub use digits::Digits;
pub use fastdoubling::FastDoublingEngine;
pub use observer::ProgressObserver;
pub use options::Options;
pub use progress::{CancellationToken, ProgressUpdate};

/// Compute F(k) with the default 128-digit capacity.
///
/// For a different capacity, progress or cancellation use
/// [`FastDoublingEngine`] or the [`Calculator`] trait directly.
///
/// # Example
/// ```
/// assert_eq!(fibdrv_core::fibonacci(10).unwrap().to_string(), "55");
/// assert!(fibdrv_core::fibonacci(10_000).is_err());
/// ```
pub fn fibonacci(k: u64) -> Result<Digits, FibError> {
    FastDoublingEngine::default().compute(k)
}
