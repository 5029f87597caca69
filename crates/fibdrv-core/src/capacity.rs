//! Digit capacity and capacity planning.
//!
//! Every value produced by the arithmetic primitives is checked against a
//! [`Capacity`]. The planning helpers turn a capacity into the index ceiling
//! it implies, so callers can reject impossible requests before computing.

use crate::calculator::FibError;
use crate::constants::{DEFAULT_MAX_DIGITS, LOG10_PHI, LOG10_SQRT5};

/// Maximum number of decimal digits a value may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(usize);

impl Capacity {
    /// A capacity that never rejects a value.
    pub const UNBOUNDED: Self = Self(usize::MAX);

    /// Create a capacity of `max_digits` digits.
    #[must_use]
    pub const fn new(max_digits: usize) -> Self {
        Self(max_digits)
    }

    /// The maximum digit count.
    #[must_use]
    pub const fn max_digits(self) -> usize {
        self.0
    }

    /// Fail with `CapacityExceeded` when `digits` does not fit.
    ///
    /// # Example
    /// ```
    /// use fibdrv_core::capacity::Capacity;
    ///
    /// let cap = Capacity::new(3);
    /// assert!(cap.check(3).is_ok());
    /// assert!(cap.check(4).is_err());
    /// ```
    pub fn check(self, digits: usize) -> Result<(), FibError> {
        if digits > self.0 {
            return Err(FibError::CapacityExceeded {
                digits,
                capacity: self.0,
            });
        }
        Ok(())
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(DEFAULT_MAX_DIGITS)
    }
}

/// Estimate the number of decimal digits of F(k) from Binet's formula.
///
/// Exact for every index whose result fits in memory; F(0) counts as one digit.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn estimate_digits(k: u64) -> usize {
    if k < 2 {
        return 1;
    }
    let log = (k as f64) * LOG10_PHI - LOG10_SQRT5;
    (log.floor().max(0.0) as usize).saturating_add(1)
}

/// Largest index `k` such that computing F(k) stays within `capacity`.
///
/// The fast doubling engine materialises F(k+1) on its last step, so the
/// ceiling is the largest `k` whose successor still fits. Returns `None`
/// when not even a single digit fits.
///
/// # Example
/// ```
/// use fibdrv_core::capacity::{max_index, Capacity};
///
/// assert_eq!(max_index(Capacity::new(2)), Some(10));
/// assert_eq!(max_index(Capacity::new(0)), None);
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn max_index(capacity: Capacity) -> Option<u64> {
    let digits = capacity.max_digits();
    if digits == 0 {
        return None;
    }

    let approx = (digits as f64 + LOG10_SQRT5) / LOG10_PHI;
    if approx >= u64::MAX as f64 {
        return Some(u64::MAX);
    }

    let fits = |k: u64| estimate_digits(k.saturating_add(1)) <= digits;
    let mut k = approx as u64;
    while k > 0 && !fits(k) {
        k -= 1;
    }
    while k < u64::MAX && fits(k + 1) {
        k += 1;
    }
    Some(k)
}
