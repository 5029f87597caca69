//! Lazy Fibonacci iterator using the additive recurrence.
//!
//! One addition per index and no capacity bound: this is the reference the
//! fast doubling engine is checked against, not a production path.

use crate::arith::add;
use crate::capacity::Capacity;
use crate::digits::Digits;

/// Lazy iterator over the Fibonacci sequence in decimal.
///
/// Yields `(index, F(index))` pairs starting from F(0). Iteration ends early
/// only if a working buffer cannot be allocated.
///
/// # Example
/// ```
/// use fibdrv_core::iterator::DecimalFibIterator;
/// let fibs: Vec<_> = DecimalFibIterator::new().take(7).map(|(_, v)| v.to_string()).collect();
/// assert_eq!(fibs, ["0", "1", "1", "2", "3", "5", "8"]);
/// ```
pub struct DecimalFibIterator {
    a: Digits,
    b: Digits,
    index: u64,
}

impl DecimalFibIterator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: Digits::zero(),
            b: Digits::one(),
            index: 0,
        }
    }

    /// Start iteration at index `n` by stepping through the recurrence.
    #[must_use]
    pub fn from_index(n: u64) -> Self {
        let mut iter = Self::new();
        for _ in 0..n {
            if iter.next().is_none() {
                break;
            }
        }
        iter
    }
}

impl Default for DecimalFibIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for DecimalFibIterator {
    type Item = (u64, Digits);

    fn next(&mut self) -> Option<Self::Item> {
        let next = add(&self.a, &self.b, Capacity::UNBOUNDED).ok()?;
        let value = std::mem::replace(&mut self.a, std::mem::replace(&mut self.b, next));
        let idx = self.index;
        self.index += 1;
        Some((idx, value))
    }
}
