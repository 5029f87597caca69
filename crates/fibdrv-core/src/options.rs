//! Calculation options and configuration.

use crate::capacity::Capacity;
use crate::constants::{DEFAULT_MAX_DIGITS, DEFAULT_MAX_OFFSET};

/// Options for Fibonacci calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum digits any intermediate or final value may occupy.
    pub max_digits: usize,
    /// Largest index a device session may seek to.
    pub max_offset: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_digits: DEFAULT_MAX_DIGITS,
            max_offset: DEFAULT_MAX_OFFSET,
        }
    }
}

impl Options {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.max_digits == 0 {
            self.max_digits = DEFAULT_MAX_DIGITS;
        }
        if self.max_offset == 0 {
            self.max_offset = DEFAULT_MAX_OFFSET;
        }
        self
    }

    /// The digit capacity these options describe.
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        Capacity::new(self.max_digits)
    }
}
