//! Decimal arithmetic on digit strings.
//!
//! Every primitive takes its operands by reference, leaves them untouched,
//! and checks the result against a [`Capacity`](crate::capacity::Capacity).
//! Working buffers are reserved fallibly so allocation failure surfaces as
//! [`FibError::Allocation`] instead of aborting.

mod add;
mod mul;
mod sub;

pub use add::add;
pub use mul::mul;
pub use sub::sub;

use crate::calculator::FibError;

/// Reserve an empty buffer able to hold `len` bytes.
fn reserve(len: usize) -> Result<Vec<u8>, FibError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| FibError::Allocation(e.to_string()))?;
    Ok(buf)
}

/// Numeric value of an ASCII digit.
#[inline]
fn value(digit: u8) -> u8 {
    digit - b'0'
}

/// ASCII digit for a value in `0..10`.
#[inline]
fn ascii(value: u8) -> u8 {
    b'0' + value
}
