//! Decimal addition.

use super::{ascii, reserve, value};
use crate::calculator::FibError;
use crate::capacity::Capacity;
use crate::digits::Digits;
use crate::reverse::reverse_in_place;

/// Add two non-negative decimal values.
///
/// Digits are summed least significant first with a running carry; a
/// final carry becomes the new most significant digit. The sum is built
/// least significant first and reversed once at the end.
///
/// # Example
/// ```
/// use fibdrv_core::arith::add;
/// use fibdrv_core::capacity::Capacity;
/// use fibdrv_core::digits::Digits;
///
/// let a: Digits = "999".parse().unwrap();
/// let sum = add(&a, &Digits::one(), Capacity::default()).unwrap();
/// assert_eq!(sum.to_string(), "1000");
/// ```
pub fn add(lhs: &Digits, rhs: &Digits, capacity: Capacity) -> Result<Digits, FibError> {
    let (a, b) = (lhs.as_bytes(), rhs.as_bytes());
    let width = a.len().max(b.len());
    capacity.check(width)?;

    let mut out = reserve(width + 1)?;
    let mut lhs_digits = a.iter().rev().map(|&d| value(d));
    let mut rhs_digits = b.iter().rev().map(|&d| value(d));
    let mut carry = 0u8;
    for _ in 0..width {
        let sum = lhs_digits.next().unwrap_or(0) + rhs_digits.next().unwrap_or(0) + carry;
        out.push(ascii(sum % 10));
        carry = sum / 10;
    }
    if carry != 0 {
        out.push(ascii(carry));
    }

    capacity.check(out.len())?;
    reverse_in_place(&mut out);
    Ok(Digits::from_normalized(out))
}
