//! Decimal schoolbook multiplication.

use super::{ascii, reserve, value};
use crate::calculator::FibError;
use crate::capacity::Capacity;
use crate::digits::Digits;

/// Multiply two non-negative decimal values.
///
/// Uses a grid of `len1 + len2` positional slots, slot 0 most significant.
/// Each row `i` of `lhs` accumulates into slots `i + j + 1` and leaves its
/// final carry in slot `i`, the slot just above the last one it touched.
///
/// # Example
/// ```
/// use fibdrv_core::arith::mul;
/// use fibdrv_core::capacity::Capacity;
/// use fibdrv_core::digits::Digits;
///
/// let a: Digits = "12345".parse().unwrap();
/// let b: Digits = "6789".parse().unwrap();
/// assert_eq!(mul(&a, &b, Capacity::default()).unwrap().to_string(), "83810205");
/// ```
pub fn mul(lhs: &Digits, rhs: &Digits, capacity: Capacity) -> Result<Digits, FibError> {
    if lhs.is_zero() || rhs.is_zero() {
        capacity.check(1)?;
        return Ok(Digits::zero());
    }

    let (a, b) = (lhs.as_bytes(), rhs.as_bytes());
    let slots_len = a.len() + b.len();
    // A product of non-zero values has at least len1 + len2 - 1 digits.
    capacity.check(slots_len - 1)?;

    let mut slots = reserve(slots_len)?;
    slots.resize(slots_len, 0);

    for (i, &x) in a.iter().enumerate().rev() {
        let x = value(x);
        let mut carry = 0u8;
        for (j, &y) in b.iter().enumerate().rev() {
            let sum = x * value(y) + slots[i + j + 1] + carry;
            slots[i + j + 1] = sum % 10;
            carry = sum / 10;
        }
        slots[i] += carry;
    }

    let start = slots
        .iter()
        .position(|&s| s != 0)
        .unwrap_or(slots_len - 1);
    slots.drain(..start);
    capacity.check(slots.len())?;

    for slot in &mut slots {
        *slot = ascii(*slot);
    }
    Ok(Digits::from_normalized(slots))
}
