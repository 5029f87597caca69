//! Decimal subtraction.

use super::{ascii, reserve, value};
use crate::calculator::FibError;
use crate::capacity::Capacity;
use crate::digits::Digits;
use crate::reverse::reverse_in_place;

/// Subtract `rhs` from `lhs`.
///
/// Fails with [`FibError::Underflow`] when `lhs < rhs`; a negative result
/// is never produced.
///
/// The minuend is copied least significant first. A position that cannot
/// absorb its subtrahend digit borrows from the next non-zero position,
/// turning every `'0'` passed on the way into `'9'`. Zeros left at the
/// most significant end are stripped before the buffer is reversed back.
///
/// # Example
/// ```
/// use fibdrv_core::arith::sub;
/// use fibdrv_core::capacity::Capacity;
/// use fibdrv_core::digits::Digits;
///
/// let a: Digits = "1000".parse().unwrap();
/// let diff = sub(&a, &Digits::one(), Capacity::default()).unwrap();
/// assert_eq!(diff.to_string(), "999");
/// assert!(sub(&Digits::one(), &a, Capacity::default()).is_err());
/// ```
pub fn sub(lhs: &Digits, rhs: &Digits, capacity: Capacity) -> Result<Digits, FibError> {
    if lhs < rhs {
        return Err(FibError::Underflow);
    }

    let mut out = reserve(lhs.digit_count())?;
    out.extend(lhs.as_bytes().iter().rev());

    for (i, &digit) in rhs.as_bytes().iter().rev().enumerate() {
        let digit = value(digit);
        let current = value(out[i]);
        if current >= digit {
            out[i] = ascii(current - digit);
        } else {
            borrow(&mut out[i + 1..])?;
            out[i] = ascii(current + 10 - digit);
        }
    }

    while out.last() == Some(&b'0') {
        out.pop();
    }
    if out.is_empty() {
        out.push(b'0');
    }

    capacity.check(out.len())?;
    reverse_in_place(&mut out);
    Ok(Digits::from_normalized(out))
}

/// Take one from the least significant non-zero digit of `higher`.
fn borrow(higher: &mut [u8]) -> Result<(), FibError> {
    for slot in higher {
        if *slot == b'0' {
            *slot = b'9';
        } else {
            *slot -= 1;
            return Ok(());
        }
    }
    // Unreachable while the minuend is checked to be the larger operand.
    Err(FibError::Underflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Digits {
        s.parse().unwrap()
    }

    fn diff(a: &str, b: &str) -> String {
        sub(&d(a), &d(b), Capacity::UNBOUNDED).unwrap().to_string()
    }

    #[test]
    fn without_borrow() {
        assert_eq!(diff("987", "123"), "864");
        assert_eq!(diff("5", "0"), "5");
    }

    #[test]
    fn borrow_across_zeros() {
        assert_eq!(diff("1000", "1"), "999");
        assert_eq!(diff("10001", "2"), "9999");
        assert_eq!(diff("2000", "1999"), "1");
    }

    #[test]
    fn equal_operands_collapse_to_zero() {
        assert_eq!(diff("123456789", "123456789"), "0");
        assert_eq!(diff("0", "0"), "0");
    }

    #[test]
    fn strips_leading_zeros() {
        assert_eq!(diff("100", "99"), "1");
        assert_eq!(diff("12345", "12300"), "45");
    }

    #[test]
    fn beyond_u64() {
        // F(94) - F(93) = F(92)
        assert_eq!(
            diff("19740274219868223167", "12200160415121876738"),
            "7540113804746346429"
        );
    }

    #[test]
    fn underflow_is_rejected() {
        assert_eq!(
            sub(&d("99"), &d("100"), Capacity::UNBOUNDED),
            Err(FibError::Underflow)
        );
        assert_eq!(
            sub(&d("123"), &d("124"), Capacity::UNBOUNDED),
            Err(FibError::Underflow)
        );
    }

    #[test]
    fn operands_unchanged() {
        let a = d("5000");
        let b = d("1");
        let _ = sub(&a, &b, Capacity::UNBOUNDED).unwrap();
        assert_eq!(a.to_string(), "5000");
        assert_eq!(b.to_string(), "1");
    }

    #[test]
    fn capacity_applies_to_result() {
        assert!(sub(&d("10000"), &d("1"), Capacity::new(4)).is_ok());
        assert!(sub(&d("10000"), &d("10"), Capacity::new(4)).is_ok());
        assert!(sub(&d("100000"), &d("1"), Capacity::new(4)).is_err());
    }

    #[test]
    fn borrow_without_source_underflows() {
        let mut higher = *b"00";
        assert_eq!(borrow(&mut higher), Err(FibError::Underflow));
    }
}
