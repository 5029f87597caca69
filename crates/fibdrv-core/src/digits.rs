//! The decimal bignum: a validated sequence of ASCII digits.

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::calculator::FibError;

/// Non-negative integer stored as ASCII digits, most significant first.
///
/// Never empty and never carries a leading zero unless the value is zero.
/// Values are built either by the validating parsers or by the arithmetic
/// primitives, which keep the invariant.
///
/// # Example
/// ```
/// use fibdrv_core::digits::Digits;
///
/// let d: Digits = "00120".parse().unwrap();
/// assert_eq!(d.to_string(), "120");
/// assert_eq!(d.digit_count(), 3);
/// assert!("12a".parse::<Digits>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digits {
    bytes: Vec<u8>,
}

impl Digits {
    /// The value 0.
    #[must_use]
    pub fn zero() -> Self {
        Self { bytes: vec![b'0'] }
    }

    /// The value 1.
    #[must_use]
    pub fn one() -> Self {
        Self { bytes: vec![b'1'] }
    }

    /// The value 2.
    #[must_use]
    pub fn two() -> Self {
        Self { bytes: vec![b'2'] }
    }

    /// Build from a machine integer.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self {
            bytes: value.to_string().into_bytes(),
        }
    }

    /// Parse ASCII digits, stripping redundant leading zeros.
    ///
    /// Rejects empty input and any byte outside `'0'..='9'`.
    pub fn from_ascii(bytes: &[u8]) -> Result<Self, FibError> {
        if bytes.is_empty() {
            return Err(FibError::Empty);
        }
        if let Some(position) = bytes.iter().position(|b| !b.is_ascii_digit()) {
            return Err(FibError::InvalidDigit {
                byte: bytes[position],
                position,
            });
        }
        let start = bytes
            .iter()
            .position(|&b| b != b'0')
            .unwrap_or(bytes.len() - 1);
        Ok(Self {
            bytes: bytes[start..].to_vec(),
        })
    }

    /// Wrap a buffer the arithmetic primitives produced.
    pub(crate) fn from_normalized(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty());
        debug_assert!(bytes.iter().all(u8::is_ascii_digit));
        debug_assert!(bytes.len() == 1 || bytes[0] != b'0');
        Self { bytes }
    }

    /// Number of decimal digits.
    #[must_use]
    pub fn digit_count(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bytes == b"0"
    }

    /// The ASCII digits, most significant first.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The digits followed by a NUL terminator, as handed to a reader.
    #[must_use]
    pub fn to_nul_terminated(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + 1);
        out.extend_from_slice(&self.bytes);
        out.push(0);
        out
    }
}

impl FromStr for Digits {
    type Err = FibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s.as_bytes())
    }
}

impl From<u64> for Digits {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Ord for Digits {
    // Normalized digit strings order by length first, then lexicographically.
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes
            .len()
            .cmp(&other.bytes.len())
            .then_with(|| self.bytes.cmp(&other.bytes))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bytes {
            f.write_char(char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digits(\"{self}\")")
    }
}
