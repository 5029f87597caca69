//! Independent binary reference for verifying decimal results.
//!
//! Computes F(n) with num-bigint using the same doubling identities but
//! binary limbs and native operators, so a bug in the decimal primitives
//! cannot hide behind a matching bug here.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Compute F(n) as a `BigUint`.
///
/// # Example
/// ```
/// assert_eq!(fibdrv_service::reference::fibonacci(100).to_string(), "354224848179261915075");
/// ```
#[must_use]
pub fn fibonacci(n: u64) -> BigUint {
    let mut fk = BigUint::zero();
    let mut fk1 = BigUint::one();
    for i in (0..64 - n.leading_zeros()).rev() {
        let t = (&fk1 << 1u32) - &fk;
        let f2k = &fk * &t;
        let f2k1 = &fk * &fk + &fk1 * &fk1;
        fk = f2k;
        fk1 = f2k1;
        if (n >> i) & 1 == 1 {
            std::mem::swap(&mut fk, &mut fk1);
            fk1 += &fk;
        }
    }
    fk
}
