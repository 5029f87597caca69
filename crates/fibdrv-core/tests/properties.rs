//! Property-based tests for the decimal primitives and the engine.
//!
//! Arithmetic is checked against num-bigint as an independent reference.

use num_bigint::BigUint;
use proptest::prelude::*;

use fibdrv_core::arith::{add, mul, sub};
use fibdrv_core::capacity::Capacity;
use fibdrv_core::digits::Digits;
use fibdrv_core::fastdoubling::FastDoublingEngine;
use fibdrv_core::iterator::DecimalFibIterator;
use fibdrv_core::reverse::{reverse, reverse_in_place};

fn digits(s: &str) -> Digits {
    s.parse().unwrap()
}

fn big(d: &Digits) -> BigUint {
    BigUint::parse_bytes(d.as_bytes(), 10).unwrap()
}

/// Normalized decimal strings of up to 80 digits.
fn decimal() -> impl Strategy<Value = Digits> {
    prop_oneof![
        1 => Just(Digits::zero()),
        9 => "[1-9][0-9]{0,79}".prop_map(|s| digits(&s)),
    ]
}

const UNBOUNDED: Capacity = Capacity::UNBOUNDED;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn add_is_commutative(x in decimal(), y in decimal()) {
        prop_assert_eq!(add(&x, &y, UNBOUNDED).unwrap(), add(&y, &x, UNBOUNDED).unwrap());
    }

    #[test]
    fn add_zero_is_identity(x in decimal()) {
        prop_assert_eq!(add(&x, &Digits::zero(), UNBOUNDED).unwrap(), x);
    }

    #[test]
    fn add_matches_reference(x in decimal(), y in decimal()) {
        let sum = add(&x, &y, UNBOUNDED).unwrap();
        prop_assert_eq!(big(&sum), big(&x) + big(&y));
    }

    #[test]
    fn mul_by_zero_and_one(x in decimal()) {
        prop_assert_eq!(mul(&x, &Digits::zero(), UNBOUNDED).unwrap(), Digits::zero());
        prop_assert_eq!(mul(&x, &Digits::one(), UNBOUNDED).unwrap(), x);
    }

    #[test]
    fn mul_is_commutative(x in decimal(), y in decimal()) {
        prop_assert_eq!(mul(&x, &y, UNBOUNDED).unwrap(), mul(&y, &x, UNBOUNDED).unwrap());
    }

    #[test]
    fn mul_matches_reference(x in decimal(), y in decimal()) {
        let product = mul(&x, &y, UNBOUNDED).unwrap();
        prop_assert_eq!(big(&product), big(&x) * big(&y));
    }

    #[test]
    fn sub_zero_and_self(x in decimal()) {
        prop_assert_eq!(sub(&x, &Digits::zero(), UNBOUNDED).unwrap(), x.clone());
        prop_assert_eq!(sub(&x, &x, UNBOUNDED).unwrap(), Digits::zero());
    }

    #[test]
    fn sub_then_add_round_trips(x in decimal(), y in decimal()) {
        let (hi, lo) = if x >= y { (x, y) } else { (y, x) };
        let diff = sub(&hi, &lo, UNBOUNDED).unwrap();
        prop_assert_eq!(big(&diff), big(&hi) - big(&lo));
        prop_assert_eq!(add(&diff, &lo, UNBOUNDED).unwrap(), hi);
    }

    #[test]
    fn sub_underflow_is_an_error(x in decimal(), y in decimal()) {
        prop_assume!(x != y);
        let (hi, lo) = if x > y { (x, y) } else { (y, x) };
        prop_assert!(sub(&lo, &hi, UNBOUNDED).is_err());
    }

    #[test]
    fn ordering_matches_reference(x in decimal(), y in decimal()) {
        prop_assert_eq!(x.cmp(&y), big(&x).cmp(&big(&y)));
    }

    #[test]
    fn reverse_is_an_involution(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut buf = bytes.clone();
        reverse(Some(&mut buf[..]));
        reverse(Some(&mut buf[..]));
        prop_assert_eq!(&buf, &bytes);

        reverse_in_place(&mut buf);
        reverse_in_place(&mut buf);
        prop_assert_eq!(buf, bytes);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// F(n) + F(n+1) == F(n+2) within the default capacity.
    #[test]
    fn fibonacci_recurrence(n in 0u64..600) {
        let engine = FastDoublingEngine::default();
        let f0 = engine.compute(n).unwrap();
        let f1 = engine.compute(n + 1).unwrap();
        let f2 = engine.compute(n + 2).unwrap();
        prop_assert_eq!(
            add(&f0, &f1, UNBOUNDED).unwrap(),
            f2,
            "F({}) + F({}) != F({})",
            n,
            n + 1,
            n + 2
        );
    }

    /// Fast doubling agrees with the additive reference on random indices.
    #[test]
    fn fast_doubling_matches_iterator(n in 0u64..5000) {
        let engine = FastDoublingEngine::new(Capacity::new(2048));
        let (_, expected) = DecimalFibIterator::from_index(n).next().unwrap();
        prop_assert_eq!(engine.compute(n).unwrap(), expected, "F({}) mismatch", n);
    }
}

/// compute(k) equals the num-bigint value for every k below 600.
#[test]
fn matches_reference_below_600() {
    let engine = FastDoublingEngine::default();
    let (mut a, mut b) = (BigUint::from(0u32), BigUint::from(1u32));
    for k in 0..600u64 {
        assert_eq!(engine.compute(k).unwrap().to_string(), a.to_string(), "F({k})");
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
}

/// Sampled differential sweep against the additive reference.
#[test]
fn fast_doubling_matches_iterator_sampled() {
    let engine = FastDoublingEngine::new(Capacity::new(2048));
    for (k, expected) in DecimalFibIterator::new().take(5000) {
        if k < 700 || k % 97 == 0 || k == 4999 {
            assert_eq!(engine.compute(k).unwrap(), expected, "F({k})");
        }
    }
}

/// Full differential sweep over 0..5000 (slow in debug builds).
#[test]
#[ignore]
fn fast_doubling_matches_iterator_exhaustive() {
    let engine = FastDoublingEngine::new(Capacity::new(2048));
    for (k, expected) in DecimalFibIterator::new().take(5000) {
        assert_eq!(engine.compute(k).unwrap(), expected, "F({k})");
    }
}

/// Concrete values the service relies on.
#[test]
fn known_scenarios() {
    let engine = FastDoublingEngine::default();
    let cases = [
        (0, "0"),
        (1, "1"),
        (10, "55"),
        (50, "12586269025"),
        (92, "7540113804746346429"),
        (100, "354224848179261915075"),
    ];
    for (k, expected) in cases {
        assert_eq!(engine.compute(k).unwrap().to_string(), expected, "F({k})");
    }
}
