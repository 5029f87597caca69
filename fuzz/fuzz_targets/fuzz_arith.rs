#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use fibdrv_core::arith::{add, mul, sub};
use fibdrv_core::calculator::FibError;
use fibdrv_core::capacity::Capacity;
use fibdrv_core::digits::Digits;

fn digits_of(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b'0' + b % 10).collect()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 || data.len() > 512 {
        return;
    }
    let split = 1 + usize::from(data[0]) % (data.len() - 2);
    let (lhs, rhs) = data[1..].split_at(split);
    let lhs_text = digits_of(lhs);
    let rhs_text = digits_of(rhs);

    let a = Digits::from_ascii(&lhs_text).unwrap();
    let b = Digits::from_ascii(&rhs_text).unwrap();
    let x = BigUint::parse_bytes(&lhs_text, 10).unwrap();
    let y = BigUint::parse_bytes(&rhs_text, 10).unwrap();
    let cap = Capacity::UNBOUNDED;

    assert_eq!(add(&a, &b, cap).unwrap().to_string(), (&x + &y).to_string());
    assert_eq!(mul(&a, &b, cap).unwrap().to_string(), (&x * &y).to_string());
    if x >= y {
        assert_eq!(sub(&a, &b, cap).unwrap().to_string(), (&x - &y).to_string());
    } else {
        assert_eq!(sub(&a, &b, cap), Err(FibError::Underflow));
    }
});
