#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use fibdrv_core::capacity::{max_index, Capacity};
use fibdrv_core::calculator::FibError;
use fibdrv_core::fastdoubling::FastDoublingEngine;

fn reference(n: u64) -> BigUint {
    let (mut a, mut b) = (BigUint::from(0u32), BigUint::from(1u32));
    for _ in 0..n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    a
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // First 2 bytes pick the index, next 2 the capacity.
    let n = u64::from(u16::from_le_bytes([data[0], data[1]])) % 3_000;
    let digits = usize::from(u16::from_le_bytes([data[2], data[3]])) % 700;
    let capacity = Capacity::new(digits);

    let result = FastDoublingEngine::new(capacity).compute(n);
    let fits = max_index(capacity).is_some_and(|ceiling| n <= ceiling);
    match result {
        Ok(value) => {
            assert!(fits, "F({n}) succeeded above the ceiling for {digits} digits");
            assert_eq!(value.to_string(), reference(n).to_string(), "F({n}) mismatch");
        }
        Err(FibError::CapacityExceeded { capacity, .. }) => {
            assert!(!fits, "F({n}) rejected within {digits} digits");
            assert_eq!(capacity, digits);
        }
        Err(e) => panic!("unexpected error for F({n}): {e}"),
    }
});
