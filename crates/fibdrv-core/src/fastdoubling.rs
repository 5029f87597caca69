//! Fast Doubling over decimal digit strings.
//!
//! Uses the doubling identities:
//!   F(2m)   = F(m) * (2*F(m+1) - F(m))
//!   F(2m+1) = F(m)^2 + F(m+1)^2
//!
//! Iterates over the bits of k from MSB to LSB, so F(k) costs O(log k)
//! big-number multiplications.

use tracing::trace;

use crate::arith::{add, mul, sub};
use crate::calculator::{CoreCalculator, FibError};
use crate::capacity::Capacity;
use crate::digits::Digits;
use crate::observer::ProgressObserver;
use crate::observers::NoOpObserver;
use crate::options::Options;
use crate::progress::{CancellationToken, ProgressUpdate};

const ALGORITHM: &str = "FastDoubling";

/// Fast Doubling engine producing decimal results.
///
/// # Example
/// ```
/// use fibdrv_core::fastdoubling::FastDoublingEngine;
///
/// let engine = FastDoublingEngine::default();
/// assert_eq!(engine.compute(100).unwrap().to_string(), "354224848179261915075");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FastDoublingEngine {
    capacity: Capacity,
}

impl FastDoublingEngine {
    /// Create an engine bounded by `capacity`.
    #[must_use]
    pub fn new(capacity: Capacity) -> Self {
        Self { capacity }
    }

    /// The capacity used by [`compute`](Self::compute).
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Compute F(k) as decimal digits.
    ///
    /// Fails with `CapacityExceeded` when F(k+1), the largest value the
    /// last step materialises, needs more digits than the capacity.
    pub fn compute(&self, k: u64) -> Result<Digits, FibError> {
        self.execute_doubling_loop(
            k,
            self.capacity,
            &CancellationToken::new(),
            &NoOpObserver::new(),
            0,
        )
    }

    /// Execute the doubling loop.
    #[allow(clippy::unused_self)]
    fn execute_doubling_loop(
        &self,
        k: u64,
        cap: Capacity,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        calc_index: usize,
    ) -> Result<Digits, FibError> {
        cap.check(1)?;
        // Scanning the bits of zero is meaningless.
        if k == 0 {
            return Ok(Digits::zero());
        }

        let num_bits = 64 - k.leading_zeros();
        let two = Digits::two();
        let mut a = Digits::zero();
        let mut b = Digits::one();

        for i in (1..=num_bits).rev() {
            cancel.check_cancelled()?;

            // (a, b) = (F(m), F(m+1)) -> (F(2m), F(2m+1))
            let t = sub(&mul(&two, &b, cap)?, &a, cap)?;
            let f2m = mul(&a, &t, cap)?;
            let f2m1 = add(&mul(&a, &a, cap)?, &mul(&b, &b, cap)?, cap)?;
            a = f2m;
            b = f2m1;

            // (F(2m), F(2m+1)) -> (F(2m+1), F(2m+2))
            if (k >> (i - 1)) & 1 == 1 {
                let next = add(&a, &b, cap)?;
                a = std::mem::replace(&mut b, next);
            }

            let step = num_bits - i + 1;
            trace!(k, step, digits = a.digit_count(), "doubling step");
            observer.on_progress(&ProgressUpdate::new(
                calc_index,
                ALGORITHM,
                f64::from(step) / f64::from(num_bits),
                u64::from(step),
                u64::from(num_bits),
            ));
        }

        Ok(a)
    }
}

impl CoreCalculator for FastDoublingEngine {
    /// Uses the capacity from `opts`, not the one the engine was built with.
    fn calculate_core(
        &self,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        n: u64,
        opts: &Options,
    ) -> Result<Digits, FibError> {
        self.execute_doubling_loop(n, opts.capacity(), cancel, observer, calc_index)
    }

    fn name(&self) -> &'static str {
        ALGORITHM
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn fib(k: u64) -> String {
        FastDoublingEngine::default().compute(k).unwrap().to_string()
    }

    #[test]
    fn base_cases() {
        assert_eq!(fib(0), "0");
        assert_eq!(fib(1), "1");
        assert_eq!(fib(2), "1");
        assert_eq!(fib(3), "2");
    }

    #[test]
    fn known_values() {
        assert_eq!(fib(10), "55");
        assert_eq!(fib(50), "12586269025");
        assert_eq!(fib(92), "7540113804746346429");
        assert_eq!(fib(93), "12200160415121876738");
    }

    #[test]
    fn beyond_u64() {
        assert_eq!(fib(94), "19740274219868223167");
        assert_eq!(fib(100), "354224848179261915075");
        assert_eq!(
            fib(200),
            "280571172992510140037611932413038677189525"
        );
    }

    #[test]
    fn default_capacity_ceiling() {
        let engine = FastDoublingEngine::default();
        // F(613) has 128 digits and F(614), computed alongside it, too.
        assert_eq!(engine.compute(613).unwrap().digit_count(), 128);
        // F(614) fits, but the F(615) it drags along does not.
        assert!(matches!(
            engine.compute(614),
            Err(FibError::CapacityExceeded { capacity: 128, .. })
        ));
    }

    #[test]
    fn larger_capacity() {
        // F(1000) and F(1001) both have 209 digits.
        let engine = FastDoublingEngine::new(Capacity::new(209));
        let s = engine.compute(1000).unwrap().to_string();
        assert!(s.starts_with("43466557686937456435688527675040625802564"));
        assert_eq!(s.len(), 209);

        let engine = FastDoublingEngine::new(Capacity::new(208));
        assert!(engine.compute(1000).is_err());
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let engine = FastDoublingEngine::new(Capacity::new(0));
        assert!(engine.compute(0).is_err());
        assert!(engine.compute(1).is_err());
    }

    #[test]
    fn cancellation() {
        let engine = FastDoublingEngine::default();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result =
            engine.calculate_core(&cancel, &NoOpObserver::new(), 0, 500, &Options::default());
        assert_eq!(result, Err(FibError::Cancelled));
    }

    #[test]
    fn deadline_checked_between_steps() {
        // Sleeps past the deadline after the first step of eleven.
        struct Slow;
        impl ProgressObserver for Slow {
            fn on_progress(&self, update: &ProgressUpdate) {
                if update.current_step == 1 {
                    std::thread::sleep(Duration::from_millis(50));
                }
            }
        }

        let opts = Options {
            max_digits: 1000,
            ..Options::default()
        };
        let cancel = CancellationToken::new().with_timeout(Duration::from_millis(10));
        let result = FastDoublingEngine::default().calculate_core(&cancel, &Slow, 0, 2000, &opts);
        assert!(matches!(result, Err(FibError::Timeout(_))));
    }

    #[test]
    fn options_capacity_overrides_engine() {
        let engine = FastDoublingEngine::new(Capacity::new(1));
        let opts = Options {
            max_digits: 64,
            ..Options::default()
        };
        let value = engine
            .calculate_core(&CancellationToken::new(), &NoOpObserver::new(), 0, 100, &opts)
            .unwrap();
        assert_eq!(value.to_string(), "354224848179261915075");
    }

    #[test]
    fn reports_one_update_per_bit() {
        struct Counting(AtomicUsize);
        impl ProgressObserver for Counting {
            fn on_progress(&self, _update: &ProgressUpdate) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        let observer = Counting(AtomicUsize::new(0));
        let engine = FastDoublingEngine::default();
        engine
            .calculate_core(&CancellationToken::new(), &observer, 0, 100, &Options::default())
            .unwrap();
        // 100 = 0b1100100
        assert_eq!(observer.0.load(Ordering::Relaxed), 7);
    }
}
