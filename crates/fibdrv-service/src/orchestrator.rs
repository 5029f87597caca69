//! Batch execution and result verification.

use std::time::{Duration, Instant};

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, warn};

use fibdrv_core::calculator::{Calculator, FibError};
use fibdrv_core::observer::ProgressObserver;
use fibdrv_core::observers::NoOpObserver;
use fibdrv_core::options::Options;
use fibdrv_core::progress::CancellationToken;

use crate::interfaces::CalculationResult;
use crate::reference;

/// Compute every index in `indices`.
pub fn execute_batch(
    calculator: &dyn Calculator,
    indices: &[u64],
    opts: &Options,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
) -> Vec<CalculationResult> {
    execute_batch_with_observer(calculator, indices, opts, cancel, timeout, &NoOpObserver::new())
}

/// Compute every index in `indices`, reporting progress to `observer`.
///
/// Computations are independent and run on the rayon pool; results come
/// back in the order of `indices`. The timeout covers the whole batch and
/// is checked between doubling steps, so any index still running when it
/// expires fails with `FibError::Timeout`.
pub fn execute_batch_with_observer(
    calculator: &dyn Calculator,
    indices: &[u64],
    opts: &Options,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    observer: &dyn ProgressObserver,
) -> Vec<CalculationResult> {
    let token = match timeout {
        Some(t) => cancel.with_timeout(t),
        None => cancel.clone(),
    };
    debug!(count = indices.len(), algorithm = calculator.name(), ?timeout, "executing batch");

    let run = |calc_index: usize, n: u64| {
        let start = Instant::now();
        let outcome = calculator.calculate(&token, observer, calc_index, n, opts);
        CalculationResult {
            index: n,
            algorithm: calculator.name().to_string(),
            outcome,
            duration: start.elapsed(),
        }
    };

    if indices.len() == 1 {
        return vec![run(0, indices[0])];
    }

    indices
        .par_iter()
        .enumerate()
        .map(|(i, &n)| run(i, n))
        .collect()
}

/// Check every successful result against the binary reference.
///
/// Returns the number of values verified. Fails with `Mismatch` on the
/// first disagreement, or with the first error when nothing succeeded.
pub fn verify_results(results: &[CalculationResult]) -> Result<usize, FibError> {
    let mut verified = 0;
    for result in results {
        let Some(value) = result.value() else {
            continue;
        };
        let expected = reference::fibonacci(result.index).to_string();
        if value.as_bytes() != expected.as_bytes() {
            warn!(index = result.index, "value disagrees with reference");
            return Err(FibError::Mismatch {
                index: result.index,
            });
        }
        verified += 1;
    }

    if verified == 0 {
        if let Some(Err(e)) = results.first().map(|r| &r.outcome) {
            return Err(e.clone());
        }
    }
    Ok(verified)
}
