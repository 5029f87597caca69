//! Constants for digit capacity, service limits and exit codes.

/// Default maximum number of decimal digits any value may occupy.
///
/// Mirrors the 128-byte digit buffer of the character-device driver, with the
/// terminator no longer counted: it is added only when a value is copied out.
pub const DEFAULT_MAX_DIGITS: usize = 128;

/// Largest seek offset (Fibonacci index) a device session accepts.
pub const DEFAULT_MAX_OFFSET: u64 = 100;

/// Minimum progress change (1%) before reporting an update.
pub const PROGRESS_REPORT_THRESHOLD: f64 = 0.01;

/// `log10` of the golden ratio, used by the digit-count estimate.
pub const LOG10_PHI: f64 = 0.208_987_640_249_978_73;

/// `log10(sqrt(5))`, used by the digit-count estimate.
pub const LOG10_SQRT5: f64 = 0.349_485_002_168_009_4;

/// Exit codes for the `fibdrv` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Computation timed out.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Result did not match the reference during verification.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// A value exceeded the configured digit capacity.
    pub const ERROR_CAPACITY: i32 = 5;
    /// Computation cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_constants_match_definitions() {
        let phi = (1.0 + 5f64.sqrt()) / 2.0;
        assert!((phi.log10() - LOG10_PHI).abs() < 1e-12);
        assert!((5f64.sqrt().log10() - LOG10_SQRT5).abs() < 1e-12);
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            exit_codes::SUCCESS,
            exit_codes::ERROR_GENERIC,
            exit_codes::ERROR_TIMEOUT,
            exit_codes::ERROR_MISMATCH,
            exit_codes::ERROR_CONFIG,
            exit_codes::ERROR_CAPACITY,
            exit_codes::ERROR_CANCELED,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
