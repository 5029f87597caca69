//! Application configuration from CLI flags and environment.

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use fibdrv_core::calculator::FibError;
use fibdrv_core::constants::{DEFAULT_MAX_DIGITS, DEFAULT_MAX_OFFSET};
use fibdrv_core::options::Options;

/// Most indices a single `--range` may hold.
pub const MAX_BATCH_LEN: u64 = 1_000_000;

/// fibdrv: exact Fibonacci numbers as decimal strings.
#[derive(Parser, Debug)]
#[command(name = "fibdrv", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Fibonacci index to compute.
    #[arg(short, long, default_value = "100", env = "FIBDRV_N")]
    pub n: u64,

    /// Compute a range of indices instead, e.g. "0..10" or "90..=100".
    #[arg(long, value_parser = parse_range, conflicts_with = "n")]
    pub range: Option<RangeInclusive<u64>>,

    /// Maximum number of decimal digits any value may occupy.
    #[arg(long, default_value_t = DEFAULT_MAX_DIGITS, env = "FIBDRV_MAX_DIGITS")]
    pub max_digits: usize,

    /// Read through an exclusive device session instead of the batch runner.
    #[arg(long)]
    pub device: bool,

    /// Largest offset a device session may seek to.
    #[arg(long, default_value_t = DEFAULT_MAX_OFFSET)]
    pub max_offset: u64,

    /// Check every result against an independent big-integer reference.
    #[arg(long)]
    pub verify: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed information.
    #[arg(short, long)]
    pub details: bool,

    /// Output file path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quiet mode (only output the number).
    #[arg(short, long)]
    pub quiet: bool,

    /// Timeout duration (e.g., "30s", "5m", "1h").
    #[arg(long, default_value = "5m")]
    pub timeout: String,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse the timeout string into a Duration.
    pub fn timeout_duration(&self) -> Result<Duration, FibError> {
        parse_duration(&self.timeout)
            .ok_or_else(|| FibError::Config(format!("invalid timeout {:?}", self.timeout)))
    }

    /// Calculation options described by the flags.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            max_digits: self.max_digits,
            max_offset: self.max_offset,
        }
        .normalize()
    }

    /// The indices to compute, in ascending order.
    ///
    /// Fails with `FibError::Config` when a range holds more than
    /// [`MAX_BATCH_LEN`] indices.
    pub fn indices(&self) -> Result<Vec<u64>, FibError> {
        let Some(range) = &self.range else {
            return Ok(vec![self.n]);
        };
        let (start, end) = (*range.start(), *range.end());
        if end - start >= MAX_BATCH_LEN {
            return Err(FibError::Config(format!(
                "range {start}..={end} holds more than {MAX_BATCH_LEN} indices"
            )));
        }
        Ok(range.clone().collect())
    }
}

/// Parse a duration string like "5m", "1h", "30s".
///
/// Returns `None` for malformed input and for values that overflow.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(3600)?))
    } else if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_secs(n))
    }
}

/// Parse "A..B" (exclusive) or "A..=B" (inclusive) into an inclusive range.
fn parse_range(s: &str) -> Result<RangeInclusive<u64>, String> {
    let (start, end, inclusive) = if let Some((a, b)) = s.split_once("..=") {
        (a, b, true)
    } else if let Some((a, b)) = s.split_once("..") {
        (a, b, false)
    } else {
        return Err(format!("expected START..END or START..=END, got {s:?}"));
    };

    let start: u64 = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid range start {start:?}: {e}"))?;
    let end: u64 = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid range end {end:?}: {e}"))?;

    let last = if inclusive {
        end
    } else {
        end.checked_sub(1)
            .ok_or_else(|| format!("empty range {s:?}"))?
    };
    if last < start {
        return Err(format!("empty range {s:?}"));
    }
    Ok(start..=last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_formats() {
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("12"), Some(Duration::from_secs(12)));
    }

    #[test]
    fn parse_duration_ms() {
        assert_eq!(parse_duration("1ms"), Some(Duration::from_millis(1)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("5x"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn parse_duration_rejects_overflow() {
        assert_eq!(parse_duration("999999999999999999m"), None);
        assert_eq!(parse_duration("18446744073709551615h"), None);
        assert_eq!(
            parse_duration("18446744073709551615s"),
            Some(Duration::from_secs(u64::MAX))
        );
    }

    #[test]
    fn invalid_timeout_is_a_config_error() {
        let config = AppConfig::try_parse_from(["fibdrv", "--timeout", "soon"]).unwrap();
        assert!(matches!(config.timeout_duration(), Err(FibError::Config(_))));

        let config =
            AppConfig::try_parse_from(["fibdrv", "--timeout", "999999999999999999m"]).unwrap();
        assert!(matches!(config.timeout_duration(), Err(FibError::Config(_))));
    }

    #[test]
    fn parse_range_forms() {
        assert_eq!(parse_range("0..10"), Ok(0..=9));
        assert_eq!(parse_range("90..=100"), Ok(90..=100));
        assert_eq!(parse_range(" 5 ..= 5 "), Ok(5..=5));
    }

    #[test]
    fn parse_range_rejects_empty_and_malformed() {
        assert!(parse_range("10..10").is_err());
        assert!(parse_range("0..0").is_err());
        assert!(parse_range("9..=3").is_err());
        assert!(parse_range("1-5").is_err());
        assert!(parse_range("a..5").is_err());
    }

    #[test]
    fn defaults() {
        let config = AppConfig::try_parse_from(["fibdrv"]).unwrap();
        assert_eq!(config.indices(), Ok(vec![100]));
        assert_eq!(config.options(), Options::default());
        assert_eq!(config.timeout_duration(), Ok(Duration::from_secs(300)));
    }

    #[test]
    fn range_expands_to_indices() {
        let config = AppConfig::try_parse_from(["fibdrv", "--range", "3..=6"]).unwrap();
        assert_eq!(config.indices(), Ok(vec![3, 4, 5, 6]));
    }

    #[test]
    fn oversized_range_is_a_config_error() {
        let config =
            AppConfig::try_parse_from(["fibdrv", "--range", "0..=18446744073709551615"]).unwrap();
        assert!(matches!(config.indices(), Err(FibError::Config(_))));

        let config = AppConfig::try_parse_from(["fibdrv", "--range", "0..1000000"]).unwrap();
        assert_eq!(config.indices().map(|v| v.len()), Ok(1_000_000));

        let config = AppConfig::try_parse_from(["fibdrv", "--range", "0..=1000000"]).unwrap();
        assert!(config.indices().is_err());
    }

    #[test]
    fn zero_max_digits_falls_back_to_default() {
        let config = AppConfig::try_parse_from(["fibdrv", "--max-digits", "0"]).unwrap();
        assert_eq!(config.options().max_digits, DEFAULT_MAX_DIGITS);
    }
}
