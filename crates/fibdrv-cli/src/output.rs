//! CLI output formatting.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use fibdrv_core::digits::Digits;

/// Format a value for display, eliding the middle of long numbers.
#[must_use]
pub fn format_result(value: &Digits, verbose: bool) -> String {
    let s = value.to_string();
    if !verbose && s.len() > 100 {
        format!("{}...{} ({} digits)", &s[..50], &s[s.len() - 50..], s.len())
    } else {
        s
    }
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Write values to a file, one `index value` pair per line.
pub fn write_to_file<'a>(
    path: &Path,
    values: impl IntoIterator<Item = (u64, &'a Digits)>,
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    let mut lines = 0usize;
    for (index, value) in values {
        writeln!(file, "{index} {value}")?;
        lines += 1;
    }
    file.flush()?;
    debug!(path = %path.display(), lines, "results written");
    Ok(())
}
