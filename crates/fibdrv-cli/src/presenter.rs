//! CLI result presenter.

use std::time::Duration;

use fibdrv_core::calculator::FibError;
use fibdrv_core::digits::Digits;
use fibdrv_service::interfaces::{CalculationResult, ResultPresenter};

use crate::output::{format_duration, format_number, format_result};
use crate::ui::{print_error, print_header, tag};

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Lines printed for one value.
    fn result_lines(
        &self,
        index: u64,
        value: &Digits,
        duration: Duration,
        details: bool,
    ) -> Vec<String> {
        if self.quiet {
            return vec![value.to_string()];
        }

        let mut lines = Vec::new();
        if details {
            lines.push(format!("Duration: {}", format_duration(duration)));
            lines.push(format!("Result digits: {}", value.digit_count()));
        }
        lines.push(format!(
            "F({}) = {}",
            format_number(index),
            format_result(value, self.verbose)
        ));
        lines
    }

    /// Row of the batch summary table.
    fn summary_row(result: &CalculationResult, color: bool) -> String {
        format!(
            "  F({:<8}) {:>12} {}",
            result.index,
            format_duration(result.duration),
            tag(result.outcome.is_ok(), color),
        )
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, index: u64, value: &Digits, duration: Duration, details: bool) {
        for line in self.result_lines(index, value, duration, details) {
            println!("{line}");
        }
    }

    fn present_summary(&self, results: &[CalculationResult]) {
        if self.quiet {
            return;
        }

        print_header("Summary");
        let color = !crate::ui::is_color_disabled();
        for result in results {
            println!("{}", Self::summary_row(result, color));
        }
        let failed = results.iter().filter(|r| r.outcome.is_err()).count();
        println!("{} computed, {failed} failed", results.len() - failed);
    }

    fn present_error(&self, index: u64, error: &FibError) {
        print_error(&format!("F({index}): {error}"));
    }
}
