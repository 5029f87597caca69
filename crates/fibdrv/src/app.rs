//! Application entry point and dispatch.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use fibdrv_cli::output::write_to_file;
use fibdrv_cli::presenter::CLIResultPresenter;
use fibdrv_core::calculator::{FibCalculator, FibError};
use fibdrv_core::capacity::{estimate_digits, max_index};
use fibdrv_core::fastdoubling::FastDoublingEngine;
use fibdrv_core::observers::LoggingObserver;
use fibdrv_core::options::Options;
use fibdrv_core::progress::CancellationToken;
use fibdrv_service::interfaces::ResultPresenter;
use fibdrv_service::orchestrator::{execute_batch_with_observer, verify_results};
use fibdrv_service::session::{FibDevice, Whence};

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        fibdrv_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let timeout = config.timeout_duration()?;
    let opts = config.options();
    if config.device {
        return run_device(config, &opts);
    }
    run_cli(config, &opts, timeout)
}

fn run_cli(config: &AppConfig, opts: &Options, timeout: Duration) -> Result<()> {
    let indices = config.indices()?;
    if let (Some(ceiling), Some(&last)) = (max_index(opts.capacity()), indices.last()) {
        if last > ceiling {
            warn!(
                ceiling,
                max_digits = opts.max_digits,
                "indices above the ceiling exceed the digit capacity"
            );
        }
    }

    let calculator = FibCalculator::new(Arc::new(FastDoublingEngine::new(opts.capacity())));
    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone())?;

    let observer = LoggingObserver::new();
    let results =
        execute_batch_with_observer(&calculator, &indices, opts, &cancel, Some(timeout), &observer);

    let presenter = CLIResultPresenter::new(config.verbose, config.quiet);
    let batch = results.len() > 1;
    for result in &results {
        match &result.outcome {
            Ok(value) => {
                presenter.present_result(result.index, value, result.duration, config.details);
            }
            // A lone failure is reported once, by the caller.
            Err(error) if batch => presenter.present_error(result.index, error),
            Err(_) => {}
        }
    }
    if batch {
        presenter.present_summary(&results);
    }

    if config.verify {
        let verified = verify_results(&results)?;
        info!(verified, "results match the reference");
        if !config.quiet {
            println!("Verified {verified} value(s) against the reference");
        }
    }

    if let Some(path) = &config.output {
        let values = results
            .iter()
            .filter_map(|r| r.value().map(|value| (r.index, value)));
        write_to_file(path, values)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    if let Some(error) = results.iter().find_map(|r| r.outcome.as_ref().err()) {
        let error = anyhow::Error::new(error.clone());
        if batch {
            return Err(error.context(format!("{failed} of {} indices failed", results.len())));
        }
        return Err(error);
    }
    Ok(())
}

/// Read every requested index through one device session.
fn run_device(config: &AppConfig, opts: &Options) -> Result<()> {
    let indices = config.indices()?;
    let device = FibDevice::new(opts);
    let mut session = device.open()?;
    let mut buf = read_buffer(opts)?;

    for k in indices {
        let offset = session.seek(i64::try_from(k).unwrap_or(i64::MAX), Whence::Set);
        if offset != k {
            warn!(requested = k, offset, "offset clamped to the device range");
        }
        let len = session.read(&mut buf)?;
        let text = String::from_utf8_lossy(&buf[..len - 1]);
        if config.quiet {
            println!("{text}");
        } else {
            println!("Reading from fibdrv at offset {offset}, returned the sequence {text}.");
        }
    }
    Ok(())
}

/// A buffer large enough for any value the device can return.
///
/// Offsets are clamped to `max_offset`, so the longest read is bounded by
/// the digits of F(max_offset) as well as by the capacity.
fn read_buffer(opts: &Options) -> Result<Vec<u8>, FibError> {
    let len = opts
        .max_digits
        .min(estimate_digits(opts.max_offset))
        .saturating_add(1);
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| FibError::Allocation(e.to_string()))?;
    buf.resize(len, 0);
    Ok(buf)
}

fn ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .context("failed to set Ctrl+C handler")
}
