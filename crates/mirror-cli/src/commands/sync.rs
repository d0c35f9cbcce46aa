//! One-shot mirror cycle

use colored::Colorize;
use mirror_core::{CancelToken, CycleReport, CycleRunner, MirrorConfig, ReconcileOptions};
use mirror_emby::EmbyClient;

use super::output;
use crate::error::{CliError, Result};

/// Run a single cycle against the configured server and print the outcome.
///
/// Fails when any collection failed, after printing the report.
pub fn run_sync(config: MirrorConfig, dry_run: bool, json: bool) -> Result<()> {
    if !json {
        let mode = if dry_run { " (dry run)" } else { "" };
        println!(
            "{} Mirroring {} collection(s){}...",
            "=>".blue().bold(),
            config.collections.len(),
            mode
        );
    }

    let report = cycle(config, dry_run)?;

    if json {
        output::print_json(&report)?;
    } else {
        output::print_report(&report, dry_run);
        output::print_footer(&report);
    }

    if report.failed_count() > 0 {
        return Err(CliError::user(format!(
            "{} collection(s) failed",
            report.failed_count()
        )));
    }
    Ok(())
}

/// Build a runner for `config` and run one cycle to completion.
pub(crate) fn cycle(config: MirrorConfig, dry_run: bool) -> Result<CycleReport> {
    let client = EmbyClient::from_config(&config.server)?;
    let runner = CycleRunner::new(config, client).with_options(ReconcileOptions { dry_run });
    Ok(runner.run_cycle(&CancelToken::new()))
}
