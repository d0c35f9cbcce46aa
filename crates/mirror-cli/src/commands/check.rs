//! Drift check

use colored::Colorize;
use mirror_core::MirrorConfig;

use super::{output, sync};
use crate::error::{CliError, Result};

/// Compare every mirror directory with the catalogue without writing.
///
/// Fails when a collection failed or any mirror would change.
pub fn run_check(config: MirrorConfig, json: bool) -> Result<()> {
    if !json {
        println!("{} Checking mirrors...", "=>".blue().bold());
    }

    let report = sync::cycle(config, true)?;

    if json {
        output::print_json(&report)?;
    } else {
        output::print_report(&report, true);
    }

    if report.failed_count() > 0 {
        return Err(CliError::user(format!(
            "{} collection(s) could not be checked",
            report.failed_count()
        )));
    }
    if report.has_drift() {
        if !json {
            println!();
            println!("Run {} to update.", "mirror sync".cyan());
        }
        return Err(CliError::user("Mirrors are out of date"));
    }

    if !json {
        println!("{} All mirrors are up to date.", "OK".green().bold());
    }
    Ok(())
}
