//! Scheduled mirroring until Ctrl-C

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use mirror_core::{CancelToken, CycleRunner, MirrorConfig};
use mirror_emby::EmbyClient;
use tracing::info;

use crate::error::{CliError, Result};
use crate::schedule;

/// Mirror on a fixed interval until interrupted.
pub fn run_scheduled(config: MirrorConfig, interval_secs: Option<u64>) -> Result<()> {
    let interval = match interval_secs {
        Some(0) => return Err(CliError::user("--interval-secs must be positive")),
        Some(secs) => Duration::from_secs(secs),
        None => config.schedule.interval(),
    };

    println!(
        "{} Mirroring {} collection(s) every {}s. Press Ctrl-C to stop.",
        "=>".blue().bold(),
        config.collections.len(),
        interval.as_secs()
    );

    // The blocking HTTP client must be created and dropped outside the runtime
    let client = EmbyClient::from_config(&config.server)?;
    let runner = Arc::new(CycleRunner::new(config, client));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let cycles = runtime.block_on(schedule::run_until(
        Arc::clone(&runner),
        interval,
        CancelToken::new(),
        tokio::signal::ctrl_c(),
    ))?;
    drop(runtime);

    info!(cycles, "Scheduler stopped");
    println!("{} Stopped after {} cycle(s).", "OK".green().bold(), cycles);
    Ok(())
}
