//! Interval scheduler for `mirror run`

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mirror_core::{CancelToken, CatalogueClient, CycleReport, CycleRunner};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::error::Result;

/// Run cycles on `interval` until `shutdown` resolves.
///
/// The first cycle starts immediately. Each cycle runs on the blocking pool;
/// a tick that falls due while a cycle is still running is delayed, never
/// doubled up. When `shutdown` resolves mid-cycle the cycle is cancelled and
/// awaited before returning. Returns the number of cycles started.
pub async fn run_until<C, F>(
    runner: Arc<CycleRunner<C>>,
    interval: Duration,
    cancel: CancelToken,
    shutdown: F,
) -> Result<usize>
where
    C: CatalogueClient + 'static,
    F: Future<Output = std::io::Result<()>>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut cycles = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            signal = &mut shutdown => {
                signal?;
                info!("Shutdown requested");
                return Ok(cycles);
            }
        }

        cycles += 1;
        let cycle_runner = Arc::clone(&runner);
        let token = cancel.clone();
        let mut cycle = tokio::task::spawn_blocking(move || cycle_runner.run_cycle(&token));

        tokio::select! {
            joined = &mut cycle => log_cycle(&joined?),
            signal = &mut shutdown => {
                signal?;
                warn!("Shutdown requested, cancelling the running cycle");
                cancel.cancel();
                log_cycle(&cycle.await?);
                return Ok(cycles);
            }
        }
        info!(next_in_secs = interval.as_secs(), "Waiting for next cycle");
    }
}

fn log_cycle(report: &CycleReport) {
    let (mut created, mut replaced, mut removed) = (0, 0, 0);
    for reconcile in report.outcomes.iter().filter_map(|o| o.report()).map(|r| &r.reconcile) {
        created += reconcile.created();
        replaced += reconcile.replaced();
        removed += reconcile.removed();
    }

    if report.is_success() {
        info!(created, replaced, removed, "Cycle complete");
    } else {
        error!(
            created,
            replaced,
            removed,
            failed = report.failed_count(),
            cancelled = report.was_cancelled(),
            "Cycle completed with problems"
        );
    }
}
