//! Human and JSON rendering of cycle reports

use colored::Colorize;
use mirror_core::{CollectionOutcome, CycleReport, LinkAction, OutcomeStatus};

use crate::error::Result;

pub fn print_json(report: &CycleReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print one block per collection.
///
/// `preview` switches the wording to "would" and hides unchanged entries.
pub fn print_report(report: &CycleReport, preview: bool) {
    for outcome in &report.outcomes {
        print_outcome(outcome, preview);
    }
}

fn print_outcome(outcome: &CollectionOutcome, preview: bool) {
    let label = format!("{} -> {}", outcome.collection, outcome.target.display());
    match &outcome.status {
        OutcomeStatus::Failed { error } => {
            println!("{} {}: {}", "ERROR".red().bold(), label.cyan(), error);
        }
        OutcomeStatus::Cancelled => {
            println!("{} {}", "CANCELLED".yellow().bold(), label.cyan());
        }
        OutcomeStatus::Synced(collection) => {
            let reconcile = &collection.reconcile;
            let tag = if !reconcile.is_clean() {
                "PARTIAL".yellow().bold()
            } else if preview && reconcile.has_drift() {
                "DRIFTED".yellow().bold()
            } else {
                "OK".green().bold()
            };
            let verb = if preview { "would be " } else { "" };
            println!(
                "{} {} ({}, {} items): {} {verb}created, {} {verb}replaced, {} {verb}removed, {} unchanged",
                tag,
                label.cyan(),
                outcome.kind,
                collection.items,
                reconcile.created(),
                reconcile.replaced(),
                reconcile.removed(),
                reconcile.unchanged(),
            );

            for change in &reconcile.changes {
                let marker = match change.action {
                    LinkAction::Created => "+".green(),
                    LinkAction::Replaced => "~".yellow(),
                    LinkAction::Removed => "-".red(),
                    LinkAction::Unchanged => continue,
                };
                match &change.target {
                    Some(target) => println!(
                        "   {} {} {}",
                        marker,
                        change.name,
                        format!("-> {}", target.display()).dimmed()
                    ),
                    None => println!("   {} {}", marker, change.name),
                }
            }
            for failure in &reconcile.failures {
                println!("   {} {}: {}", "!".red(), failure.name, failure.reason);
            }
            for item in &collection.unresolved {
                println!(
                    "   {} {} {}",
                    "?".yellow(),
                    item.name,
                    format!("({})", item.reason).dimmed()
                );
            }
        }
    }
}

/// One-line footer summarising the whole cycle.
pub fn print_footer(report: &CycleReport) {
    let elapsed = report.finished_at - report.started_at;
    let failed = report.failed_count();
    if report.was_cancelled() {
        println!("{} Cycle cancelled.", "!".yellow().bold());
    } else if failed > 0 {
        println!(
            "{} {} of {} collection(s) failed.",
            "!".red().bold(),
            failed,
            report.outcomes.len()
        );
    } else {
        println!(
            "{} {} collection(s) mirrored in {} ms.",
            "OK".green().bold(),
            report.outcomes.len(),
            elapsed.num_milliseconds()
        );
    }
}
