//! Offline configuration check

use colored::Colorize;
use mirror_core::MirrorConfig;

use crate::error::Result;

/// Print a summary of an already loaded and validated configuration.
pub fn run_validate(config: &MirrorConfig) -> Result<()> {
    println!("{} Configuration is valid.", "OK".green().bold());
    println!("   server:   {}", config.server.url.cyan());
    println!("   interval: {}s", config.schedule.interval_secs);
    for spec in &config.collections {
        println!(
            "   {} {} ({}) -> {}",
            "*".blue(),
            spec.label(),
            spec.kind,
            spec.target.display()
        );
    }
    for rule in &config.path_rules {
        println!("   {} {} => {}", "~".dimmed(), rule.from, rule.to);
    }
    Ok(())
}
