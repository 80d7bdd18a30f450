//! Pantry CLI - Grocery shopping planner
//!
//! Usage:
//!   pantry plan -i ingredients.csv -p purchases.csv    Build a shopping plan
//!   pantry compare -i ingredients.csv -p purchases.csv Compare store prices
//!   pantry meals -i ingredients.csv                    List ingredients per meal
//!   pantry config show                                 Show active configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr; stdout carries the report (or JSON)
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Plan {
            ingredients,
            purchases,
            format,
            exclude,
        } => {
            let format: commands::OutputFormat = format.parse()?;
            commands::cmd_plan(config_path, &ingredients, &purchases, format, &exclude)
        }
        Commands::Compare {
            ingredients,
            purchases,
            format,
            exclude,
        } => {
            let format: commands::OutputFormat = format.parse()?;
            commands::cmd_compare(config_path, &ingredients, &purchases, format, &exclude)
        }
        Commands::Meals {
            ingredients,
            exclude,
        } => commands::cmd_meals(config_path, &ingredients, &exclude),
        Commands::History { purchases, limit } => {
            commands::cmd_history(config_path, &purchases, limit)
        }
        Commands::Freshness {
            ingredients,
            exclude,
        } => commands::cmd_freshness(config_path, &ingredients, &exclude),
        Commands::Config { action } => match action {
            Some(ConfigAction::Path) => commands::cmd_config_path(config_path),
            Some(ConfigAction::Show) | None => commands::cmd_config_show(config_path),
        },
    }
}
