//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pantry - Plan where to buy groceries from your own purchase history
#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Grocery shopping planner driven by past receipts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Planner config file (defaults to the data dir override, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a shopping plan grouped by store
    Plan {
        /// Ingredients sheet (CSV)
        #[arg(short, long)]
        ingredients: PathBuf,

        /// Itemized purchase history sheet (CSV)
        #[arg(short, long)]
        purchases: PathBuf,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Extra already-owned items to leave off the list (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },

    /// Compare store prices for each ingredient
    Compare {
        /// Ingredients sheet (CSV)
        #[arg(short, long)]
        ingredients: PathBuf,

        /// Itemized purchase history sheet (CSV)
        #[arg(short, long)]
        purchases: PathBuf,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Extra already-owned items to leave off the list (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },

    /// List ingredients to buy, grouped by meal
    Meals {
        /// Ingredients sheet (CSV)
        #[arg(short, long)]
        ingredients: PathBuf,

        /// Extra already-owned items to leave off the list (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },

    /// Summarize purchase history per store
    History {
        /// Itemized purchase history sheet (CSV)
        #[arg(short, long)]
        purchases: PathBuf,

        /// Purchases to show per store
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Group ingredients by how quickly they spoil
    Freshness {
        /// Ingredients sheet (CSV)
        #[arg(short, long)]
        ingredients: PathBuf,

        /// Extra already-owned items to leave off the list (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },

    /// Inspect the planner configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the active configuration
    Show,
    /// Show where the configuration is read from
    Path,
}
