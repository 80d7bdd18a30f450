//! Shared loading utilities
//!
//! This module contains:
//! - `load_config` - Resolve the planner config and apply `--exclude`
//! - `load_catalog` - Read the ingredients sheet into the catalog
//! - `load_history` - Read the purchase sheet into the history index

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use pantry_core::table::{read_ingredient_file, read_purchase_file};
use pantry_core::{catalog, IngredientRequirement, PlannerConfig, PurchaseHistoryIndex};
use tracing::{debug, info};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown format: {}. Available: text, json", s),
        }
    }
}

/// Load the planner config and append extra exclusions from the command line
pub fn load_config(config_path: Option<&Path>, exclude: &[String]) -> Result<PlannerConfig> {
    let (config, source) =
        PlannerConfig::load(config_path).context("Failed to load planner config")?;
    debug!("Using planner config from {}", source);

    Ok(config.with_extra_exclusions(exclude))
}

/// Read the ingredients sheet and drop already-owned items
pub fn load_catalog(path: &Path, config: &PlannerConfig) -> Result<Vec<IngredientRequirement>> {
    let rows = read_ingredient_file(path)
        .with_context(|| format!("Failed to read ingredients file: {}", path.display()))?;

    let ingredients = catalog::load(&rows, &config.exclusions);
    info!(
        "Loaded {} ingredient lines from {} rows",
        ingredients.len(),
        rows.len()
    );
    Ok(ingredients)
}

/// Read the itemized purchase sheet into the per-store history index
pub fn load_history(path: &Path, config: &PlannerConfig) -> Result<PurchaseHistoryIndex> {
    let rows = read_purchase_file(path)
        .with_context(|| format!("Failed to read purchases file: {}", path.display()))?;

    let (index, stats) = PurchaseHistoryIndex::build_with_stats(&rows, &config.stores);
    info!(
        "Indexed {} purchases across {} stores",
        stats.retained,
        config.stores.len()
    );
    Ok(index)
}

/// Format a dollar amount
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}
