//! Store price comparison command

use std::path::Path;

use anyhow::{Context, Result};
use pantry_core::compare::compare;
use pantry_core::PriceComparison;

use super::{load_catalog, load_config, load_history, money, truncate, OutputFormat};

pub fn cmd_compare(
    config_path: Option<&Path>,
    ingredients: &Path,
    purchases: &Path,
    format: OutputFormat,
    exclude: &[String],
) -> Result<()> {
    let config = load_config(config_path, exclude)?;
    let catalog = load_catalog(ingredients, &config)?;
    let index = load_history(purchases, &config)?;

    let comparisons = compare(&catalog, &index, config.compare_match);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&comparisons)
                .context("Failed to serialize comparisons")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", render_comparisons(&comparisons, &config.stores)),
    }

    Ok(())
}

/// Render one row per ingredient with a price column per store
pub fn render_comparisons(comparisons: &[PriceComparison], stores: &[String]) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("💲 Price Comparison\n");
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    if comparisons.is_empty() {
        out.push_str("   No ingredients to compare.\n");
        return out;
    }

    let mut header = format!("   {:25}", "Ingredient");
    let mut divider = String::from("   ─────────────────────────");
    for store in stores {
        header.push_str(&format!(" │ {:>9}", truncate(store, 9)));
        divider.push_str("─┼──────────");
    }
    header.push_str(" │ Cheapest");
    divider.push_str("─┼──────────");
    out.push_str(&header);
    out.push('\n');
    out.push_str(&divider);
    out.push('\n');

    let mut unmatched = 0;
    for comparison in comparisons {
        let mut row = format!("   {:25}", truncate(&comparison.ingredient_name, 25));
        for store in stores {
            let cell = comparison
                .prices
                .iter()
                .find(|p| p.store == *store)
                .map(|p| money(p.price))
                .unwrap_or_else(|| "-".to_string());
            row.push_str(&format!(" │ {:>9}", cell));
        }

        match comparison.cheapest() {
            Some(best) => row.push_str(&format!(" │ {}", best.store)),
            None => {
                unmatched += 1;
                row.push_str(" │ -");
            }
        }
        out.push_str(&row);
        out.push('\n');
    }

    if unmatched > 0 {
        out.push('\n');
        out.push_str(&format!(
            "   ⚠️  {} ingredient(s) not found at any store\n",
            unmatched
        ));
    }

    out
}
