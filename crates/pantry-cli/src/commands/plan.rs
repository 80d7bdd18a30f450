//! Shopping plan command

use std::path::Path;

use anyhow::{Context, Result};
use pantry_core::models::UNKNOWN_STORE;
use pantry_core::{assign, group, AssignmentSummary, ShoppingPlan};

use super::{load_catalog, load_config, load_history, money, truncate, OutputFormat};

pub fn cmd_plan(
    config_path: Option<&Path>,
    ingredients: &Path,
    purchases: &Path,
    format: OutputFormat,
    exclude: &[String],
) -> Result<()> {
    let config = load_config(config_path, exclude)?;
    let catalog = load_catalog(ingredients, &config)?;
    let index = load_history(purchases, &config)?;

    let assignments = assign(&catalog, &index, &config);
    let plan = group(&catalog, &assignments);

    match format {
        OutputFormat::Json => {
            println!("{}", plan.to_json().context("Failed to serialize plan")?);
        }
        OutputFormat::Text => {
            print!("{}", render_plan(&plan));
            print!(
                "{}",
                render_summary(&AssignmentSummary::from_assignments(&assignments))
            );
        }
    }

    Ok(())
}

/// Render the plan as a per-store text report
pub fn render_plan(plan: &ShoppingPlan) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("🛒 Shopping Plan\n");
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    if plan.stores.is_empty() {
        out.push_str("   Nothing to buy.\n");
        return out;
    }

    for group in &plan.stores {
        out.push('\n');
        out.push_str(&format!(
            "🏪 {} ({} total, {} items)\n",
            group.store.to_uppercase(),
            money(group.total),
            group.items.len()
        ));
        out.push_str(&format!(
            "   {:25} │ {:>12} │ {:>9} │ {:>4} │ {}\n",
            "Ingredient", "Qty", "Price", "Meal", "Bought as"
        ));
        out.push_str("   ──────────────────────────┼──────────────┼───────────┼──────┼──────────────────────\n");

        for item in &group.items {
            let qty = format!("{} {}", item.qty, item.unit);
            out.push_str(&format!(
                "   {:25} │ {:>12} │ {:>9} │ {:>4} │ {}\n",
                truncate(&item.ingredient_name, 25),
                truncate(qty.trim(), 12),
                money(item.price),
                truncate(&item.meal_code, 4),
                truncate(&item.historical_item, 40)
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!("💰 Grand total: {}\n", money(plan.grand_total)));

    if let Some(unknown) = plan.store(UNKNOWN_STORE) {
        out.push_str(&format!(
            "   ⚠️  {} line(s) have no purchase history and are counted as {}\n",
            unknown.items.len(),
            money(0.0)
        ));
    }

    out
}

/// Render how each ingredient was resolved
pub fn render_summary(summary: &AssignmentSummary) -> String {
    format!(
        "\n📋 Resolved by: {} override, {} category, {} best price, {} not found\n",
        summary.by_override, summary.by_category, summary.by_best_price, summary.not_found
    )
}
