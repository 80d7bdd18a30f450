//! Perishability grouping command

use std::path::Path;

use anyhow::Result;
use pantry_core::freshness::{categorize, FreshnessReport, Perishability};
use pantry_core::IngredientRequirement;

use super::{load_catalog, load_config};

pub fn cmd_freshness(
    config_path: Option<&Path>,
    ingredients: &Path,
    exclude: &[String],
) -> Result<()> {
    let config = load_config(config_path, exclude)?;
    let catalog = load_catalog(ingredients, &config)?;

    print!("{}", render_freshness(&categorize(&catalog, &config.freshness)));
    Ok(())
}

pub fn render_freshness(report: &FreshnessReport<'_>) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("🥬 Freshness\n");
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    section(
        &mut out,
        &format!(
            "⚡ Highly perishable (use within {})",
            Perishability::Highly.use_within()
        ),
        &report.highly_perishable,
    );
    section(
        &mut out,
        &format!(
            "⏳ Moderately perishable (use within {})",
            Perishability::Moderately.use_within()
        ),
        &report.moderately_perishable,
    );
    section(&mut out, "📦 Shelf stable", &report.shelf_stable);

    out
}

fn section(out: &mut String, title: &str, items: &[&IngredientRequirement]) {
    out.push('\n');
    out.push_str(&format!("{} - {}\n", title, items.len()));
    if items.is_empty() {
        out.push_str("   (none)\n");
        return;
    }
    for ingredient in items {
        out.push_str(&format!(
            "   • {} [meal {}]\n",
            ingredient.ingredient_name, ingredient.code
        ));
    }
}
