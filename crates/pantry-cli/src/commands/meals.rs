//! Per-meal ingredient listing

use std::path::Path;

use anyhow::Result;
use pantry_core::catalog::{group_by_meal, Meal};

use super::{load_catalog, load_config, truncate};

pub fn cmd_meals(config_path: Option<&Path>, ingredients: &Path, exclude: &[String]) -> Result<()> {
    let config = load_config(config_path, exclude)?;
    let catalog = load_catalog(ingredients, &config)?;

    print!("{}", render_meals(&group_by_meal(&catalog)));
    Ok(())
}

pub fn render_meals(meals: &[Meal<'_>]) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("🍽️  Meals\n");
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    if meals.is_empty() {
        out.push_str("   No ingredients to buy.\n");
        return out;
    }

    for meal in meals {
        out.push('\n');
        out.push_str(&format!("   [{}] {}\n", meal.code, meal.name));
        for ingredient in &meal.ingredients {
            let qty = format!("{} {}", ingredient.qty_needed, ingredient.unit);
            out.push_str(&format!(
                "      • {:30} {}\n",
                truncate(&ingredient.ingredient_name, 30),
                qty.trim()
            ));
        }
    }

    let lines: usize = meals.iter().map(|m| m.ingredients.len()).sum();
    out.push('\n');
    out.push_str(&format!("   {} meals, {} ingredient lines\n", meals.len(), lines));
    out
}
