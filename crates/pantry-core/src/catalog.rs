//! Ingredient catalog: the ingredients still to buy
//!
//! Rows without a meal code or ingredient name are skipped, and anything the
//! household already owns (olive oil, salt, ...) is dropped by substring.

use std::cmp::Ordering;
use tracing::debug;

use crate::models::IngredientRequirement;
use crate::table::IngredientRow;

/// Build the catalog from ingredient sheet rows, preserving row order
pub fn load(rows: &[IngredientRow], exclusions: &[String]) -> Vec<IngredientRequirement> {
    let exclusions: Vec<String> = exclusions.iter().map(|e| e.to_lowercase()).collect();

    let mut excluded = 0;
    let mut catalog = Vec::new();

    for row in rows {
        let (Some(code), Some(ingredient_name)) = (row.code.as_text(), row.ingredient_name.as_text())
        else {
            continue;
        };

        if is_excluded(&ingredient_name, &exclusions) {
            excluded += 1;
            continue;
        }

        catalog.push(IngredientRequirement {
            code,
            meal_name: row.meal_name.as_text().unwrap_or_default(),
            ingredient_name,
            qty_needed: row.qty_needed.clone(),
            unit: row.unit.as_text().unwrap_or_default(),
            total_qty: row.total_qty.clone(),
            cost_total: row.cost_total.clone(),
            cost_for_qty: row.cost_for_qty.as_number(),
        });
    }

    debug!(
        "Catalog has {} ingredients ({} excluded as already owned)",
        catalog.len(),
        excluded
    );
    catalog
}

/// Whether an ingredient contains any exclusion substring (case-insensitive)
///
/// `exclusions` must already be lowercase.
fn is_excluded(ingredient_name: &str, exclusions: &[String]) -> bool {
    let lower = ingredient_name.to_lowercase();
    exclusions
        .iter()
        .any(|e| !e.is_empty() && lower.contains(e.as_str()))
}

/// Ingredients grouped under one meal code
#[derive(Debug, Clone)]
pub struct Meal<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub ingredients: Vec<&'a IngredientRequirement>,
}

/// Group catalog entries by meal code, ordered by code
///
/// The meal name is taken from the first row seen for each code. Numeric codes
/// sort numerically so that "10" follows "9".
pub fn group_by_meal(catalog: &[IngredientRequirement]) -> Vec<Meal<'_>> {
    let mut meals: Vec<Meal<'_>> = Vec::new();

    for ingredient in catalog {
        match meals.iter_mut().find(|m| m.code == ingredient.code) {
            Some(meal) => meal.ingredients.push(ingredient),
            None => meals.push(Meal {
                code: &ingredient.code,
                name: &ingredient.meal_name,
                ingredients: vec![ingredient],
            }),
        }
    }

    meals.sort_by(|a, b| compare_codes(a.code, b.code));
    meals
}

fn compare_codes(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    fn row(code: &str, meal: &str, ingredient: &str) -> IngredientRow {
        IngredientRow {
            code: crate::table::text_cell(code),
            meal_name: Cell::Text(meal.into()),
            ingredient_name: crate::table::text_cell(ingredient),
            qty_needed: Cell::Number(1.0),
            unit: Cell::Text("ea".into()),
            ..Default::default()
        }
    }

    fn exclusions(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_skips_rows_without_code_or_name() {
        let rows = vec![
            row("1", "Bowl", "Kale"),
            row("", "Bowl", "Cucumber"),
            row("2", "Soup", ""),
            row("2", "Soup", "Carrots"),
        ];
        let catalog = load(&rows, &[]);
        let names: Vec<&str> = catalog.iter().map(|i| i.ingredient_name.as_str()).collect();
        assert_eq!(names, vec!["Kale", "Carrots"]);
    }

    #[test]
    fn test_load_excludes_case_insensitively() {
        let rows = vec![
            row("1", "Bowl", "Extra Virgin Olive Oil"),
            row("1", "Bowl", "Kosher SALT"),
            row("1", "Bowl", "Black Pepper"),
            row("1", "Bowl", "Chicken Breast"),
        ];
        let catalog = load(&rows, &exclusions(&["olive oil", "Salt", "pepper"]));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].ingredient_name, "Chicken Breast");
    }

    #[test]
    fn test_exclusion_is_unanchored_substring() {
        // "pepper" also removes "red pepper flakes" and "bell peppers"
        let rows = vec![
            row("1", "Bowl", "Red Pepper Flakes"),
            row("1", "Bowl", "Bell Peppers"),
        ];
        assert!(load(&rows, &exclusions(&["pepper"])).is_empty());
    }

    #[test]
    fn test_numeric_fields_pass_through() {
        let mut r = row("3", "Stew", "Lentils");
        r.qty_needed = Cell::Text("a handful".into());
        r.cost_for_qty = Cell::Text("=G2/F2".into());
        let catalog = load(&[r], &[]);
        assert_eq!(catalog[0].qty_needed, Cell::Text("a handful".into()));
        assert_eq!(catalog[0].cost_for_qty, None);
        assert_eq!(catalog[0].code, "3");
    }

    #[test]
    fn test_group_by_meal() {
        let rows = vec![
            row("10", "Tacos", "Tortillas"),
            row("2", "Soup", "Carrots"),
            row("10", "Tacos", "Avocado"),
            row("9", "Salad", "Kale"),
        ];
        let catalog = load(&rows, &[]);
        let meals = group_by_meal(&catalog);

        let codes: Vec<&str> = meals.iter().map(|m| m.code).collect();
        assert_eq!(codes, vec!["2", "9", "10"]);
        assert_eq!(meals[2].name, "Tacos");
        assert_eq!(meals[2].ingredients.len(), 2);
    }

    #[test]
    fn test_padded_meal_codes_stay_distinct() {
        let rows = vec![row("01", "Oats", "Rolled Oats"), row("1", "Soup", "Carrots")];
        let catalog = load(&rows, &[]);
        assert_eq!(catalog[0].code, "01");

        let meals = group_by_meal(&catalog);
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].code, "01");
        assert_eq!(meals[1].code, "1");
    }
}
