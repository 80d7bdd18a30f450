//! Side-by-side store prices per ingredient
//!
//! Unlike assignment, no overrides or categories apply here: each store
//! contributes the first matching item it has, and the cheapest wins.

use tracing::debug;

use crate::history::PurchaseHistoryIndex;
use crate::matcher::MatchRule;
use crate::models::{IngredientRequirement, PriceComparison, StorePrice};

/// Compare store prices for each distinct ingredient, in catalog order
pub fn compare(
    ingredients: &[IngredientRequirement],
    index: &PurchaseHistoryIndex,
    rule: MatchRule,
) -> Vec<PriceComparison> {
    let mut comparisons: Vec<PriceComparison> = Vec::new();

    for ingredient in ingredients {
        let name = &ingredient.ingredient_name;
        if comparisons.iter().any(|c| c.ingredient_name == *name) {
            continue;
        }
        comparisons.push(compare_one(name, index, rule));
    }

    let unmatched = comparisons.iter().filter(|c| c.prices.is_empty()).count();
    debug!(
        "Compared {} ingredients ({} with no history)",
        comparisons.len(),
        unmatched
    );
    comparisons
}

/// First matching item at every store for one ingredient
pub fn compare_one(
    ingredient_name: &str,
    index: &PurchaseHistoryIndex,
    rule: MatchRule,
) -> PriceComparison {
    let prices = index
        .stores()
        .filter_map(|store| {
            store
                .find_first(|key| rule.matches(ingredient_name, key))
                .map(|(_, record)| StorePrice {
                    store: store.name().to_string(),
                    price: record.price,
                    item: record.item_name.clone(),
                })
        })
        .collect();

    PriceComparison {
        ingredient_name: ingredient_name.to_string(),
        prices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::models::Cell;
    use crate::table::PurchaseRow;

    fn purchase(location: &str, item: &str, price: f64) -> PurchaseRow {
        PurchaseRow {
            location: Cell::Text(location.into()),
            item_name: Cell::Text(item.into()),
            price: Cell::Number(price),
            ..Default::default()
        }
    }

    fn ingredient(name: &str) -> IngredientRequirement {
        IngredientRequirement {
            code: "1".into(),
            meal_name: "Bowl".into(),
            ingredient_name: name.into(),
            qty_needed: Cell::Number(1.0),
            unit: "ea".into(),
            total_qty: Cell::Empty,
            cost_total: Cell::Empty,
            cost_for_qty: None,
        }
    }

    #[test]
    fn test_compare_lists_each_store_once() {
        let config = PlannerConfig::default();
        let index = PurchaseHistoryIndex::build(
            &[
                purchase("Safeway", "Quinoa Tri-Color", 4.99),
                purchase("Safeway", "Quinoa Flakes", 2.99),
                purchase("Costco", "Organic Quinoa", 3.49),
            ],
            &config.stores,
        );

        let result = compare(
            &[ingredient("Quinoa"), ingredient("Quinoa")],
            &index,
            config.compare_match,
        );
        assert_eq!(result.len(), 1);

        let quinoa = &result[0];
        let stores: Vec<&str> = quinoa.prices.iter().map(|p| p.store.as_str()).collect();
        assert_eq!(stores, vec!["Costco", "Safeway"]);
        // Safeway's first-seen item is used, not its cheapest
        assert_eq!(quinoa.prices[1].price, 4.99);
        assert_eq!(quinoa.cheapest().map(|p| p.store.as_str()), Some("Costco"));
    }

    #[test]
    fn test_compare_ignores_overrides() {
        let config = PlannerConfig::default();
        let index = PurchaseHistoryIndex::build(
            &[
                purchase("Costco", "Penne Pasta 6pk", 8.99),
                purchase("Safeway", "Penne Pasta", 1.29),
            ],
            &config.stores,
        );
        let result = compare_one("Pasta", &index, config.compare_match);
        assert_eq!(result.cheapest().map(|p| p.store.as_str()), Some("Safeway"));
    }

    #[test]
    fn test_compare_no_history() {
        let config = PlannerConfig::default();
        let index = PurchaseHistoryIndex::build(&[], &config.stores);
        let result = compare_one("Saffron", &index, config.compare_match);
        assert!(result.prices.is_empty());
        assert!(result.cheapest().is_none());
    }
}
