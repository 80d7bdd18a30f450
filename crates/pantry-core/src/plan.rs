//! Store grouping and totals
//!
//! Every catalog line lands on its assigned store's list, so an ingredient
//! shared by two meals appears (and is counted) twice at the same price.

use tracing::info;

use crate::assign::{assign, Assignments};
use crate::config::PlannerConfig;
use crate::history::PurchaseHistoryIndex;
use crate::models::{Assignment, IngredientRequirement, LineItem, ShoppingPlan, StoreGroup};

/// Group catalog lines by assigned store, largest store total first
///
/// Stores with equal totals keep the order in which they first appeared.
pub fn group(ingredients: &[IngredientRequirement], assignments: &Assignments) -> ShoppingPlan {
    let missing = Assignment::not_found();
    let mut stores: Vec<StoreGroup> = Vec::new();

    for ingredient in ingredients {
        let assignment = assignments
            .get(&ingredient.ingredient_name)
            .unwrap_or(&missing);

        let line = LineItem {
            ingredient_name: ingredient.ingredient_name.clone(),
            qty: ingredient.qty_needed.clone(),
            unit: ingredient.unit.clone(),
            price: assignment.price,
            meal_code: ingredient.code.clone(),
            historical_item: assignment.item.clone(),
        };

        match stores.iter_mut().find(|g| g.store == assignment.store) {
            Some(group) => {
                group.total += line.price;
                group.items.push(line);
            }
            None => stores.push(StoreGroup {
                store: assignment.store.clone(),
                total: line.price,
                items: vec![line],
            }),
        }
    }

    stores.sort_by(|a, b| b.total.total_cmp(&a.total));
    let grand_total = stores.iter().map(|g| g.total).sum();

    let plan = ShoppingPlan {
        stores,
        grand_total,
    };
    info!(
        "Plan covers {} items across {} stores, ${:.2} total",
        plan.item_count(),
        plan.stores.len(),
        plan.grand_total
    );
    plan
}

/// Assign and group in one step
pub fn build_plan(
    ingredients: &[IngredientRequirement],
    index: &PurchaseHistoryIndex,
    config: &PlannerConfig,
) -> ShoppingPlan {
    let assignments = assign(ingredients, index, config);
    group(ingredients, &assignments)
}
