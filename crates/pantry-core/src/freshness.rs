//! Freshness labeling for planning when to shop
//!
//! Pure keyword lookup. "Highly" beats "moderately"; shelf-stable is checked
//! on its own, so "tomato paste" can be both highly perishable (via "tomato")
//! and shelf stable.

use serde::Serialize;

use crate::config::FreshnessKeywords;
use crate::matcher::contains_any;
use crate::models::IngredientRequirement;

/// How soon an ingredient needs to be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Perishability {
    /// Use within 3-5 days
    Highly,
    /// Use within 7-10 days
    Moderately,
}

impl Perishability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highly => "highly perishable",
            Self::Moderately => "moderately perishable",
        }
    }

    pub fn use_within(&self) -> &'static str {
        match self {
            Self::Highly => "3-5 days",
            Self::Moderately => "7-10 days",
        }
    }
}

impl std::fmt::Display for Perishability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Freshness labels for one ingredient name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FreshnessLabel {
    pub perishability: Option<Perishability>,
    pub shelf_stable: bool,
}

/// Label one ingredient name
pub fn label(ingredient_name: &str, keywords: &FreshnessKeywords) -> FreshnessLabel {
    let lower = ingredient_name.to_lowercase();

    let perishability = if contains_any(&lower, &keywords.highly_perishable) {
        Some(Perishability::Highly)
    } else if contains_any(&lower, &keywords.moderately_perishable) {
        Some(Perishability::Moderately)
    } else {
        None
    };

    FreshnessLabel {
        perishability,
        shelf_stable: contains_any(&lower, &keywords.shelf_stable),
    }
}

/// Catalog lines sorted into freshness buckets (lines may repeat across meals)
#[derive(Debug, Clone, Default, Serialize)]
pub struct FreshnessReport<'a> {
    pub highly_perishable: Vec<&'a IngredientRequirement>,
    pub moderately_perishable: Vec<&'a IngredientRequirement>,
    pub shelf_stable: Vec<&'a IngredientRequirement>,
}

/// Bucket every catalog line by freshness, preserving catalog order
pub fn categorize<'a>(
    catalog: &'a [IngredientRequirement],
    keywords: &FreshnessKeywords,
) -> FreshnessReport<'a> {
    let mut report = FreshnessReport::default();

    for ingredient in catalog {
        let l = label(&ingredient.ingredient_name, keywords);
        match l.perishability {
            Some(Perishability::Highly) => report.highly_perishable.push(ingredient),
            Some(Perishability::Moderately) => report.moderately_perishable.push(ingredient),
            None => {}
        }
        if l.shelf_stable {
            report.shelf_stable.push(ingredient);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::models::Cell;

    fn keywords() -> FreshnessKeywords {
        PlannerConfig::default().freshness
    }

    #[test]
    fn test_label() {
        let k = keywords();
        assert_eq!(
            label("Baby Spinach", &k).perishability,
            Some(Perishability::Highly)
        );
        assert_eq!(
            label("Greek Yogurt", &k).perishability,
            Some(Perishability::Moderately)
        );
        assert_eq!(label("Quinoa", &k), FreshnessLabel::default());
    }

    #[test]
    fn test_highly_wins_over_moderately() {
        // "chicken" (highly) and "egg" (moderately) both appear
        let l = label("Chicken and Egg Salad", &keywords());
        assert_eq!(l.perishability, Some(Perishability::Highly));
    }

    #[test]
    fn test_shelf_stable_is_independent() {
        let l = label("Tomato Paste", &keywords());
        assert_eq!(l.perishability, Some(Perishability::Highly));
        assert!(l.shelf_stable);
    }

    #[test]
    fn test_categorize_preserves_order() {
        let catalog: Vec<IngredientRequirement> = ["Kale", "Feta", "Panko", "Dill"]
            .iter()
            .map(|name| IngredientRequirement {
                code: "1".into(),
                meal_name: "Bowl".into(),
                ingredient_name: name.to_string(),
                qty_needed: Cell::Empty,
                unit: String::new(),
                total_qty: Cell::Empty,
                cost_total: Cell::Empty,
                cost_for_qty: None,
            })
            .collect();

        let report = categorize(&catalog, &keywords());
        let highly: Vec<&str> = report
            .highly_perishable
            .iter()
            .map(|i| i.ingredient_name.as_str())
            .collect();
        assert_eq!(highly, vec!["Kale", "Dill"]);
        assert_eq!(report.moderately_perishable.len(), 1);
        assert_eq!(report.shelf_stable[0].ingredient_name, "Panko");
    }
}
