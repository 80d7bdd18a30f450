//! Store assignment engine
//!
//! Decides, for each distinct ingredient name, which store to buy it at and
//! what it cost there last time. Resolution order, first hit wins:
//!
//! 1. Manual overrides, in configured order. A keyword hit pins the store even
//!    if that store has never sold a matching item.
//! 2. Category heuristics. Only the first category whose keyword appears in
//!    the ingredient is tried, across its stores in priority order. No match
//!    falls through to step 3.
//! 3. Cheapest first-seen price among matching items at every store.
//!
//! Within a store, the first item key (in sheet order) that matches is used.
//! That is a tie-break on input order, not a closest-match search.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::{CategoryMatcher, CategoryRule, PlannerConfig};
use crate::history::{PurchaseHistoryIndex, StoreHistory};
use crate::matcher::{contains_any, first_word, MatchRule};
use crate::models::{Assignment, AssignmentSource, IngredientRequirement, PurchaseRecord};

/// Assignments keyed by ingredient name, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments {
    entries: Vec<(String, Assignment)>,
    positions: HashMap<String, usize>,
}

impl Assignments {
    pub fn get(&self, ingredient_name: &str) -> Option<&Assignment> {
        self.positions
            .get(ingredient_name)
            .map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Assignment)> {
        self.entries.iter().map(|(name, a)| (name.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains(&self, ingredient_name: &str) -> bool {
        self.positions.contains_key(ingredient_name)
    }

    fn insert(&mut self, ingredient_name: String, assignment: Assignment) {
        self.positions
            .insert(ingredient_name.clone(), self.entries.len());
        self.entries.push((ingredient_name, assignment));
    }
}

/// Per-branch counts from one assignment run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentSummary {
    pub by_override: usize,
    pub by_category: usize,
    pub by_best_price: usize,
    pub not_found: usize,
}

impl AssignmentSummary {
    pub fn from_assignments(assignments: &Assignments) -> Self {
        let mut summary = Self::default();
        for (_, a) in assignments.iter() {
            match a.source {
                AssignmentSource::Override => summary.by_override += 1,
                AssignmentSource::Category { .. } => summary.by_category += 1,
                AssignmentSource::BestPrice => summary.by_best_price += 1,
                AssignmentSource::NotFound => summary.not_found += 1,
            }
        }
        summary
    }
}

/// Resolves ingredients against a purchase history index
pub struct AssignmentEngine<'a> {
    index: &'a PurchaseHistoryIndex,
    config: &'a PlannerConfig,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(index: &'a PurchaseHistoryIndex, config: &'a PlannerConfig) -> Self {
        Self { index, config }
    }

    /// Resolve every distinct ingredient name once
    pub fn assign_all(&self, ingredients: &[IngredientRequirement]) -> Assignments {
        let mut assignments = Assignments::default();

        for ingredient in ingredients {
            let name = &ingredient.ingredient_name;
            if assignments.contains(name) {
                continue;
            }
            let assignment = self.resolve(name);
            debug!(
                "{} -> {} ${:.2} ({}) [{}]",
                name, assignment.store, assignment.price, assignment.item, assignment.source
            );
            assignments.insert(name.clone(), assignment);
        }

        let summary = AssignmentSummary::from_assignments(&assignments);
        info!(
            "Assigned {} ingredients: {} override, {} category, {} best price, {} not found",
            assignments.len(),
            summary.by_override,
            summary.by_category,
            summary.by_best_price,
            summary.not_found
        );

        assignments
    }

    /// Resolve a single ingredient name
    pub fn resolve(&self, ingredient_name: &str) -> Assignment {
        let lower = ingredient_name.to_lowercase();

        if let Some(assignment) = self.by_override(ingredient_name, &lower) {
            return assignment;
        }

        if let Some(assignment) = self.by_category(ingredient_name, &lower) {
            return assignment;
        }

        self.by_best_price(ingredient_name)
            .unwrap_or_else(Assignment::not_found)
    }

    fn by_override(&self, ingredient_name: &str, lower: &str) -> Option<Assignment> {
        let ov = self
            .config
            .overrides
            .iter()
            .find(|ov| contains_any(lower, &ov.keywords))?;

        let rule = self.config.override_match;
        let found = self
            .index
            .store(&ov.store)
            .and_then(|store| store.find_first(|key| rule.matches(ingredient_name, key)));

        Some(match found {
            Some((_, record)) => from_record(&ov.store, record, AssignmentSource::Override),
            None => Assignment {
                store: ov.store.clone(),
                price: 0.0,
                item: format!("To be purchased at {} (not in history)", ov.store),
                source: AssignmentSource::Override,
            },
        })
    }

    fn by_category(&self, ingredient_name: &str, lower: &str) -> Option<Assignment> {
        let category = self
            .config
            .categories
            .iter()
            .find(|c| contains_any(lower, &c.keywords))?;

        category.stores.iter().find_map(|store_name| {
            let store = self.index.store(store_name)?;
            let (_, record) = category_match(category, store, ingredient_name)?;
            Some(from_record(
                store_name,
                record,
                AssignmentSource::Category {
                    name: category.name.clone(),
                },
            ))
        })
    }

    fn by_best_price(&self, ingredient_name: &str) -> Option<Assignment> {
        let rule: MatchRule = self.config.fallback_match;
        let mut best: Option<(&str, &PurchaseRecord)> = None;

        for store in self.index.stores() {
            for (key, records) in store.entries() {
                if !rule.matches(ingredient_name, key) {
                    continue;
                }
                let Some(record) = records.first() else {
                    continue;
                };
                // Strictly cheaper only, so equal prices keep the earlier find
                if best.map_or(true, |(_, b)| record.price < b.price) {
                    best = Some((store.name(), record));
                }
            }
        }

        best.map(|(store, record)| from_record(store, record, AssignmentSource::BestPrice))
    }
}

fn category_match<'s>(
    category: &CategoryRule,
    store: &'s StoreHistory,
    ingredient_name: &str,
) -> Option<(&'s str, &'s PurchaseRecord)> {
    match category.matcher {
        CategoryMatcher::FirstWord => {
            let first = first_word(ingredient_name)?;
            store.find_first(|key| {
                contains_any(key, &category.keywords) && key.contains(first.as_str())
            })
        }
        CategoryMatcher::WordOverlap(rule) => {
            store.find_first(|key| rule.matches(ingredient_name, key))
        }
    }
}

fn from_record(store: &str, record: &PurchaseRecord, source: AssignmentSource) -> Assignment {
    Assignment {
        store: store.to_string(),
        price: record.price,
        item: record.item_name.clone(),
        source,
    }
}

/// Assign every catalog ingredient to a store
pub fn assign(
    ingredients: &[IngredientRequirement],
    index: &PurchaseHistoryIndex,
    config: &PlannerConfig,
) -> Assignments {
    AssignmentEngine::new(index, config).assign_all(ingredients)
}
