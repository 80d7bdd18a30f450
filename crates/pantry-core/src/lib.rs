//! Pantry Core Library
//!
//! Shared functionality for the Pantry grocery shopping planner:
//! - CSV readers for the ingredients and itemized purchase sheets
//! - Ingredient catalog with already-owned exclusions
//! - Purchase history index by store and item
//! - Store assignment engine (overrides, category heuristics, best price)
//! - Store grouping and totals
//! - Price comparison and freshness labeling
//! - TOML planner configuration with embedded defaults

pub mod assign;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod freshness;
pub mod history;
pub mod matcher;
pub mod models;
pub mod plan;
pub mod table;

pub use assign::{assign, AssignmentEngine, AssignmentSummary, Assignments};
pub use config::{CategoryMatcher, CategoryRule, ConfigSource, PlannerConfig, StoreOverride};
pub use error::{Error, Result};
pub use history::{PurchaseHistoryIndex, StoreHistory, StoreSummary};
pub use matcher::MatchRule;
pub use models::{
    Assignment, AssignmentSource, Cell, IngredientRequirement, LineItem, PriceComparison,
    PurchaseRecord, ShoppingPlan, StoreGroup, StorePrice,
};
pub use plan::{build_plan, group};
