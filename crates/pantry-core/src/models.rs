//! Domain models for Pantry

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Store name used when no store's history matches an ingredient
pub const UNKNOWN_STORE: &str = "Unknown";

/// Historical item text used when no store's history matches an ingredient
pub const NOT_FOUND_ITEM: &str = "Not found in history";

/// A single spreadsheet value as read at the load boundary
///
/// Formula cells that were never evaluated arrive as `Text`, which is how the
/// purchase index tells them apart from real prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Numeric value, only for cells that hold a real number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text content of the cell, `None` when blank
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            // Whole numbers print without a trailing ".0" (meal codes, counts)
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

/// One ingredient line from the ingredients sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientRequirement {
    /// Meal code (e.g. "1", "A")
    pub code: String,
    pub meal_name: String,
    pub ingredient_name: String,
    pub qty_needed: Cell,
    pub unit: String,
    pub total_qty: Cell,
    pub cost_total: Cell,
    /// Optional eighth column, kept only when numeric
    pub cost_for_qty: Option<f64>,
}

/// One retained line from the itemized purchase sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRecord {
    pub date: Cell,
    /// Receipt wording, original casing
    pub item_name: String,
    pub qty: Cell,
    pub unit: String,
    /// Always a strictly positive number
    pub price: f64,
}

impl PurchaseRecord {
    /// Best-effort calendar date for the purchase
    pub fn purchase_date(&self) -> Option<NaiveDate> {
        match &self.date {
            Cell::Text(s) => parse_date(s),
            _ => None,
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    // Spreadsheet exports often carry a midnight time component
    let s = s.split_whitespace().next()?;

    let formats = [
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%Y-%m-%d", // 2024-01-15
        "%m-%d-%Y", // 01-15-2024
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Which branch of the assignment engine resolved an ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignmentSource {
    /// Forced by a manual store override
    Override,
    /// Matched by a category heuristic (e.g. "meat", "produce")
    Category { name: String },
    /// Cheapest matching item across all stores
    BestPrice,
    /// Nothing matched anywhere
    NotFound,
}

impl AssignmentSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Override => "override",
            Self::Category { name } => name,
            Self::BestPrice => "best price",
            Self::NotFound => "not found",
        }
    }
}

impl std::fmt::Display for AssignmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where to buy one ingredient and what it cost last time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub store: String,
    /// Zero means the price is unknown, not that the item is free
    pub price: f64,
    /// Historical item name, or a placeholder when not in history
    pub item: String,
    pub source: AssignmentSource,
}

impl Assignment {
    /// The terminal "nothing matched" assignment
    pub fn not_found() -> Self {
        Self {
            store: UNKNOWN_STORE.to_string(),
            price: 0.0,
            item: NOT_FOUND_ITEM.to_string(),
            source: AssignmentSource::NotFound,
        }
    }

    /// Whether this assignment came from a real historical purchase
    pub fn has_history(&self) -> bool {
        self.price > 0.0
    }
}

/// One line on a store's shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub ingredient_name: String,
    pub qty: Cell,
    pub unit: String,
    pub price: f64,
    pub meal_code: String,
    pub historical_item: String,
}

/// All line items assigned to one store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreGroup {
    pub store: String,
    pub items: Vec<LineItem>,
    pub total: f64,
}

/// Shopping plan grouped by store, largest total first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingPlan {
    pub stores: Vec<StoreGroup>,
    pub grand_total: f64,
}

impl ShoppingPlan {
    pub fn store(&self, name: &str) -> Option<&StoreGroup> {
        self.stores.iter().find(|g| g.store == name)
    }

    pub fn item_count(&self) -> usize {
        self.stores.iter().map(|g| g.items.len()).sum()
    }

    /// Pretty-printed JSON for `--format json`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Price seen for an ingredient at one store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorePrice {
    pub store: String,
    pub price: f64,
    pub item: String,
}

/// Side-by-side store prices for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceComparison {
    pub ingredient_name: String,
    /// One entry per store with a match, in store order
    pub prices: Vec<StorePrice>,
}

impl PriceComparison {
    /// Cheapest store; ties go to the earlier store
    pub fn cheapest(&self) -> Option<&StorePrice> {
        self.prices.iter().fold(None, |best: Option<&StorePrice>, p| match best {
            Some(b) if b.price <= p.price => Some(b),
            _ => Some(p),
        })
    }
}
