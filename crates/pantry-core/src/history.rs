//! Purchase history index
//!
//! Groups retained purchase rows by store, then by lowercased item name.
//! Everything is ordered by first appearance in the source sheet: stores follow
//! the configured store list, item keys follow first insertion, and records
//! under a key follow scan order. "First record" therefore means first seen in
//! the sheet, not most recent.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Cell, PurchaseRecord};
use crate::table::PurchaseRow;

/// Purchase history for one store
#[derive(Debug, Clone, Default)]
pub struct StoreHistory {
    name: String,
    entries: Vec<(String, Vec<PurchaseRecord>)>,
    positions: HashMap<String, usize>,
    /// (entry, record) positions in source scan order
    scan_order: Vec<(usize, usize)>,
}

impl StoreHistory {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn push(&mut self, key: String, record: PurchaseRecord) {
        let entry = match self.positions.get(&key) {
            Some(&pos) => pos,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, Vec::new()));
                self.entries.len() - 1
            }
        };
        let records = &mut self.entries[entry].1;
        self.scan_order.push((entry, records.len()));
        records.push(record);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item keys with their records, in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[PurchaseRecord])> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r.as_slice()))
    }

    /// Records for a normalized (lowercase) item key
    pub fn get(&self, key: &str) -> Option<&[PurchaseRecord]> {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// First key satisfying `matches`, with that key's first record
    pub fn find_first<F>(&self, mut matches: F) -> Option<(&str, &PurchaseRecord)>
    where
        F: FnMut(&str) -> bool,
    {
        self.entries()
            .filter(|(key, _)| matches(key))
            .find_map(|(key, records)| records.first().map(|r| (key, r)))
    }

    /// Number of distinct item keys
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of retained purchase records
    pub fn record_count(&self) -> usize {
        self.scan_order.len()
    }

    /// All records in source scan order
    pub fn records(&self) -> impl Iterator<Item = &PurchaseRecord> {
        self.scan_order
            .iter()
            .map(|&(entry, idx)| &self.entries[entry].1[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Purchase history across all allowed stores
#[derive(Debug, Clone, Default)]
pub struct PurchaseHistoryIndex {
    stores: Vec<StoreHistory>,
}

/// Counts of rows dropped while building the index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub retained: usize,
    pub other_location: usize,
    pub missing_item: usize,
    pub unusable_price: usize,
}

impl PurchaseHistoryIndex {
    /// Build the index from purchase sheet rows
    ///
    /// A row is kept only when its location is one of `allowed_stores`, it has
    /// an item name, and its price is a real number greater than zero. Prices
    /// that are text (unevaluated formulas) are dropped, never parsed.
    pub fn build(rows: &[PurchaseRow], allowed_stores: &[String]) -> Self {
        Self::build_with_stats(rows, allowed_stores).0
    }

    /// Same as [`build`](Self::build), also reporting what was dropped
    pub fn build_with_stats(rows: &[PurchaseRow], allowed_stores: &[String]) -> (Self, BuildStats) {
        let mut stores: Vec<StoreHistory> = Vec::new();
        for name in allowed_stores.iter().map(|s| s.trim()) {
            if !stores.iter().any(|s| s.name == name) {
                stores.push(StoreHistory::new(name));
            }
        }

        let mut stats = BuildStats::default();

        for row in rows {
            let Some(pos) = location_of(&row.location)
                .and_then(|loc| stores.iter().position(|s| s.name == loc))
            else {
                stats.other_location += 1;
                continue;
            };

            let Some(item_name) = row.item_name.as_text() else {
                stats.missing_item += 1;
                continue;
            };

            let price = match row.price {
                Cell::Number(p) if p > 0.0 => p,
                _ => {
                    stats.unusable_price += 1;
                    continue;
                }
            };

            let key = item_name.to_lowercase();
            stores[pos].push(
                key,
                PurchaseRecord {
                    date: row.date.clone(),
                    item_name,
                    qty: row.qty.clone(),
                    unit: row.unit.as_text().unwrap_or_default(),
                    price,
                },
            );
            stats.retained += 1;
        }

        debug!(
            "Indexed {} purchases ({} other location, {} missing item, {} unusable price)",
            stats.retained, stats.other_location, stats.missing_item, stats.unusable_price
        );

        (Self { stores }, stats)
    }

    /// Stores in configured order
    pub fn stores(&self) -> impl Iterator<Item = &StoreHistory> {
        self.stores.iter()
    }

    /// Store by name; surrounding whitespace is ignored on both sides
    pub fn store(&self, name: &str) -> Option<&StoreHistory> {
        let name = name.trim();
        self.stores.iter().find(|s| s.name == name)
    }

    /// Total retained records across all stores
    pub fn record_count(&self) -> usize {
        self.stores.iter().map(|s| s.record_count()).sum()
    }

    /// Per-store counts, date range and the first `limit` records in scan order
    pub fn store_summaries(&self, limit: usize) -> Vec<StoreSummary<'_>> {
        self.stores
            .iter()
            .map(|store| {
                let dates: Vec<NaiveDate> =
                    store.records().filter_map(|r| r.purchase_date()).collect();
                StoreSummary {
                    store: store.name(),
                    item_count: store.item_count(),
                    record_count: store.record_count(),
                    first_date: dates.iter().min().copied(),
                    last_date: dates.iter().max().copied(),
                    records: store.records().take(limit).collect(),
                }
            })
            .collect()
    }
}

/// Overview of one store's history
#[derive(Debug, Clone, Serialize)]
pub struct StoreSummary<'a> {
    pub store: &'a str,
    pub item_count: usize,
    pub record_count: usize,
    /// Earliest and latest parseable purchase dates
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub records: Vec<&'a PurchaseRecord>,
}

impl StoreSummary<'_> {
    /// Records past the listing limit
    pub fn remaining(&self) -> usize {
        self.record_count.saturating_sub(self.records.len())
    }
}

fn location_of(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(s) => Some(s.trim().to_string()),
        _ => None,
    }
}
