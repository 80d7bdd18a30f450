//! CSV readers for the ingredients and itemized purchase sheets
//!
//! Both sheets are exported from the meal cost workbook with a header row.
//! Cells are classified once here, so downstream code never has to guess
//! whether a price column held a number or an unevaluated formula.

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Cell;

/// Column positions in the itemized purchase sheet
mod purchase_cols {
    pub const DATE: usize = 0;
    pub const LOCATION: usize = 2;
    pub const ITEM: usize = 7;
    pub const QTY: usize = 8;
    pub const UNIT: usize = 9;
    pub const PRICE: usize = 10;
}

/// A row from the ingredients sheet
///
/// Columns: code, meal, ingredient, qty needed, unit, total qty, cost total,
/// and an optional cost-for-qty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientRow {
    pub code: Cell,
    pub meal_name: Cell,
    pub ingredient_name: Cell,
    pub qty_needed: Cell,
    pub unit: Cell,
    pub total_qty: Cell,
    pub cost_total: Cell,
    pub cost_for_qty: Cell,
}

/// A row from the itemized purchase sheet (only the columns the planner reads)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseRow {
    pub date: Cell,
    pub location: Cell,
    pub item_name: Cell,
    pub qty: Cell,
    pub unit: Cell,
    pub price: Cell,
}

/// Classify a raw CSV field
///
/// Blank fields are `Empty`. Fields that read as a number once `$` and
/// thousands separators are removed are `Number`. Everything else, including
/// formulas like `=B2*C2`, stays `Text`.
pub fn parse_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if trimmed.starts_with('=') {
        return Cell::Text(trimmed.to_string());
    }

    let cleaned = trimmed.replace(['$', ','], "");
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(trimmed.to_string()),
    }
}

/// Classify a raw CSV field that names something (code, item, unit, ...)
///
/// Blank fields are `Empty`; anything else is kept as `Text` exactly as
/// written, so "007" stays "007".
pub fn text_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(trimmed.to_string())
    }
}

fn cell_at(record: &StringRecord, index: usize) -> Cell {
    record.get(index).map(parse_cell).unwrap_or_default()
}

fn text_at(record: &StringRecord, index: usize) -> Cell {
    record.get(index).map(text_cell).unwrap_or_default()
}

fn read_records<R: Read>(reader: R) -> Result<Vec<StringRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    if rdr.headers()?.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::InvalidData("Sheet has no header row".into()));
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }
    Ok(records)
}

/// Read the ingredients sheet
pub fn read_ingredient_rows<R: Read>(reader: R) -> Result<Vec<IngredientRow>> {
    let rows: Vec<IngredientRow> = read_records(reader)?
        .iter()
        .map(|record| IngredientRow {
            code: text_at(record, 0),
            meal_name: text_at(record, 1),
            ingredient_name: text_at(record, 2),
            qty_needed: cell_at(record, 3),
            unit: text_at(record, 4),
            total_qty: cell_at(record, 5),
            cost_total: cell_at(record, 6),
            cost_for_qty: cell_at(record, 7),
        })
        .collect();

    debug!("Read {} ingredient rows", rows.len());
    Ok(rows)
}

/// Read the itemized purchase sheet
pub fn read_purchase_rows<R: Read>(reader: R) -> Result<Vec<PurchaseRow>> {
    let rows: Vec<PurchaseRow> = read_records(reader)?
        .iter()
        .map(|record| PurchaseRow {
            date: text_at(record, purchase_cols::DATE),
            location: text_at(record, purchase_cols::LOCATION),
            item_name: text_at(record, purchase_cols::ITEM),
            qty: cell_at(record, purchase_cols::QTY),
            unit: text_at(record, purchase_cols::UNIT),
            price: cell_at(record, purchase_cols::PRICE),
        })
        .collect();

    debug!("Read {} purchase rows", rows.len());
    Ok(rows)
}

/// Read the ingredients sheet from a file
pub fn read_ingredient_file(path: &Path) -> Result<Vec<IngredientRow>> {
    read_ingredient_rows(File::open(path)?)
}

/// Read the itemized purchase sheet from a file
pub fn read_purchase_file(path: &Path) -> Result<Vec<PurchaseRow>> {
    read_purchase_rows(File::open(path)?)
}
