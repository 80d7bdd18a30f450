//! Purchase history summary command

use std::path::Path;

use anyhow::Result;
use pantry_core::{PurchaseHistoryIndex, StoreSummary};

use super::{load_config, load_history, money, truncate};

pub fn cmd_history(config_path: Option<&Path>, purchases: &Path, limit: usize) -> Result<()> {
    let config = load_config(config_path, &[])?;
    let index = load_history(purchases, &config)?;

    print!("{}", render_history(&index, limit));
    Ok(())
}

/// Per-store counts, date range and the first `limit` purchases
pub fn render_history(index: &PurchaseHistoryIndex, limit: usize) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("🧾 Purchase History\n");
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    out.push_str(&format!("   {} usable purchases\n", index.record_count()));

    for summary in index.store_summaries(limit) {
        out.push('\n');
        out.push_str(&render_store(&summary));
    }

    out
}

fn render_store(summary: &StoreSummary<'_>) -> String {
    let mut out = format!(
        "🏪 {} ({} items, {} purchases)\n",
        summary.store, summary.item_count, summary.record_count
    );

    if summary.record_count == 0 {
        out.push_str("   No purchases recorded.\n");
        return out;
    }

    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        out.push_str(&format!(
            "   {} to {}\n",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        ));
    }

    out.push_str(&format!("   {:10} │ {:30} │ {:>9}\n", "Date", "Item", "Price"));
    out.push_str("   ───────────┼────────────────────────────────┼──────────\n");

    for record in &summary.records {
        let date = record
            .purchase_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| record.date.to_string());
        out.push_str(&format!(
            "   {:10} │ {:30} │ {:>9}\n",
            truncate(&date, 10),
            truncate(&record.item_name, 30),
            money(record.price)
        ));
    }

    if summary.remaining() > 0 {
        out.push_str(&format!("   ... and {} more\n", summary.remaining()));
    }

    out
}
