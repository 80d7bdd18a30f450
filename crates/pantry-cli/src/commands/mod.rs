//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared loading utilities (config, ingredients, purchase history)
//! - `plan` - Shopping plan command
//! - `compare` - Store price comparison command
//! - `meals` - Per-meal ingredient listing
//! - `history` - Purchase history summary
//! - `freshness` - Perishability grouping
//! - `config` - Configuration inspection (show, path)

pub mod compare;
pub mod config;
pub mod core;
pub mod freshness;
pub mod history;
pub mod meals;
pub mod plan;

// Re-export command functions for main.rs
pub use compare::*;
pub use config::*;
pub use core::*;
pub use freshness::*;
pub use history::*;
pub use meals::*;
pub use plan::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
