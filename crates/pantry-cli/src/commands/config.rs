//! Configuration inspection commands

use std::path::Path;

use anyhow::{Context, Result};
use pantry_core::config::default_config_path;
use pantry_core::{CategoryMatcher, ConfigSource, MatchRule, PlannerConfig};

pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let (config, source) =
        PlannerConfig::load(config_path).context("Failed to load planner config")?;
    print!("{}", render_config(&config, &source));
    Ok(())
}

pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    let (_, source) = PlannerConfig::load(config_path).context("Failed to load planner config")?;

    println!("⚙️  Active config: {}", source);
    match default_config_path() {
        Some(path) => {
            let marker = if path.exists() { "" } else { " (not present)" };
            println!("   Override path: {}{}", path.display(), marker);
        }
        None => println!("   Override path: unavailable (no data directory)"),
    }
    Ok(())
}

fn describe_rule(rule: &MatchRule) -> String {
    if rule.exact_substring {
        format!("min word length {}, or exact substring", rule.min_word_len)
    } else {
        format!("min word length {}", rule.min_word_len)
    }
}

pub fn render_config(config: &PlannerConfig, source: &ConfigSource) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("⚙️  Planner Configuration\n");
    out.push_str(&format!("   Source: {}\n", source));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    out.push_str(&format!("   Stores: {}\n", config.stores.join(", ")));
    out.push_str(&format!("   Already owned: {}\n", config.exclusions.join(", ")));

    out.push('\n');
    out.push_str("📌 Overrides\n");
    for ov in &config.overrides {
        let keywords = if ov.keywords.is_empty() {
            "(none)".to_string()
        } else {
            ov.keywords.join(", ")
        };
        out.push_str(&format!("   {:10} │ {}\n", ov.store, keywords));
    }

    out.push('\n');
    out.push_str("🏷️  Categories\n");
    for category in &config.categories {
        let matcher = match &category.matcher {
            CategoryMatcher::FirstWord => category.matcher.as_str().to_string(),
            CategoryMatcher::WordOverlap(rule) => {
                format!("{} ({})", category.matcher.as_str(), describe_rule(rule))
            }
        };
        out.push_str(&format!(
            "   {} → {} [{}]\n",
            category.name,
            category.stores.join(", "),
            matcher
        ));
        out.push_str(&format!("      {}\n", category.keywords.join(", ")));
    }

    out.push('\n');
    out.push_str("🔎 Matching\n");
    out.push_str(&format!("   Override: {}\n", describe_rule(&config.override_match)));
    out.push_str(&format!("   Fallback: {}\n", describe_rule(&config.fallback_match)));
    out.push_str(&format!("   Compare:  {}\n", describe_rule(&config.compare_match)));

    out
}
