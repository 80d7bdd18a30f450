//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use pantry_core::catalog::group_by_meal;
use pantry_core::compare::compare;
use pantry_core::config::DEFAULT_CONFIG;
use pantry_core::freshness::categorize;
use pantry_core::{assign, group, AssignmentSummary, ConfigSource, PlannerConfig};
use tempfile::TempDir;

use crate::commands::{self, truncate, OutputFormat};

const INGREDIENTS: &str = "\
Code,Meal,Ingredient,Qty Needed,Unit,Total Qty,Cost Total,Cost For Qty
1,Chicken Kale Bowl,Chicken Breast,1.5,lb,3,14.99,7.50
1,Chicken Kale Bowl,Organic Kale,1,bunch,1,1.99,
1,Chicken Kale Bowl,Olive Oil,2,tbsp,,,
2,Quinoa Salad,Quinoa,1,cup,4,3.49,
2,Quinoa Salad,Feta Cheese,2,oz,,,
10,Pasta Night,Whole Wheat Pasta,8,oz,,,
";

const PURCHASES: &str = "\
Date,Receipt,Location,Payment,Category,Subcategory,Note,Item,Qty,Unit,Price
01/05/2024,R1,Costco,Visa,Grocery,,,Boneless Chicken Thigh,1,pack,14.99
01/05/2024,R1,Costco,Visa,Grocery,,,Organic Quinoa,1,bag,3.49
01/05/2024,R1,Costco,Visa,Grocery,,,Organic Pasta 6pk,1,pack,8.99
01/12/2024,R2,Safeway,Visa,Grocery,,,Quinoa Tri-Color,1,bag,4.99
01/20/2024,R3,H-Mart,Visa,Grocery,,,Kale Bunch,1,ea,1.99
01/21/2024,R4,Walmart,Visa,Grocery,,,Organic Quinoa,1,bag,1.00
";

struct Fixture {
    _dir: TempDir,
    config: PathBuf,
    ingredients: PathBuf,
    purchases: PathBuf,
}

/// Write the sample sheets and the built-in config to a temp dir
fn setup_fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("planner.toml");
    let ingredients = dir.path().join("ingredients.csv");
    let purchases = dir.path().join("purchases.csv");
    fs::write(&config, DEFAULT_CONFIG).unwrap();
    fs::write(&ingredients, INGREDIENTS).unwrap();
    fs::write(&purchases, PURCHASES).unwrap();
    Fixture {
        _dir: dir,
        config,
        ingredients,
        purchases,
    }
}

fn load(fx: &Fixture) -> (PlannerConfig, Vec<pantry_core::IngredientRequirement>) {
    let config = commands::load_config(Some(&fx.config), &[]).unwrap();
    let catalog = commands::load_catalog(&fx.ingredients, &config).unwrap();
    (config, catalog)
}

// ========== Loading Tests ==========

#[test]
fn test_load_catalog_applies_exclusions() {
    let fx = setup_fixture();
    let config = commands::load_config(Some(&fx.config), &["FETA".to_string()]).unwrap();
    let catalog = commands::load_catalog(&fx.ingredients, &config).unwrap();

    let names: Vec<&str> = catalog.iter().map(|i| i.ingredient_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Chicken Breast", "Organic Kale", "Quinoa", "Whole Wheat Pasta"]
    );
}

#[test]
fn test_load_missing_file_has_context() {
    let fx = setup_fixture();
    let config = commands::load_config(Some(&fx.config), &[]).unwrap();
    let err = commands::load_catalog(Path::new("/nonexistent/ingredients.csv"), &config)
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read ingredients file"));
}

#[test]
fn test_load_config_missing_explicit_path() {
    let result = commands::load_config(Some(Path::new("/nonexistent/planner.toml")), &[]);
    assert!(result.is_err());
}

#[test]
fn test_load_history_filters_stores() {
    let fx = setup_fixture();
    let config = commands::load_config(Some(&fx.config), &[]).unwrap();
    let index = commands::load_history(&fx.purchases, &config).unwrap();
    assert_eq!(index.record_count(), 5);
    assert!(index.store("Walmart").is_none());
}

#[test]
fn test_output_format_parse() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("yaml".parse::<OutputFormat>().is_err());
}

// ========== Plan Command Tests ==========

#[test]
fn test_cmd_plan_text_and_json() {
    let fx = setup_fixture();
    for format in [OutputFormat::Text, OutputFormat::Json] {
        let result =
            commands::cmd_plan(Some(&fx.config), &fx.ingredients, &fx.purchases, format, &[]);
        assert!(result.is_ok());
    }
}

#[test]
fn test_render_plan() {
    let fx = setup_fixture();
    let (config, catalog) = load(&fx);
    let index = commands::load_history(&fx.purchases, &config).unwrap();
    let assignments = assign(&catalog, &index, &config);
    let plan = group(&catalog, &assignments);

    let text = commands::render_plan(&plan);
    assert!(text.contains("COSTCO ($27.47 total, 3 items)"));
    assert!(text.contains("H-MART ($1.99 total, 1 items)"));
    assert!(text.contains("Grand total: $29.46"));
    assert!(text.contains("Boneless Chicken Thigh"));
    // Feta has no history anywhere
    assert!(text.contains("1 line(s) have no purchase history"));

    // Costco is listed before H-Mart
    let costco = text.find("COSTCO").unwrap();
    let hmart = text.find("H-MART").unwrap();
    assert!(costco < hmart);

    let summary = commands::render_summary(&AssignmentSummary::from_assignments(&assignments));
    assert!(summary.contains("1 override"));
    assert!(summary.contains("1 not found"));
}

#[test]
fn test_render_empty_plan() {
    let plan = group(&[], &Default::default());
    let text = commands::render_plan(&plan);
    assert!(text.contains("Nothing to buy."));
}

// ========== Compare Command Tests ==========

#[test]
fn test_cmd_compare() {
    let fx = setup_fixture();
    let result = commands::cmd_compare(
        Some(&fx.config),
        &fx.ingredients,
        &fx.purchases,
        OutputFormat::Text,
        &[],
    );
    assert!(result.is_ok());
}

#[test]
fn test_render_comparisons() {
    let fx = setup_fixture();
    let (config, catalog) = load(&fx);
    let index = commands::load_history(&fx.purchases, &config).unwrap();
    let comparisons = compare(&catalog, &index, config.compare_match);

    let text = commands::render_comparisons(&comparisons, &config.stores);
    let quinoa = text.lines().find(|l| l.contains("Quinoa")).unwrap();
    assert!(quinoa.contains("$3.49"));
    assert!(quinoa.contains("$4.99"));
    assert!(quinoa.trim_end().ends_with("Costco"));
    assert!(text.contains("1 ingredient(s) not found at any store"));
}

// ========== Meals Command Tests ==========

#[test]
fn test_cmd_meals() {
    let fx = setup_fixture();
    let result = commands::cmd_meals(Some(&fx.config), &fx.ingredients, &[]);
    assert!(result.is_ok());
}

#[test]
fn test_render_meals_orders_codes_numerically() {
    let fx = setup_fixture();
    let (_, catalog) = load(&fx);
    let text = commands::render_meals(&group_by_meal(&catalog));

    let quinoa = text.find("[2] Quinoa Salad").unwrap();
    let pasta = text.find("[10] Pasta Night").unwrap();
    assert!(quinoa < pasta);
    assert!(text.contains("1.5 lb"));
    assert!(text.contains("3 meals, 5 ingredient lines"));
}

// ========== History Command Tests ==========

#[test]
fn test_cmd_history() {
    let fx = setup_fixture();
    let result = commands::cmd_history(Some(&fx.config), &fx.purchases, 10);
    assert!(result.is_ok());
}

#[test]
fn test_render_history_limit() {
    let fx = setup_fixture();
    let config = commands::load_config(Some(&fx.config), &[]).unwrap();
    let index = commands::load_history(&fx.purchases, &config).unwrap();

    let text = commands::render_history(&index, 1);
    assert!(text.contains("Costco (3 items, 3 purchases)"));
    assert!(text.contains("2024-01-05"));
    assert!(text.contains("... and 2 more"));
    assert!(!text.contains("Organic Quinoa"));
}

// ========== Freshness Command Tests ==========

#[test]
fn test_cmd_freshness() {
    let fx = setup_fixture();
    let result = commands::cmd_freshness(Some(&fx.config), &fx.ingredients, &[]);
    assert!(result.is_ok());
}

#[test]
fn test_render_freshness() {
    let fx = setup_fixture();
    let (config, catalog) = load(&fx);
    let text = commands::render_freshness(&categorize(&catalog, &config.freshness));

    assert!(text.contains("Highly perishable (use within 3-5 days)"));
    assert!(text.contains("• Organic Kale [meal 1]"));
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config() {
    let fx = setup_fixture();
    assert!(commands::cmd_config_show(Some(&fx.config)).is_ok());
    assert!(commands::cmd_config_path(Some(&fx.config)).is_ok());
}

#[test]
fn test_render_config() {
    let text = commands::render_config(&PlannerConfig::default(), &ConfigSource::Embedded);
    assert!(text.contains("Source: built-in defaults"));
    assert!(text.contains("Stores: Costco, Safeway, H-Mart"));
    assert!(text.contains("meat → Costco, Safeway [first_word]"));
    assert!(text.contains("Safeway    │ (none)"));
    assert!(text.contains("Fallback: min word length 3, or exact substring"));
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello world", 8), "hello...");
    assert_eq!(truncate("crème fraîche", 8), "crème...");
}
