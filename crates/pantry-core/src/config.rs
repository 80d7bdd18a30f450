//! Planner configuration
//!
//! Store list, exclusions, manual overrides, category heuristics and match
//! thresholds. None of it changes while a plan is being built.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. An explicit path (`--config`), which must exist
//! 2. Override in data dir (~/.local/share/pantry/config/planner.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Sections missing from a file keep their built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::matcher::MatchRule;

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/planner.toml");

/// A store that certain ingredients are always bought at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOverride {
    pub store: String,
    pub keywords: Vec<String>,
}

/// How a category heuristic decides that an item key fits an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMatcher {
    /// Key contains a category keyword and the ingredient's first word
    FirstWord,
    /// Key passes the given word-overlap rule
    WordOverlap(MatchRule),
}

impl CategoryMatcher {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstWord => "first_word",
            Self::WordOverlap(_) => "word_overlap",
        }
    }
}

/// A category heuristic such as "meat → Costco, then Safeway"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
    /// Stores to try, highest priority first
    pub stores: Vec<String>,
    pub matcher: CategoryMatcher,
}

/// Keyword lists for freshness labeling
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FreshnessKeywords {
    pub highly_perishable: Vec<String>,
    pub moderately_perishable: Vec<String>,
    pub shelf_stable: Vec<String>,
}

/// Full planner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Ingredients already on hand (substring, case-insensitive)
    pub exclusions: Vec<String>,
    /// Stores whose history is indexed, in tie-break order
    pub stores: Vec<String>,
    /// Manual overrides in precedence order
    pub overrides: Vec<StoreOverride>,
    /// Category heuristics in precedence order
    pub categories: Vec<CategoryRule>,
    pub override_match: MatchRule,
    pub fallback_match: MatchRule,
    pub compare_match: MatchRule,
    pub freshness: FreshnessKeywords,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            exclusions: strings(&[
                "olive oil",
                "salt",
                "pepper",
                "spices",
                "garlic",
                "ginger",
                "sourdough bread",
            ]),
            stores: strings(&["Costco", "Safeway", "H-Mart"]),
            overrides: vec![
                StoreOverride {
                    store: "Costco".to_string(),
                    keywords: strings(&[
                        "blueberries",
                        "berries",
                        "brami",
                        "pasta",
                        "roma tomato",
                        "tomato",
                        "tomato sauce",
                        "tomato paste",
                        "green beans",
                        "peanut butter",
                        "avocado",
                    ]),
                },
                StoreOverride {
                    store: "H-Mart".to_string(),
                    keywords: strings(&["purple potato"]),
                },
                StoreOverride {
                    store: "Safeway".to_string(),
                    keywords: Vec::new(),
                },
            ],
            categories: vec![
                CategoryRule {
                    name: "meat".to_string(),
                    keywords: strings(&["chicken", "ground turkey", "turkey"]),
                    stores: strings(&["Costco", "Safeway"]),
                    matcher: CategoryMatcher::FirstWord,
                },
                CategoryRule {
                    name: "produce".to_string(),
                    keywords: strings(&[
                        "kale",
                        "cucumber",
                        "dill",
                        "eggplant",
                        "tomato",
                        "carrot",
                        "celery",
                        "berries",
                        "apple",
                        "grapefruit",
                        "grape",
                        "lime",
                        "lemon",
                        "parsley",
                        "sweet potato",
                        "squash",
                        "spinach",
                        "pomegranate",
                    ]),
                    stores: strings(&["H-Mart", "Costco"]),
                    matcher: CategoryMatcher::WordOverlap(MatchRule::word_overlap(0)),
                },
            ],
            override_match: MatchRule::word_overlap(3),
            fallback_match: MatchRule::word_overlap(3).with_exact_substring(),
            compare_match: MatchRule::word_overlap(0).with_exact_substring(),
            freshness: FreshnessKeywords {
                highly_perishable: strings(&[
                    "kale",
                    "parsley",
                    "dill",
                    "cucumber",
                    "berries",
                    "grapefruit",
                    "eggplant",
                    "chicken",
                    "spinach",
                    "tomato",
                    "celery",
                ]),
                moderately_perishable: strings(&[
                    "ground turkey",
                    "sweet potato",
                    "carrots",
                    "pomegranate",
                    "apple",
                    "squash",
                    "lemon",
                    "lime",
                    "egg",
                    "yogurt",
                    "feta",
                    "cheddar",
                ]),
                shelf_stable: strings(&[
                    "canned mackerel",
                    "pasta",
                    "tomato sauce",
                    "tomato paste",
                    "pearl barley",
                    "panko",
                    "peanut butter",
                    "meat stock",
                    "kimchi",
                    "frozen peas",
                    "riced cauliflower",
                    "pistachio",
                    "grapes",
                    "sourdough bread",
                    "lemon juice",
                    "parmesan",
                    "vegan cheddar",
                    "red pepper flakes",
                    "green beans",
                ]),
            },
        }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "built-in defaults"),
        }
    }
}

impl PlannerConfig {
    /// Load configuration (explicit path, then data dir override, then defaults)
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let source = resolve_source(explicit)?;
        let config = match &source {
            ConfigSource::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_config(&content)?
            }
            ConfigSource::Embedded => parse_config(DEFAULT_CONFIG)?,
        };

        debug!("Loaded planner config from {}", source);
        Ok((config, source))
    }

    /// Add exclusions on top of the configured ones
    pub fn with_extra_exclusions<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions
            .extend(extra.into_iter().filter_map(|e| normalize_exclusion(e.as_ref())));
        self
    }

    /// Check that every referenced store is an indexed store
    pub fn validate(&self) -> Result<()> {
        if self.stores.is_empty() {
            return Err(Error::Config("At least one store is required".into()));
        }

        let known = |store: &str| self.stores.iter().any(|s| s == store);

        for ov in &self.overrides {
            if !known(&ov.store) {
                return Err(Error::Config(format!(
                    "Override store '{}' is not in the store list",
                    ov.store
                )));
            }
        }

        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(Error::Config("Category name cannot be empty".into()));
            }
            if let Some(store) = category.stores.iter().find(|s| !known(s)) {
                return Err(Error::Config(format!(
                    "Category '{}' store '{}' is not in the store list",
                    category.name, store
                )));
            }
        }

        Ok(())
    }
}

/// Exclusions are matched as lowercase substrings; blanks are dropped
fn normalize_exclusion(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Store names are compared after trimming, like sheet locations
fn store_name(raw: &str) -> String {
    raw.trim().to_string()
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pantry").join("config").join("planner.toml"))
}

fn resolve_source(explicit: Option<&Path>) -> Result<ConfigSource> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(ConfigSource::File(path.to_path_buf()));
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(ConfigSource::File(path)),
        _ => Ok(ConfigSource::Embedded),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    exclusions: Option<Vec<String>>,
    stores: Option<Vec<String>>,
    overrides: Option<Vec<RawOverride>>,
    categories: Option<Vec<RawCategory>>,
    matching: Option<RawMatching>,
    freshness: Option<RawFreshness>,
}

#[derive(Debug, Deserialize)]
struct RawOverride {
    store: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    stores: Vec<String>,
    matcher: Option<RawCategoryMatcher>,
}

#[derive(Debug, Deserialize)]
struct RawCategoryMatcher {
    kind: String,
    min_word_len: Option<usize>,
    exact_substring: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawMatching {
    #[serde(rename = "override")]
    manual: Option<RawRule>,
    fallback: Option<RawRule>,
    compare: Option<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    min_word_len: Option<usize>,
    exact_substring: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawFreshness {
    highly_perishable: Option<Vec<String>>,
    moderately_perishable: Option<Vec<String>>,
    shelf_stable: Option<Vec<String>>,
}

fn apply_rule(base: MatchRule, raw: Option<RawRule>) -> MatchRule {
    match raw {
        Some(raw) => MatchRule {
            min_word_len: raw.min_word_len.unwrap_or(base.min_word_len),
            exact_substring: raw.exact_substring.unwrap_or(base.exact_substring),
        },
        None => base,
    }
}

fn parse_matcher(category: &str, raw: Option<RawCategoryMatcher>) -> Result<CategoryMatcher> {
    let Some(raw) = raw else {
        return Ok(CategoryMatcher::WordOverlap(MatchRule::default()));
    };

    match raw.kind.as_str() {
        "first_word" => Ok(CategoryMatcher::FirstWord),
        "word_overlap" => Ok(CategoryMatcher::WordOverlap(apply_rule(
            MatchRule::default(),
            Some(RawRule {
                min_word_len: raw.min_word_len,
                exact_substring: raw.exact_substring,
            }),
        ))),
        other => Err(Error::Config(format!(
            "Unknown matcher '{}' for category '{}' (expected first_word or word_overlap)",
            other, category
        ))),
    }
}

/// Parse config from TOML content, falling back to defaults per section
pub fn parse_config(content: &str) -> Result<PlannerConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = PlannerConfig::default();

    if let Some(exclusions) = raw.exclusions {
        config.exclusions = exclusions
            .iter()
            .filter_map(|e| normalize_exclusion(e))
            .collect();
    }
    if let Some(stores) = raw.stores {
        config.stores = stores.iter().map(|s| store_name(s)).collect();
    }

    if let Some(overrides) = raw.overrides {
        config.overrides = overrides
            .into_iter()
            .map(|o| StoreOverride {
                store: store_name(&o.store),
                keywords: o.keywords,
            })
            .collect();
    }

    if let Some(categories) = raw.categories {
        config.categories = categories
            .into_iter()
            .map(|c| {
                let matcher = parse_matcher(&c.name, c.matcher)?;
                Ok(CategoryRule {
                    name: c.name,
                    keywords: c.keywords,
                    stores: c.stores.iter().map(|s| store_name(s)).collect(),
                    matcher,
                })
            })
            .collect::<Result<Vec<_>>>()?;
    }

    if let Some(matching) = raw.matching {
        config.override_match = apply_rule(config.override_match, matching.manual);
        config.fallback_match = apply_rule(config.fallback_match, matching.fallback);
        config.compare_match = apply_rule(config.compare_match, matching.compare);
    }

    if let Some(freshness) = raw.freshness {
        if let Some(list) = freshness.highly_perishable {
            config.freshness.highly_perishable = list;
        }
        if let Some(list) = freshness.moderately_perishable {
            config.freshness.moderately_perishable = list;
        }
        if let Some(list) = freshness.shelf_stable {
            config.freshness.shelf_stable = list;
        }
    }

    config.validate()?;
    Ok(config)
}
