//! # Configuration Module
//!
//! This module defines the configuration structures for ingredient line
//! parsing and shopping-list aggregation, plus loading overrides from the
//! environment.

use anyhow::{Context, Result};
use log::debug;
use std::env;

// Constants for parsing and aggregation
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;
pub const CATEGORIZE_ENV: &str = "GROCERIES_CATEGORIZE";
pub const MAX_NAME_LENGTH_ENV: &str = "GROCERIES_MAX_NAME_LENGTH";

/// Configuration for the ingredient line splitter
#[derive(Debug, Clone)]
pub struct IngredientParserConfig {
    /// Lower-case sentence-case names that follow a quantity ("2 Garlic cloves")
    pub normalize_name_case: bool,
    /// Remove "(optional)", "[optional]" and "optional" suffixes
    pub strip_optional_marker: bool,
    /// Names longer than this are truncated at a word boundary
    pub max_name_length: usize,
}

impl Default for IngredientParserConfig {
    fn default() -> Self {
        Self {
            normalize_name_case: true,
            strip_optional_marker: true,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

/// Configuration for shopping-list aggregation
#[derive(Debug, Clone)]
pub struct ShoppingListConfig {
    /// Attach a department to every item
    pub categorize: bool,
}

impl Default for ShoppingListConfig {
    fn default() -> Self {
        Self { categorize: true }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default)]
pub struct GroceriesConfig {
    pub parser: IngredientParserConfig,
    pub shopping_list: ShoppingListConfig,
}

/// Build the configuration from defaults overridden by environment variables.
///
/// Unset variables keep their default; set but unparsable ones are an error.
pub fn from_env() -> Result<GroceriesConfig> {
    let mut config = GroceriesConfig::default();

    if let Ok(value) = env::var(CATEGORIZE_ENV) {
        config.shopping_list.categorize = parse_flag(&value)
            .with_context(|| format!("Invalid {CATEGORIZE_ENV} value '{value}'"))?;
    }

    if let Ok(value) = env::var(MAX_NAME_LENGTH_ENV) {
        config.parser.max_name_length = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {MAX_NAME_LENGTH_ENV} value '{value}'"))?;
    }

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GroceriesConfig::default();
        assert!(config.parser.normalize_name_case);
        assert!(config.parser.strip_optional_marker);
        assert_eq!(config.parser.max_name_length, DEFAULT_MAX_NAME_LENGTH);
        assert!(config.shopping_list.categorize);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" ON ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(!parse_flag("no").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
