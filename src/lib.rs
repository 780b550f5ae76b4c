//! # Groceries
//!
//! Ingredient quantity parsing and shopping-list aggregation: turns free-text
//! ingredient lines into typed quantities and merges the ingredients of
//! recipes scheduled over a date range into one consolidated shopping list.

pub mod categorization;
pub mod config;
pub mod errors;
pub mod ingredient_parser;
pub mod measurement_patterns;
pub mod measurement_types;
pub mod name_normalizer;
pub mod quantity_parser;
pub mod schedule;
pub mod shopping_list;
pub mod unit_conversion;
