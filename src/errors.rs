//! # Error Types Module
//!
//! This module defines the error types returned by the quantity arithmetic,
//! the department table check and schedule expansion.
//!
//! Parsing itself never fails: malformed numbers degrade to an amount of one
//! and unrecognized unit labels become [`Unit::Unknown`](crate::measurement_types::Unit).

use chrono::NaiveDate;
use thiserror::Error;

use crate::categorization::Department;
use crate::measurement_types::Unit;

/// Errors raised by quantity arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Two quantities whose units cannot be summed
    #[error("cannot add {unit_a:?} to {unit_b:?}")]
    IncompatibleUnit {
        /// Unit of the left operand
        unit_a: Unit,
        /// Unit of the right operand
        unit_b: Unit,
    },
    /// The sum does not fit in the amount representation
    #[error("amount overflow adding {unit_a:?} and {unit_b:?}")]
    Overflow { unit_a: Unit, unit_b: Unit },
}

/// Errors found while checking the department keyword table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// The same keyword is listed under two departments
    #[error("keyword '{keyword}' is listed under both {first:?} and {second:?}")]
    OverlappingKeyword {
        keyword: String,
        first: Department,
        second: Department,
    },
}

/// Errors raised while expanding a recipe schedule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The start date falls after the end date
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}
