//! # Quantity Parser
//!
//! Turns a quantity string such as `"1 1/2 cups"`, `"4-5"`, `"1¾ lb"` or
//! `"1 Tablespoon + 1 teaspoon"` into a [`Quantity`].
//!
//! Parsing never fails. Malformed numbers fall back to an amount of one and
//! labels that match no unit rule are kept as [`Unit::Unknown`].
//!
//! ## Usage
//!
//! ```rust
//! use groceries::quantity_parser::parse_quantity;
//! use groceries::measurement_types::Unit;
//!
//! let quantity = parse_quantity("1 1/2 cups");
//! assert_eq!(quantity.unit(), Unit::Cup);
//! assert_eq!(quantity.to_string(), "1.5 cup");
//! ```

use fraction::{CheckedAdd, Fraction};
use log::{debug, trace, warn};

use crate::measurement_patterns::{is_malformed_unit, unicode_fraction, UNIT_RULES};
use crate::measurement_types::{Quantity, Unit};
use crate::unit_conversion::add;

/// Parse a quantity string into a [`Quantity`]
pub fn parse_quantity(text: &str) -> Quantity {
    let normalized = normalize_unicode_fractions(text);
    let quantity = parse_normalized(&normalized);
    debug!("Parsed quantity '{}' -> {:?}", text, quantity);
    quantity
}

/// Replace unicode vulgar fractions with their ASCII form.
///
/// A space is inserted when the fraction directly follows a digit, so
/// `"1¾"` becomes `"1 3/4"` rather than `"13/4"`.
pub fn normalize_unicode_fractions(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut previous: Option<char> = None;

    for c in text.chars() {
        if c == '⁄' {
            normalized.push('/');
        } else if let Some(ascii) = unicode_fraction(c) {
            if previous.is_some_and(|p| p.is_ascii_digit()) {
                normalized.push(' ');
            }
            normalized.push_str(ascii);
        } else {
            normalized.push(c);
        }
        previous = Some(c);
    }

    normalized
}

fn parse_normalized(text: &str) -> Quantity {
    if let Some((left, right)) = split_sum(text) {
        let a = parse_normalized(left);
        let b = parse_normalized(right);
        return match add(&a, &b) {
            Ok(sum) => sum,
            Err(err) => {
                warn!("Keeping first part of quantity '{}': {}", text, err);
                a
            }
        };
    }

    let without_notes = strip_parentheticals(text);
    let upper = upper_bound(&without_notes);
    let (numeric, label) = split_numeric_and_label(upper);

    let label = clean_label(&label);
    let label = if is_malformed_unit(label) {
        trace!("Discarding malformed unit label '{}'", label);
        ""
    } else {
        label
    };

    let amount = parse_amount(&numeric);
    match resolve_unit(label) {
        Some(unit) => Quantity::new(amount, unit),
        None => Quantity::unknown(amount, label),
    }
}

/// Split "a + b" or "a plus b" at the first operator
fn split_sum(text: &str) -> Option<(&str, &str)> {
    if let Some(split) = text.split_once('+') {
        return Some(split);
    }
    let lower = text.to_ascii_lowercase();
    lower
        .find(" plus ")
        .map(|pos| (&text[..pos], &text[pos + " plus ".len()..]))
}

/// Drop balanced "( ... )" clauses, which hold alternate measurements
fn strip_parentheticals(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => kept.push(c),
            _ => {}
        }
    }

    if depth > 0 {
        // unbalanced, leave the text alone
        return text.to_string();
    }
    kept
}

/// Reduce a range to its upper bound: "4 to 6" -> "6", "4-5" -> "5"
///
/// Only a dash that follows a number separates a range, so hyphenated
/// labels such as "extra-large" stay whole.
fn upper_bound(text: &str) -> &str {
    if let Some((_, last)) = text.rsplit_once(" to ") {
        return last;
    }
    let range_dash = text
        .match_indices(['-', '–'])
        .filter(|(pos, _)| {
            text[..*pos]
                .trim_end()
                .ends_with(|c: char| c.is_ascii_digit())
        })
        .last();
    match range_dash {
        Some((pos, dash)) => &text[pos + dash.len()..],
        None => text,
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == ' ' || c == '.' || c == '/'
}

/// Separate the leading numeric field from the unit label.
///
/// The label starts at the first non-numeric character and runs until the
/// next digit or `/`, so multi-word labels are captured whole.
fn split_numeric_and_label(text: &str) -> (String, String) {
    let mut numeric = String::new();
    let mut label = String::new();

    for c in text.trim().chars() {
        if label.is_empty() {
            if is_numeric_char(c) {
                numeric.push(c);
            } else {
                label.push(c);
            }
        } else if c.is_ascii_digit() || c == '/' {
            break;
        } else {
            label.push(c);
        }
    }

    trace!("Split quantity into numeric='{}', label='{}'", numeric, label);
    (numeric, label)
}

fn clean_label(label: &str) -> &str {
    label.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Resolve a unit label through the ordered alias rules.
///
/// Returns `Some(Unit::None)` for an empty label and `None` when no rule
/// matches. A multi-word label that matches no rule as a whole is retried
/// with its last word, so "heaping tbsp" resolves to a tablespoon.
pub fn resolve_unit(label: &str) -> Option<Unit> {
    if label.is_empty() {
        return Some(Unit::None);
    }
    match_unit_rule(label).or_else(|| {
        let (_, last) = label.rsplit_once(char::is_whitespace)?;
        let unit = match_unit_rule(last)?;
        trace!("Resolved unit label '{}' by its last word", label);
        Some(unit)
    })
}

fn match_unit_rule(label: &str) -> Option<Unit> {
    let lower = label.to_lowercase();
    UNIT_RULES
        .iter()
        .find(|rule| (rule.matches)(label, &lower))
        .map(|rule| rule.unit)
}

/// Sum the whitespace separated terms of a numeric field.
///
/// Any malformed term (and an empty field) yields an amount of one, as does
/// a sum too large to represent.
pub fn parse_amount(numeric: &str) -> Fraction {
    let one = Fraction::new(1u64, 1u64);
    let mut total = Fraction::new(0u64, 1u64);
    let mut terms = 0;

    for term in numeric.split_whitespace() {
        match parse_term(term).and_then(|value| total.checked_add(&value)) {
            Some(sum) => total = sum,
            None => {
                debug!("Malformed amount '{}', defaulting to 1", numeric);
                return one;
            }
        }
        terms += 1;
    }

    if terms == 0 {
        one
    } else {
        total
    }
}

fn parse_term(term: &str) -> Option<Fraction> {
    match term.split_once('/') {
        Some((numer, denom)) => {
            let numer: u64 = numer.parse().ok()?;
            let denom: u64 = denom.parse().ok()?;
            if denom == 0 {
                return None;
            }
            Some(Fraction::new(numer, denom))
        }
        None => parse_decimal(term),
    }
}

fn parse_decimal(term: &str) -> Option<Fraction> {
    let (whole, fractional) = term.split_once('.').unwrap_or((term, ""));
    if whole.is_empty() && fractional.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fractional.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let digits = format!("{whole}{fractional}");
    let numer: u64 = digits.parse().ok()?;
    let scale = 10u64.checked_pow(u32::try_from(fractional.len()).ok()?)?;
    Some(Fraction::new(numer, scale))
}
