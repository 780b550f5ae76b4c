//! # Ingredient Parser
//!
//! This module splits a raw ingredient line, typed by a user or scraped from a
//! recipe page, into its quantity text, name, description and optional flag.
//!
//! ## Features
//!
//! - Comma heuristic for the name/description boundary, skipping commas that
//!   follow descriptors ("skinless, boneless") or units ("1 cup, packed")
//! - Ranges ("4 to 6"), unicode fractions and attached units ("500g")
//! - Parenthetical and alternate measurements kept with the quantity
//!   ("1/2 cup (8 Tablespoons)/115 grams")
//! - Optional markers stripped from the end of the name or description
//!
//! ## Usage
//!
//! ```rust
//! use groceries::ingredient_parser::parse_ingredient;
//!
//! let parsed = parse_ingredient("2 garlic cloves, grated");
//! assert_eq!(parsed.quantity, "2");
//! assert_eq!(parsed.name, "garlic cloves");
//! assert_eq!(parsed.description, "grated");
//! assert!(!parsed.optional);
//! ```

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::IngredientParserConfig;
use crate::measurement_patterns::{
    is_comma_descriptor, is_unit_word, unicode_fraction, TWO_WORD_UNIT_HEADS, TWO_WORD_UNIT_TAILS,
};

/// Quantity text used when a line carries no quantity
pub const DEFAULT_QUANTITY: &str = "some";

/// Suffixes marking an ingredient as optional, checked in order
const OPTIONAL_SUFFIXES: &[&str] = &["(optional)", "[optional]", "optional"];

/// The parts of one ingredient line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientResult {
    /// Quantity text as typed (e.g. "2", "1 1/2 cups", "some")
    pub quantity: String,
    /// Ingredient name (e.g. "garlic cloves")
    pub name: String,
    /// Text after the name/description comma (e.g. "grated")
    pub description: String,
    /// Whether the line was marked optional
    pub optional: bool,
}

/// Ingredient line splitter
#[derive(Debug, Clone, Default)]
pub struct IngredientParser {
    config: IngredientParserConfig,
}

impl IngredientParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use groceries::config::IngredientParserConfig;
    /// use groceries::ingredient_parser::IngredientParser;
    ///
    /// let parser = IngredientParser::with_config(IngredientParserConfig {
    ///     normalize_name_case: false,
    ///     ..Default::default()
    /// });
    /// assert_eq!(parser.parse("2 Garlic cloves").name, "Garlic cloves");
    /// ```
    pub fn with_config(config: IngredientParserConfig) -> Self {
        debug!(
            "Creating IngredientParser: normalize_name_case={}, strip_optional_marker={}, max_name_length={}",
            config.normalize_name_case, config.strip_optional_marker, config.max_name_length
        );
        Self { config }
    }

    /// Split one ingredient line. Never fails.
    pub fn parse(&self, line: &str) -> IngredientResult {
        let line = line.trim();
        let (head, description) = split_description(line);
        let (quantity, mut name) = split_quantity_and_name(head);
        let mut description = description.to_string();

        let optional = line.to_lowercase().contains("optional");
        if optional && self.config.strip_optional_marker {
            if let Some(stripped) = strip_optional_suffix(&description) {
                description = stripped;
            } else if let Some(stripped) = strip_optional_suffix(&name) {
                name = stripped;
            }
        }

        let has_quantity = !quantity.is_empty();
        if has_quantity && self.config.normalize_name_case && is_sentence_case(&name) {
            name = name.to_lowercase();
        }
        let name = self.limit_length(name);

        let result = IngredientResult {
            quantity: if has_quantity {
                quantity
            } else {
                DEFAULT_QUANTITY.to_string()
            },
            name,
            description,
            optional,
        };
        trace!("Parsed ingredient line '{}' -> {:?}", line, result);
        result
    }

    /// Parse every non-empty line of a block of text
    pub fn parse_list(&self, text: &str) -> Vec<IngredientResult> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.parse(line))
            .collect()
    }

    fn limit_length(&self, name: String) -> String {
        let max = self.config.max_name_length;
        if name.chars().count() <= max {
            return name;
        }

        let truncated: String = name.chars().take(max).collect();
        let cut = match truncated.rfind(' ') {
            Some(last_space) => truncated[..last_space].to_string(),
            None => truncated,
        };
        warn!(
            "Ingredient name truncated due to length limit ({} > {}): '{}' -> '{}'",
            name.chars().count(),
            max,
            name,
            cut
        );
        cut
    }
}

/// Split one ingredient line with the default configuration
pub fn parse_ingredient(line: &str) -> IngredientResult {
    IngredientParser::new().parse(line)
}

/// Split every non-empty line of a block of text with the default configuration
pub fn parse_ingredient_list(text: &str) -> Vec<IngredientResult> {
    IngredientParser::new().parse_list(text)
}

/// Find the comma that separates "quantity + name" from the description.
///
/// Commas inside brackets, or right after a descriptor or unit word, do not
/// end the name.
fn split_description(line: &str) -> (&str, &str) {
    let mut depth = 0usize;

    for (i, c) in line.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let before = line[..i].trim_end();
                let previous_word = before.rsplit(char::is_whitespace).next().unwrap_or("");
                if is_comma_descriptor(previous_word) || is_unit_word(previous_word) {
                    trace!("Comma after '{}' does not end the name", previous_word);
                } else {
                    return (before, line[i + 1..].trim());
                }
            }
            _ => {}
        }
    }

    (line, "")
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || unicode_fraction(c).is_some()
}

fn is_numeric_run_char(c: char) -> bool {
    is_number_char(c) || c.is_whitespace() || matches!(c, '.' | '/' | '⁄' | '-' | '–')
}

/// Number of leading whitespace bytes
fn leading_space(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Leading digits, fractions and range dashes.
///
/// A dash only continues the run when a number follows it. A number joined
/// to a word by a dash ("1-inch") is left for the name.
fn numeric_run(text: &str) -> &str {
    let mut end = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '-' | '–') {
            let after = text[i + c.len_utf8()..].trim_start();
            if !after.starts_with(is_number_char) {
                let before = &text[..i];
                if before.ends_with(is_number_char) {
                    end = before.trim_end_matches(|p: char| !p.is_whitespace()).len();
                }
                break;
            }
        } else if !is_numeric_run_char(c) {
            break;
        }
        end = i + c.len_utf8();
    }
    &text[..end]
}

/// "to 6" in "4 to 6 thighs"
fn range_conjunction_len(rest: &str) -> Option<usize> {
    let head = rest.get(..3)?;
    if !head.eq_ignore_ascii_case("to ") {
        return None;
    }
    let after = &rest[3..];
    let gap = leading_space(after);
    after[gap..]
        .chars()
        .next()
        .filter(|c| is_number_char(*c))
        .map(|_| 3 + gap)
}

/// A bracketed clause, possibly preceded by whitespace
fn parenthetical_len(rest: &str) -> Option<usize> {
    let gap = leading_space(rest);
    let clause = &rest[gap..];
    if !clause.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in clause.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(gap + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn word_end(text: &str) -> usize {
    text.find(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '/' | '+'))
        .unwrap_or(text.len())
}

/// A unit word (or two-word unit such as "fl oz") at the start of `rest`
fn unit_len(rest: &str) -> Option<usize> {
    let start = leading_space(rest);
    let words = &rest[start..];
    let first_end = word_end(words);
    let first = &words[..first_end];
    if first.is_empty() {
        return None;
    }

    let head = first.trim_end_matches(',').to_lowercase();
    if TWO_WORD_UNIT_HEADS.contains(&head.as_str()) {
        let after = &words[first_end..];
        let gap = leading_space(after);
        let second_text = &after[gap..];
        let second_end = word_end(second_text);
        let tail = second_text[..second_end].trim_end_matches(',').to_lowercase();
        if TWO_WORD_UNIT_TAILS.contains(&tail.as_str()) {
            return Some(start + first_end + gap + second_end);
        }
    }

    is_unit_word(first).then_some(start + first_end)
}

/// "/115", "+ 1" or "plus 1" continuing a measurement
fn continuation_len(rest: &str) -> Option<usize> {
    let gap = leading_space(rest);
    let text = &rest[gap..];

    let operator = if text.starts_with('/') || text.starts_with('+') {
        1
    } else if text.get(..5).is_some_and(|w| w.eq_ignore_ascii_case("plus ")) {
        4
    } else {
        return None;
    };

    let after = &text[operator..];
    let gap_after = leading_space(after);
    after[gap_after..]
        .chars()
        .next()
        .filter(|c| is_number_char(*c))
        .map(|_| gap + operator + gap_after)
}

/// Scan the "quantity + name" segment.
///
/// Returns the quantity text (empty when there is none) and the name.
fn split_quantity_and_name(segment: &str) -> (String, String) {
    let mut quantity = String::new();
    let mut rest = segment.trim_start();

    loop {
        let run = numeric_run(rest);
        if !run.chars().any(is_number_char) {
            break;
        }
        quantity.push_str(run);
        rest = &rest[run.len()..];

        if let Some(len) = range_conjunction_len(rest) {
            quantity.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }

        // "1 (14 ounce) can"
        if let Some(len) = parenthetical_len(rest) {
            quantity.push_str(&rest[..len]);
            rest = &rest[len..];
        }

        let Some(len) = unit_len(rest) else {
            break;
        };
        quantity.push_str(&rest[..len]);
        rest = &rest[len..];

        // "12 ounces (about 4 to 6 thighs)"
        if let Some(len) = parenthetical_len(rest) {
            quantity.push_str(&rest[..len]);
            rest = &rest[len..];
        }

        match continuation_len(rest) {
            Some(len) => {
                quantity.push_str(&rest[..len]);
                rest = &rest[len..];
            }
            None => break,
        }
    }

    let mut name = rest.trim();
    if name.get(..3).is_some_and(|w| w.eq_ignore_ascii_case("of ")) {
        name = name[3..].trim_start();
    }

    let quantity = quantity.trim().trim_end_matches(',').trim_end().to_string();
    (quantity, name.to_string())
}

fn strip_optional_suffix(text: &str) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    OPTIONAL_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix))
        .map(|suffix| {
            text[..text.len() - suffix.len()]
                .trim_end_matches(|c: char| c.is_whitespace() || c == ',')
                .to_string()
        })
}

/// First word capitalized, every other word lowercase
fn is_sentence_case(name: &str) -> bool {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return false;
    };

    let mut chars = first.chars();
    let capitalized = chars.next().is_some_and(char::is_uppercase) && !chars.any(char::is_uppercase);
    capitalized && words.all(|word| !word.chars().any(char::is_uppercase))
}
