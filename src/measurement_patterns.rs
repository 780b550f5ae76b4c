//! # Measurement Patterns Module
//!
//! This module contains the curated tables used for quantity and ingredient
//! parsing: unit alias rules, unit words, malformed-unit adjectives, the
//! unicode fraction table and the descriptors that may precede a comma.
//!
//! All tables are immutable and built once per process.

use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::measurement_types::Unit;

/// Unicode vulgar fractions and their ASCII form
pub const UNICODE_FRACTIONS: &[(char, &str)] = &[
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅐', "1/7"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
    ('⅑', "1/9"),
    ('⅒', "1/10"),
];

/// Descriptive words that end up where a unit label is expected
/// ("1 large" from "1 large onion") and must be ignored
pub const MALFORMED_UNITS: &[&str] = &[
    "large",
    "medium",
    "small",
    "fresh",
    "big",
    "whole",
    "extra large",
    "extra-large",
    "jumbo",
    "ripe",
];

/// Labels that mean "an unmeasured bit of"
const SOME_WORDS: &[&str] = &["some", "to taste", "a little", "smidgen", "a pinch", "a dash"];

/// Prefixes of labels that mean "an unmeasured bit of"
const SOME_PREFIXES: &[&str] = &["pinch", "dash", "sprinkle"];

/// A unit alias rule: the label (as typed) and its lowercase form decide the match
pub struct UnitRule {
    pub unit: Unit,
    pub matches: fn(label: &str, lower: &str) -> bool,
}

/// Unit alias rules, in priority order.
///
/// Order matters: "fluid ounce" before "ounce", "kilogram" before "gram",
/// "milliliter" before "liter", and the case-sensitive "T" before "t".
pub static UNIT_RULES: &[UnitRule] = &[
    UnitRule {
        unit: Unit::Some,
        matches: is_some_label,
    },
    UnitRule {
        unit: Unit::Tablespoon,
        matches: is_tablespoon_label,
    },
    UnitRule {
        unit: Unit::Teaspoon,
        matches: is_teaspoon_label,
    },
    UnitRule {
        unit: Unit::FluidOunce,
        matches: is_fluid_ounce_label,
    },
    UnitRule {
        unit: Unit::Kilogram,
        matches: is_kilogram_label,
    },
    UnitRule {
        unit: Unit::Milliliter,
        matches: is_milliliter_label,
    },
    UnitRule {
        unit: Unit::Liter,
        matches: is_liter_label,
    },
    UnitRule {
        unit: Unit::Gram,
        matches: is_gram_label,
    },
    UnitRule {
        unit: Unit::Pound,
        matches: is_pound_label,
    },
    UnitRule {
        unit: Unit::Ounce,
        matches: is_ounce_label,
    },
    UnitRule {
        unit: Unit::Cup,
        matches: is_cup_label,
    },
    UnitRule {
        unit: Unit::Pint,
        matches: is_pint_label,
    },
    UnitRule {
        unit: Unit::Quart,
        matches: is_quart_label,
    },
    UnitRule {
        unit: Unit::Gallon,
        matches: is_gallon_label,
    },
];

fn is_some_label(_label: &str, lower: &str) -> bool {
    SOME_WORDS.contains(&lower) || SOME_PREFIXES.iter().any(|p| lower.starts_with(p))
}

fn is_tablespoon_label(label: &str, lower: &str) -> bool {
    label == "T"
        || lower.contains("tablespoon")
        || lower.starts_with("tbsp")
        || lower.starts_with("tbs")
        || lower == "tbl"
}

fn is_teaspoon_label(label: &str, lower: &str) -> bool {
    label == "t" || lower.contains("teaspoon") || lower.starts_with("tsp")
}

fn is_fluid_ounce_label(_label: &str, lower: &str) -> bool {
    lower.contains("fluid ounce")
        || lower.starts_with("fl oz")
        || lower.starts_with("fl. oz")
        || lower == "floz"
}

fn is_kilogram_label(_label: &str, lower: &str) -> bool {
    lower.contains("kilo") || lower == "kg" || lower == "kgs"
}

fn is_milliliter_label(_label: &str, lower: &str) -> bool {
    lower.contains("milliliter") || lower.contains("millilitre") || lower == "ml" || lower == "mls"
}

fn is_liter_label(_label: &str, lower: &str) -> bool {
    lower.contains("liter") || lower.contains("litre") || lower == "l"
}

fn is_gram_label(_label: &str, lower: &str) -> bool {
    lower.contains("gram") || lower == "g" || lower == "gr" || lower == "grs"
}

fn is_pound_label(_label: &str, lower: &str) -> bool {
    lower.contains("pound") || lower == "lb" || lower == "lbs"
}

fn is_ounce_label(_label: &str, lower: &str) -> bool {
    lower.contains("ounce") || lower == "oz"
}

fn is_cup_label(_label: &str, lower: &str) -> bool {
    lower.contains("cup") || lower == "c"
}

fn is_pint_label(_label: &str, lower: &str) -> bool {
    lower.contains("pint") || lower == "pt" || lower == "pts"
}

fn is_quart_label(_label: &str, lower: &str) -> bool {
    lower.contains("quart") || lower == "qt" || lower == "qts"
}

fn is_gallon_label(_label: &str, lower: &str) -> bool {
    lower.contains("gallon") || lower == "gal" || lower == "gals"
}

lazy_static! {
    /// Whole words the line splitter accepts as a unit right after a number.
    ///
    /// Unlike [`UNIT_RULES`] these are exact: "cupcakes" is not a cup.
    pub static ref UNIT_WORDS: HashSet<&'static str> = [
        // Volume
        "teaspoon", "teaspoons", "tsp", "tsps",
        "tablespoon", "tablespoons", "tbsp", "tbsps", "tbs", "tbl",
        "cup", "cups", "c",
        "pint", "pints", "pt",
        "quart", "quarts", "qt",
        "gallon", "gallons", "gal",
        "liter", "liters", "litre", "litres", "l",
        "milliliter", "milliliters", "millilitre", "millilitres", "ml",
        "floz",
        // Mass
        "ounce", "ounces", "oz",
        "pound", "pounds", "lb", "lbs",
        "gram", "grams", "g",
        "kilogram", "kilograms", "kg",
        // Unmeasured
        "pinch", "pinches", "dash", "dashes", "sprinkle",
        // Containers and counts, kept as unknown units
        "can", "cans", "bag", "bags", "package", "packages", "pkg",
        "jar", "jars", "bottle", "bottles", "stick", "sticks",
        "sprig", "sprigs", "bunch", "bunches", "slice", "slices",
        "piece", "pieces",
    ]
    .into_iter()
    .collect();

    /// Words after which a comma does not end the ingredient name
    pub static ref COMMA_DESCRIPTORS: HashSet<&'static str> = [
        "bone-in", "skin-on", "skin-off", "fresh", "frozen", "cooked", "raw",
        "skinless", "boneless", "large", "small", "medium", "ripe", "thawed",
        "uncooked", "unsalted", "salted", "organic", "whole", "shelled",
        "peeled", "seedless",
    ]
    .into_iter()
    .collect();
}

/// First words of two-word unit labels ("fl oz", "fluid ounces")
pub const TWO_WORD_UNIT_HEADS: &[&str] = &["fl", "fl.", "fluid"];

/// Second words of two-word unit labels
pub const TWO_WORD_UNIT_TAILS: &[&str] = &["oz", "oz.", "ounce", "ounces"];

/// Check whether a single word is a unit the line splitter recognizes
pub fn is_unit_word(word: &str) -> bool {
    let bare = word.trim_end_matches(['.', ',']);
    if bare == "T" || bare == "t" {
        return true;
    }
    UNIT_WORDS.contains(bare.to_lowercase().as_str())
}

/// Check whether a word preceding a comma keeps the ingredient name going
pub fn is_comma_descriptor(word: &str) -> bool {
    COMMA_DESCRIPTORS.contains(word.to_lowercase().as_str())
}

/// Check whether a unit label is really a descriptive adjective
pub fn is_malformed_unit(label: &str) -> bool {
    let lower = label.to_lowercase();
    MALFORMED_UNITS.contains(&lower.as_str())
}

/// Look up the ASCII form of a unicode vulgar fraction
pub fn unicode_fraction(c: char) -> Option<&'static str> {
    UNICODE_FRACTIONS
        .iter()
        .find(|(fraction, _)| *fraction == c)
        .map(|(_, ascii)| *ascii)
}
