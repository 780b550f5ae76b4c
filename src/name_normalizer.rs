//! # Name Normalizer
//!
//! Canonical grouping keys for ingredient names. "Garlic cloves",
//! "garlic clove" and "garlic-clove" all group under `"garlic clove"`, and the
//! plural form seen in the input is remembered for display.
//!
//! Inflection sits behind the [`Inflector`] trait so another rule set can be
//! plugged in without touching the aggregator.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::collections::HashMap;

/// Singular/plural conversion of a single English word
pub trait Inflector {
    fn singularize(&self, word: &str) -> String;
    fn pluralize(&self, word: &str) -> String;
}

/// Words whose singular and plural are the same
const UNCOUNTABLE: &[&str] = &[
    "asparagus",
    "couscous",
    "fish",
    "grits",
    "hummus",
    "molasses",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
    "swiss",
];

/// (singular, plural) pairs the suffix rules get wrong
const IRREGULAR: &[(&str, &str)] = &[
    ("brownie", "brownies"),
    ("calf", "calves"),
    ("child", "children"),
    ("cookie", "cookies"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("loaf", "loaves"),
    ("mouse", "mice"),
    ("person", "people"),
    ("pie", "pies"),
    ("shelf", "shelves"),
    ("smoothie", "smoothies"),
    ("tooth", "teeth"),
    ("veggie", "veggies"),
    ("wolf", "wolves"),
];

/// Words ending in a consonant + "o" that only take "s"
const O_PLURAL_EXCEPTIONS: &[&str] = &[
    "avocado",
    "burrito",
    "espresso",
    "jalapeno",
    "prosciutto",
    "taco",
];

lazy_static! {
    static ref SINGULAR_BY_PLURAL: HashMap<&'static str, &'static str> =
        IRREGULAR.iter().map(|(singular, plural)| (*plural, *singular)).collect();
    static ref PLURAL_BY_SINGULAR: HashMap<&'static str, &'static str> =
        IRREGULAR.iter().copied().collect();

    /// Plural-to-singular suffix rules, first match wins
    static ref SINGULAR_RULES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"([^aeiou])ies$").expect("valid singular rule"), "${1}y"),
        (Regex::new(r"(ch|sh|x|z|ss)es$").expect("valid singular rule"), "${1}"),
        (Regex::new(r"([^aeiou])oes$").expect("valid singular rule"), "${1}o"),
        (Regex::new(r"(ss|us|is)$").expect("valid singular rule"), "${1}"),
        (Regex::new(r"s$").expect("valid singular rule"), ""),
    ];

    /// Singular-to-plural suffix rules, first match wins
    static ref PLURAL_RULES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(ch|sh|x|z|s)$").expect("valid plural rule"), "${1}es"),
        (Regex::new(r"([^aeiou])y$").expect("valid plural rule"), "${1}ies"),
        (Regex::new(r"([^aeiou])o$").expect("valid plural rule"), "${1}oes"),
    ];
}

fn apply_rules(word: &str, rules: &[(Regex, &'static str)]) -> Option<String> {
    rules
        .iter()
        .find(|(pattern, _)| pattern.is_match(word))
        .map(|(pattern, replacement)| pattern.replace(word, *replacement).into_owned())
}

/// Rule-based English inflection for ingredient words
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        if UNCOUNTABLE.contains(&word) {
            return word.to_string();
        }
        if let Some(singular) = SINGULAR_BY_PLURAL.get(word) {
            return singular.to_string();
        }
        if PLURAL_BY_SINGULAR.contains_key(word) {
            return word.to_string();
        }
        apply_rules(word, &SINGULAR_RULES).unwrap_or_else(|| word.to_string())
    }

    fn pluralize(&self, word: &str) -> String {
        if UNCOUNTABLE.contains(&word) {
            return word.to_string();
        }
        if let Some(plural) = PLURAL_BY_SINGULAR.get(word) {
            return plural.to_string();
        }
        if O_PLURAL_EXCEPTIONS.contains(&word) {
            return format!("{word}s");
        }
        apply_rules(word, &PLURAL_RULES).unwrap_or_else(|| format!("{word}s"))
    }
}

/// Grouping key and, when the input was plural, its display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    pub key: String,
    pub plural: Option<String>,
}

/// Turns ingredient names into grouping keys
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer<I: Inflector = EnglishInflector> {
    inflector: I,
}

impl NameNormalizer<EnglishInflector> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: Inflector> NameNormalizer<I> {
    pub fn with_inflector(inflector: I) -> Self {
        Self { inflector }
    }

    /// Normalize a name.
    ///
    /// Lower-cases, turns hyphens into spaces, collapses whitespace and
    /// singularizes the last word. The normalized input is kept as the plural
    /// form when singularizing changed it.
    pub fn normalize(&self, name: &str) -> NormalizedName {
        let normalized = name
            .to_lowercase()
            .replace('-', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let key = match normalized.rsplit_once(' ') {
            Some((head, last)) => format!("{head} {}", self.inflector.singularize(last)),
            None => self.inflector.singularize(&normalized),
        };
        let plural = (key != normalized).then_some(normalized);

        trace!("Normalized ingredient name '{}' -> '{}'", name, key);
        NormalizedName { key, plural }
    }

    /// Canonical singular key used to group ingredients
    pub fn grouping_key(&self, name: &str) -> String {
        self.normalize(name).key
    }

    /// The plural display form, if `name` was plural
    pub fn display_plural(&self, name: &str) -> Option<String> {
        self.normalize(name).plural
    }
}
