//! # Measurement Types Module
//!
//! This module defines the core value types of the engine: the closed [`Unit`]
//! taxonomy, its coarse [`BaseUnit`] class and the [`Quantity`] produced by the
//! parser and by the shopping-list running sums.
//!
//! Amounts are exact rationals so that converting between units never loses
//! precision; they are rendered as decimal strings only at the edges.

use fraction::Fraction;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A concrete measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    // Mass units
    Pound,
    Ounce,
    Gram,
    Kilogram,

    // Volume units
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    Liter,
    Milliliter,

    /// "A pinch", "a dash", "some": absorbed when added to a real quantity
    Some,
    /// A bare count such as "2" in "2 eggs"
    None,
    /// A label that could not be resolved; the text lives on the [`Quantity`]
    Unknown,
}

/// The coarse class a [`Unit`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseUnit {
    Mass,
    Volume,
    Some,
    None,
    Unknown,
}

impl Unit {
    /// Every unit, in declaration order
    pub const ALL: [Unit; 16] = [
        Unit::Pound,
        Unit::Ounce,
        Unit::Gram,
        Unit::Kilogram,
        Unit::Teaspoon,
        Unit::Tablespoon,
        Unit::FluidOunce,
        Unit::Cup,
        Unit::Pint,
        Unit::Quart,
        Unit::Gallon,
        Unit::Liter,
        Unit::Milliliter,
        Unit::Some,
        Unit::None,
        Unit::Unknown,
    ];

    /// The class this unit belongs to
    pub fn base_unit(self) -> BaseUnit {
        match self {
            Unit::Pound | Unit::Ounce | Unit::Gram | Unit::Kilogram => BaseUnit::Mass,
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon
            | Unit::Liter
            | Unit::Milliliter => BaseUnit::Volume,
            Unit::Some => BaseUnit::Some,
            Unit::None => BaseUnit::None,
            Unit::Unknown => BaseUnit::Unknown,
        }
    }

    /// Label used when rendering a quantity as text.
    ///
    /// Every label resolves back to the same unit through the quantity parser.
    /// `None` and `Unknown` have no label of their own.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Pound => "pound",
            Unit::Ounce => "ounce",
            Unit::Gram => "gram",
            Unit::Kilogram => "kilogram",
            Unit::Teaspoon => "teaspoon",
            Unit::Tablespoon => "tablespoon",
            Unit::FluidOunce => "fluid ounce",
            Unit::Cup => "cup",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Liter => "liter",
            Unit::Milliliter => "milliliter",
            Unit::Some => "some",
            Unit::None | Unit::Unknown => "",
        }
    }
}

/// An amount paired with a unit.
///
/// `unknown_unit` is present exactly when `unit` is [`Unit::Unknown`]; the
/// constructors keep that invariant, which is why the fields are private.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    #[serde(serialize_with = "serialize_amount")]
    amount: Fraction,
    unit: Unit,
    unknown_unit: Option<String>,
}

impl Quantity {
    /// Create a quantity in a known unit.
    ///
    /// Use [`Quantity::unknown`] for unresolved labels; passing
    /// [`Unit::Unknown`] here stores an empty label.
    pub fn new(amount: Fraction, unit: Unit) -> Self {
        let unknown_unit = (unit == Unit::Unknown).then(String::new);
        Self {
            amount,
            unit,
            unknown_unit,
        }
    }

    /// Create a quantity whose unit label could not be resolved
    pub fn unknown(amount: Fraction, label: &str) -> Self {
        Self {
            amount,
            unit: Unit::Unknown,
            unknown_unit: Some(label.to_string()),
        }
    }

    /// Shorthand for a whole-number amount in a known unit
    pub fn whole(amount: u64, unit: Unit) -> Self {
        Self::new(Fraction::new(amount, 1u64), unit)
    }

    pub fn amount(&self) -> Fraction {
        self.amount
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn unknown_unit(&self) -> Option<&str> {
        self.unknown_unit.as_deref()
    }

    pub fn base_unit(&self) -> BaseUnit {
        self.unit.base_unit()
    }

    /// Same unit (and unknown label), different amount
    pub(crate) fn with_amount(&self, amount: Fraction) -> Self {
        Self {
            amount,
            unit: self.unit,
            unknown_unit: self.unknown_unit.clone(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = format_amount(&self.amount);
        let label = match self.unit {
            Unit::Unknown => self.unknown_unit.as_deref().unwrap_or_default(),
            unit => unit.label(),
        };

        if label.is_empty() {
            write!(f, "{amount}")
        } else {
            write!(f, "{amount} {label}")
        }
    }
}

/// Render an amount as a decimal string with at most three decimal places.
///
/// Trailing zeros are trimmed: `9`, `1150`, `0.5`, `0.333`.
pub fn format_amount(amount: &Fraction) -> String {
    let (Some(&numer), Some(&denom)) = (amount.numer(), amount.denom()) else {
        return "0".to_string();
    };
    if denom == 0 {
        return "0".to_string();
    }

    let denom = u128::from(denom);
    let thousandths = (u128::from(numer) * 1000 + denom / 2) / denom;
    let whole = thousandths / 1000;
    let fractional = thousandths % 1000;

    if fractional == 0 {
        whole.to_string()
    } else {
        let digits = format!("{fractional:03}");
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}

fn serialize_amount<S>(amount: &Fraction, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_amount(amount))
}
