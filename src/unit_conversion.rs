//! # Unit Conversion Module
//!
//! Fixed conversion factors, the per-class unit ordering and the addition
//! algebra for [`Quantity`].
//!
//! Each class has one base unit: milliliters for volume, grams for mass.
//! Factors are exact rationals, so converting through the base unit and back
//! is lossless.

use fraction::{CheckedAdd, CheckedDiv, CheckedMul, Fraction};
use log::trace;
use std::cmp::Ordering;

use crate::errors::QuantityError;
use crate::measurement_types::{BaseUnit, Quantity, Unit};

/// Milliliters in one teaspoon (4.92892 ml)
fn teaspoon_ml() -> Fraction {
    Fraction::new(492_892u64, 100_000u64)
}

/// Grams in one ounce (28.34952 g)
fn ounce_g() -> Fraction {
    Fraction::new(2_834_952u64, 100_000u64)
}

fn times(factor: Fraction, n: u64) -> Fraction {
    factor * Fraction::new(n, 1u64)
}

/// Size of one `unit` expressed in its class base unit.
///
/// Returns `None` for units outside the mass and volume classes.
pub fn base_factor(unit: Unit) -> Option<Fraction> {
    let tablespoon = times(teaspoon_ml(), 3);
    let fluid_ounce = times(tablespoon, 2);
    let cup = times(fluid_ounce, 8);
    let pint = times(cup, 2);
    let quart = times(pint, 2);

    let factor = match unit {
        Unit::Milliliter => Fraction::new(1u64, 1u64),
        Unit::Teaspoon => teaspoon_ml(),
        Unit::Tablespoon => tablespoon,
        Unit::FluidOunce => fluid_ounce,
        Unit::Cup => cup,
        Unit::Pint => pint,
        Unit::Quart => quart,
        Unit::Gallon => times(quart, 4),
        Unit::Liter => Fraction::new(1000u64, 1u64),
        Unit::Gram => Fraction::new(1u64, 1u64),
        Unit::Ounce => ounce_g(),
        Unit::Pound => times(ounce_g(), 16),
        Unit::Kilogram => Fraction::new(1000u64, 1u64),
        Unit::Some | Unit::None | Unit::Unknown => return None,
    };
    Some(factor)
}

/// Units are ordered by magnitude within one class only.
///
/// Mass and volume units never compare with each other; `Some`, `None` and
/// `Unknown` only compare equal to themselves.
impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        if self.base_unit() != other.base_unit() {
            return None;
        }
        let (a, b) = (base_factor(*self)?, base_factor(*other)?);
        a.partial_cmp(&b)
    }
}

impl Quantity {
    /// Convert to another unit of the same class.
    ///
    /// Returns `None` when the units belong to different classes or either
    /// unit has no conversion factor.
    pub fn convert_to(&self, unit: Unit) -> Option<Quantity> {
        if self.unit() == unit && unit != Unit::Unknown {
            return Some(self.clone());
        }
        if self.base_unit() != unit.base_unit() {
            return None;
        }
        let from = base_factor(self.unit())?;
        let to = base_factor(unit)?;
        let amount = self.amount().checked_mul(&from)?.checked_div(&to)?;
        Some(Quantity::new(amount, unit))
    }

    /// Add another quantity, see [`add`]
    pub fn try_add(&self, other: &Quantity) -> Result<Quantity, QuantityError> {
        add(self, other)
    }
}

/// Add two quantities.
///
/// Rules, first match wins:
///
/// 1. same known unit: amounts are summed;
/// 2. both unknown: summed when the labels match, otherwise incompatible;
/// 3. either side is `Some`: the other side is returned unchanged;
/// 4. same mass or volume class: summed in the base unit, then expressed in
///    the smaller of the two units;
/// 5. anything else is incompatible.
///
/// Sums too large for the amount type fail with [`QuantityError::Overflow`].
pub fn add(a: &Quantity, b: &Quantity) -> Result<Quantity, QuantityError> {
    let incompatible = || QuantityError::IncompatibleUnit {
        unit_a: a.unit(),
        unit_b: b.unit(),
    };
    let overflow = || QuantityError::Overflow {
        unit_a: a.unit(),
        unit_b: b.unit(),
    };

    if a.unit() == b.unit() {
        if a.unit() != Unit::Unknown || a.unknown_unit() == b.unknown_unit() {
            let sum = a.amount().checked_add(&b.amount()).ok_or_else(overflow)?;
            return Ok(a.with_amount(sum));
        }
        return Err(incompatible());
    }

    // `Some` is absorbed rather than summed
    if a.unit() == Unit::Some {
        return Ok(b.clone());
    }
    if b.unit() == Unit::Some {
        return Ok(a.clone());
    }

    match (a.base_unit(), b.base_unit()) {
        (BaseUnit::Mass, BaseUnit::Mass) | (BaseUnit::Volume, BaseUnit::Volume) => {
            let (Some(factor_a), Some(factor_b)) = (base_factor(a.unit()), base_factor(b.unit()))
            else {
                return Err(incompatible());
            };
            let (target, factor) = if factor_a <= factor_b {
                (a.unit(), factor_a)
            } else {
                (b.unit(), factor_b)
            };
            let amount = a
                .amount()
                .checked_mul(&factor_a)
                .zip(b.amount().checked_mul(&factor_b))
                .and_then(|(base_a, base_b)| base_a.checked_add(&base_b))
                .and_then(|total| total.checked_div(&factor))
                .ok_or_else(overflow)?;
            trace!(
                "Adding {:?} and {:?} in {:?}",
                a.unit(),
                b.unit(),
                target
            );
            Ok(Quantity::new(amount, target))
        }
        _ => Err(incompatible()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: u64, d: u64) -> Fraction {
        Fraction::new(n, d)
    }

    #[test]
    fn test_fixed_factors() {
        assert_eq!(base_factor(Unit::Teaspoon), Some(frac(492_892, 100_000)));
        assert_eq!(base_factor(Unit::Tablespoon), Some(frac(1_478_676, 100_000)));
        assert_eq!(base_factor(Unit::Liter), Some(frac(1000, 1)));
        assert_eq!(base_factor(Unit::Pound), Some(frac(45_359_232, 100_000)));
        assert_eq!(base_factor(Unit::Some), None);
    }

    #[test]
    fn test_ordering_within_class() {
        assert!(Unit::Teaspoon < Unit::Tablespoon);
        assert!(Unit::Cup < Unit::Pint);
        assert!(Unit::Gallon > Unit::Liter);
        assert!(Unit::Gram < Unit::Ounce);
        assert!(Unit::Kilogram > Unit::Pound);
    }

    #[test]
    fn test_no_ordering_across_classes() {
        assert_eq!(Unit::Cup.partial_cmp(&Unit::Gram), None);
        assert_eq!(Unit::Some.partial_cmp(&Unit::Teaspoon), None);
        assert_eq!(Unit::None.partial_cmp(&Unit::Unknown), None);
        assert_eq!(Unit::Some.partial_cmp(&Unit::Some), Some(Ordering::Equal));
    }

    #[test]
    fn test_add_same_unit() {
        let sum = add(&Quantity::whole(2, Unit::Cup), &Quantity::whole(3, Unit::Cup)).unwrap();
        assert_eq!(sum, Quantity::whole(5, Unit::Cup));
    }

    #[test]
    fn test_add_biases_toward_smaller_unit() {
        let kg = Quantity::whole(1, Unit::Kilogram);
        let g = Quantity::whole(150, Unit::Gram);

        assert_eq!(add(&kg, &g).unwrap(), Quantity::whole(1150, Unit::Gram));
        assert_eq!(add(&g, &kg).unwrap(), Quantity::whole(1150, Unit::Gram));
    }

    #[test]
    fn test_add_volume_is_lossless() {
        let cup = Quantity::whole(1, Unit::Cup);
        let tbsp = Quantity::whole(1, Unit::Tablespoon);
        assert_eq!(add(&cup, &tbsp).unwrap(), Quantity::whole(17, Unit::Tablespoon));

        let pound = Quantity::whole(1, Unit::Pound);
        let ounce = Quantity::whole(4, Unit::Ounce);
        assert_eq!(add(&pound, &ounce).unwrap(), Quantity::whole(20, Unit::Ounce));
    }

    #[test]
    fn test_some_is_absorbed() {
        let tsp = Quantity::whole(2, Unit::Teaspoon);
        let some = Quantity::whole(1, Unit::Some);

        assert_eq!(add(&tsp, &some).unwrap(), tsp);
        assert_eq!(add(&some, &tsp).unwrap(), tsp);
        assert_eq!(add(&some, &some).unwrap(), Quantity::whole(2, Unit::Some));
    }

    #[test]
    fn test_unknown_units() {
        let bag = Quantity::unknown(frac(1, 1), "bag");
        let thing = Quantity::unknown(frac(2, 1), "thing");

        assert_eq!(add(&bag, &bag).unwrap(), Quantity::unknown(frac(2, 1), "bag"));
        assert_eq!(
            add(&bag, &thing),
            Err(QuantityError::IncompatibleUnit {
                unit_a: Unit::Unknown,
                unit_b: Unit::Unknown,
            })
        );
    }

    #[test]
    fn test_incompatible_classes() {
        let tbsp = Quantity::whole(1, Unit::Tablespoon);
        let gram = Quantity::whole(2, Unit::Gram);
        assert_eq!(
            add(&tbsp, &gram),
            Err(QuantityError::IncompatibleUnit {
                unit_a: Unit::Tablespoon,
                unit_b: Unit::Gram,
            })
        );
        assert!(add(&Quantity::whole(1, Unit::None), &gram).is_err());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = Quantity::whole(u64::MAX, Unit::Cup);
        assert_eq!(
            add(&huge, &Quantity::whole(1, Unit::Cup)),
            Err(QuantityError::Overflow {
                unit_a: Unit::Cup,
                unit_b: Unit::Cup,
            })
        );

        let many_cups = Quantity::whole(99_999_999_999_999, Unit::Cup);
        let tsp = Quantity::whole(1, Unit::Teaspoon);
        assert_eq!(
            add(&many_cups, &tsp),
            Err(QuantityError::Overflow {
                unit_a: Unit::Cup,
                unit_b: Unit::Teaspoon,
            })
        );
        assert_eq!(huge.convert_to(Unit::Teaspoon), None);
    }

    #[test]
    fn test_convert_to() {
        let liter = Quantity::whole(1, Unit::Liter);
        assert_eq!(
            liter.convert_to(Unit::Milliliter),
            Some(Quantity::whole(1000, Unit::Milliliter))
        );
        assert_eq!(
            Quantity::whole(1, Unit::Gallon).convert_to(Unit::Cup),
            Some(Quantity::whole(16, Unit::Cup))
        );
        assert_eq!(liter.convert_to(Unit::Gram), None);
    }
}
