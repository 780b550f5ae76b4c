use fraction::Fraction;
use groceries::ingredient_parser::parse_ingredient;
use groceries::measurement_types::{Quantity, Unit};
use groceries::quantity_parser::parse_quantity;
use groceries::unit_conversion::add;
use proptest::prelude::*;

fn known_unit() -> impl Strategy<Value = Unit> {
    let units: Vec<Unit> = Unit::ALL
        .iter()
        .copied()
        .filter(|unit| *unit != Unit::Unknown)
        .collect();
    prop::sample::select(units)
}

/// Amounts in eighths always render exactly with three decimals
fn quantity() -> impl Strategy<Value = Quantity> {
    prop_oneof![
        (1u64..200, known_unit())
            .prop_map(|(eighths, unit)| Quantity::new(Fraction::new(eighths, 8u64), unit)),
        (1u64..200, prop::sample::select(vec!["bag", "bunch", "jar"]))
            .prop_map(|(eighths, label)| Quantity::unknown(Fraction::new(eighths, 8u64), label)),
    ]
}

// ── Rendering a quantity and parsing it back is the identity ─────────────

proptest! {
    #[test]
    fn rendered_quantity_parses_back(q in quantity()) {
        let rendered = q.to_string();
        prop_assert_eq!(parse_quantity(&rendered), q, "rendered as '{}'", rendered);
    }
}

// ── Addition is commutative wherever it succeeds ─────────────────────────

proptest! {
    #[test]
    fn add_is_commutative(a in quantity(), b in quantity()) {
        let ab = add(&a, &b);
        let ba = add(&b, &a);
        prop_assert_eq!(ab.is_ok(), ba.is_ok());
        if let (Ok(ab), Ok(ba)) = (ab, ba) {
            prop_assert_eq!(ab, ba);
        }
    }

    #[test]
    fn mass_and_volume_never_add(mass in 1u64..100, volume in 1u64..100) {
        let grams = Quantity::whole(mass, Unit::Gram);
        let cups = Quantity::whole(volume, Unit::Cup);
        prop_assert!(add(&grams, &cups).is_err());
    }

    #[test]
    fn add_never_panics_on_large_amounts(
        a in any::<u64>(),
        b in any::<u64>(),
        unit_a in known_unit(),
        unit_b in known_unit(),
    ) {
        let _ = add(&Quantity::whole(a, unit_a), &Quantity::whole(b, unit_b));
    }
}

// ── Parsers never panic ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn ingredient_parser_never_panics(line in "\\PC{0,60}") {
        let parsed = parse_ingredient(&line);
        prop_assert!(!parsed.quantity.is_empty());
    }

    #[test]
    fn quantity_parser_never_panics(text in "[0-9 ./a-zA-Z½¾()+-]{0,24}") {
        let _ = parse_quantity(&text);
    }
}
