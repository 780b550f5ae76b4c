#[cfg(test)]
mod tests {
    use groceries::config::ShoppingListConfig;
    use groceries::ingredient_parser::parse_ingredient;
    use groceries::measurement_types::{Quantity, Unit};
    use groceries::name_normalizer::{Inflector, NameNormalizer};
    use groceries::shopping_list::{combine_ingredients, IngredientOccurrence, ShoppingListBuilder};

    fn occurrences(recipe_id: i64, lines: &[&str]) -> Vec<IngredientOccurrence> {
        lines
            .iter()
            .map(|line| {
                let parsed = parse_ingredient(line);
                IngredientOccurrence::new(&parsed.quantity, &parsed.name, recipe_id)
            })
            .collect()
    }

    #[test]
    fn test_garlic_example() {
        let list = combine_ingredients(&[
            IngredientOccurrence::new("8", "garlic cloves", 1),
            IngredientOccurrence::new("1", "garlic clove", 2),
        ]);

        assert_eq!(list.len(), 1);
        let item = list.get("garlic cloves").unwrap();
        assert_eq!(item.quantities, vec![Quantity::whole(9, Unit::None)]);
    }

    #[test]
    fn test_garlic_example_singular_first() {
        let list = combine_ingredients(&[
            IngredientOccurrence::new("1", "garlic clove", 1),
            IngredientOccurrence::new("8", "Garlic Cloves", 2),
        ]);

        assert_eq!(list.len(), 1);
        let item = list.get("garlic cloves").unwrap();
        assert_eq!(item.quantities, vec![Quantity::whole(9, Unit::None)]);
    }

    #[test]
    fn test_flour_cup_and_gram_stay_separate() {
        let list = combine_ingredients(&[
            IngredientOccurrence::new("1 cup", "flour", 1),
            IngredientOccurrence::new("20 grams", "flour", 2),
        ]);

        let item = list.get("flour").unwrap();
        assert_eq!(
            item.quantities,
            vec![Quantity::whole(1, Unit::Cup), Quantity::whole(20, Unit::Gram)]
        );
        assert_eq!(item.category.as_deref(), Some("baking"));
    }

    #[test]
    fn test_two_recipes_end_to_end() {
        let mut all = occurrences(
            1,
            &[
                "2 Garlic cloves, minced",
                "1 cup chicken broth",
                "1 tablespoon olive oil",
                "kosher salt",
            ],
        );
        all.extend(occurrences(
            2,
            &[
                "3 garlic cloves",
                "2 cups chicken broth",
                "1 teaspoon olive oil",
                "1 tsp kosher salt",
            ],
        ));

        let list = combine_ingredients(&all);
        let names: Vec<&str> = list.names().collect();
        assert_eq!(
            names,
            vec!["garlic cloves", "chicken broth", "olive oil", "kosher salt"]
        );

        assert_eq!(
            list.get("garlic cloves").unwrap().quantities,
            vec![Quantity::whole(5, Unit::None)]
        );
        assert_eq!(
            list.get("chicken broth").unwrap().quantities,
            vec![Quantity::whole(3, Unit::Cup)]
        );
        assert_eq!(
            list.get("olive oil").unwrap().quantities,
            vec![Quantity::whole(4, Unit::Teaspoon)]
        );

        let salt = list.get("kosher salt").unwrap();
        assert_eq!(
            salt.quantities,
            vec![Quantity::whole(1, Unit::Some), Quantity::whole(1, Unit::Teaspoon)]
        );
        assert_eq!(salt.category.as_deref(), Some("spices"));
        assert_eq!(salt.origins.len(), 2);
        assert_eq!(salt.origins[1].recipe_id, 2);
        assert_eq!(salt.origins[1].quantity, "1 tsp");
    }

    #[test]
    fn test_occurrences_from_json() {
        let json = r#"[
            {"quantity": "1 lb", "name": "chicken thighs", "recipe_id": 4},
            {"quantity": "8 oz", "name": "chicken thigh", "recipe_id": 5}
        ]"#;
        let input: Vec<IngredientOccurrence> = serde_json::from_str(json).unwrap();
        let list = combine_ingredients(&input);

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chicken thighs": {
                    "quantities": [{"amount": "24", "unit": "OUNCE", "unknown_unit": null}],
                    "category": "meat"
                }
            })
        );
    }

    #[test]
    fn test_categorize_disabled_serializes_null() {
        let mut builder = ShoppingListBuilder::with_config(ShoppingListConfig { categorize: false });
        builder.add(&IngredientOccurrence::new("2", "lemons", 1));
        let json = serde_json::to_value(builder.finish()).unwrap();
        assert_eq!(json["lemons"]["category"], serde_json::Value::Null);
    }

    struct NoInflection;

    impl Inflector for NoInflection {
        fn singularize(&self, word: &str) -> String {
            word.to_string()
        }

        fn pluralize(&self, word: &str) -> String {
            word.to_string()
        }
    }

    #[test]
    fn test_custom_normalizer() {
        let mut builder =
            ShoppingListBuilder::new().with_normalizer(NameNormalizer::with_inflector(NoInflection));
        builder
            .add(&IngredientOccurrence::new("1", "egg", 1))
            .add(&IngredientOccurrence::new("2", "eggs", 2));
        let list = builder.finish();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get("egg").unwrap().quantities, vec![Quantity::whole(1, Unit::None)]);
        assert_eq!(list.get("eggs").unwrap().quantities, vec![Quantity::whole(2, Unit::None)]);
    }
}
