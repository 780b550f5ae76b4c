//! # Schedule Module
//!
//! Expands recipes scheduled on calendar dates into the ingredient
//! occurrences of a date range, ready for aggregation.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ScheduleError;
use crate::ingredient_parser::IngredientResult;
use crate::shopping_list::{IngredientOccurrence, ShoppingList, ShoppingListBuilder};

/// The quantity and name of one recipe ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub quantity: String,
    pub name: String,
}

impl From<IngredientResult> for RecipeIngredient {
    fn from(result: IngredientResult) -> Self {
        Self {
            quantity: result.quantity,
            name: result.name,
        }
    }
}

fn default_count() -> u32 {
    1
}

/// A recipe placed on a date, possibly cooked several times that day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledRecipe {
    pub recipe_id: i64,
    pub on: NaiveDate,
    #[serde(default = "default_count")]
    pub count: u32,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Occurrences of every recipe scheduled between `start` and `end`, inclusive.
///
/// Entries keep their input order and each recipe contributes its ingredients
/// `count` times.
pub fn occurrences_in_range(
    schedule: &[ScheduledRecipe],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<IngredientOccurrence>, ScheduleError> {
    if start > end {
        return Err(ScheduleError::InvalidRange { start, end });
    }

    let occurrences: Vec<IngredientOccurrence> = schedule
        .iter()
        .filter(|entry| start <= entry.on && entry.on <= end)
        .flat_map(|entry| {
            (0..entry.count).flat_map(move |_| {
                entry.ingredients.iter().map(move |ingredient| IngredientOccurrence {
                    quantity: ingredient.quantity.clone(),
                    name: ingredient.name.clone(),
                    recipe_id: entry.recipe_id,
                })
            })
        })
        .collect();

    debug!(
        "Expanded {} scheduled recipes into {} occurrences for {}..={}",
        schedule.len(),
        occurrences.len(),
        start,
        end
    );
    Ok(occurrences)
}

/// Shopping list for every recipe scheduled between `start` and `end`
pub fn shopping_list_for_range(
    builder: ShoppingListBuilder,
    schedule: &[ScheduledRecipe],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ShoppingList, ScheduleError> {
    let occurrences = occurrences_in_range(schedule, start, end)?;
    let mut builder = builder;
    builder.extend(&occurrences);
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_parser::parse_ingredient;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn recipe(recipe_id: i64, day: u32, count: u32, lines: &[&str]) -> ScheduledRecipe {
        ScheduledRecipe {
            recipe_id,
            on: date(day),
            count,
            ingredients: lines
                .iter()
                .map(|line| RecipeIngredient::from(parse_ingredient(line)))
                .collect(),
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let schedule = vec![
            recipe(1, 1, 1, &["1 onion"]),
            recipe(2, 3, 1, &["2 carrots"]),
            recipe(3, 5, 1, &["1 cup rice"]),
            recipe(4, 6, 1, &["1 lemon"]),
        ];

        let occurrences = occurrences_in_range(&schedule, date(3), date(5)).unwrap();
        let ids: Vec<i64> = occurrences.iter().map(|o| o.recipe_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_count_repeats_ingredients() {
        let schedule = vec![recipe(7, 2, 3, &["2 eggs", "1 cup milk"])];
        let occurrences = occurrences_in_range(&schedule, date(1), date(2)).unwrap();
        assert_eq!(occurrences.len(), 6);
        assert_eq!(occurrences[0].name, "eggs");
        assert_eq!(occurrences[1].quantity, "1 cup");
    }

    #[test]
    fn test_invalid_range() {
        let result = occurrences_in_range(&[], date(5), date(1));
        assert_eq!(
            result,
            Err(ScheduleError::InvalidRange { start: date(5), end: date(1) })
        );
    }

    #[test]
    fn test_shopping_list_for_range() {
        let schedule = vec![
            recipe(1, 1, 1, &["8 garlic cloves, minced"]),
            recipe(2, 2, 1, &["1 garlic clove"]),
        ];
        let list =
            shopping_list_for_range(ShoppingListBuilder::new(), &schedule, date(1), date(2)).unwrap();
        let item = list.get("garlic cloves").unwrap();
        assert_eq!(item.quantities[0].to_string(), "9");
    }

    #[test]
    fn test_count_defaults_to_one() {
        let json = r#"{"recipe_id": 1, "on": "2024-03-01", "ingredients": []}"#;
        let entry: ScheduledRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(entry.count, 1);
    }
}
