//! # Shopping List Module
//!
//! Merges ingredient occurrences from many recipes into one shopping list.
//!
//! Occurrences are grouped by the singular grouping key of their name. Inside
//! a group there is one running quantity per unit class (mass, volume, some,
//! none) and one per distinct unknown unit label, so "2 cups flour" and
//! "100 grams flour" stay on separate lines of the same item.
//!
//! ## Usage
//!
//! ```rust
//! use groceries::shopping_list::{combine_ingredients, IngredientOccurrence};
//!
//! let list = combine_ingredients(&[
//!     IngredientOccurrence::new("8", "garlic cloves", 1),
//!     IngredientOccurrence::new("1", "garlic clove", 2),
//! ]);
//! let item = list.get("garlic cloves").unwrap();
//! assert_eq!(item.quantities[0].to_string(), "9");
//! ```

use log::{debug, info, warn};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

use crate::categorization::category;
use crate::config::ShoppingListConfig;
use crate::measurement_types::{BaseUnit, Quantity, Unit};
use crate::name_normalizer::{EnglishInflector, Inflector, NameNormalizer};
use crate::quantity_parser::parse_quantity;
use crate::unit_conversion::add;

/// One ingredient line of one scheduled recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientOccurrence {
    /// Quantity text as typed (e.g. "1 1/2 cups")
    pub quantity: String,
    pub name: String,
    pub recipe_id: i64,
}

impl IngredientOccurrence {
    pub fn new(quantity: &str, name: &str, recipe_id: i64) -> Self {
        Self {
            quantity: quantity.to_string(),
            name: name.to_string(),
            recipe_id,
        }
    }
}

/// Where part of an item's total came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientOrigin {
    pub recipe_id: i64,
    /// Original quantity text
    pub quantity: String,
}

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    /// Running totals, one per unit class or unknown label, in first-seen order
    pub quantities: Vec<Quantity>,
    /// Department tag, `None` when categorization is disabled
    pub category: Option<String>,
    #[serde(skip)]
    pub origins: Vec<IngredientOrigin>,
}

/// The aggregated shopping list, ordered by first appearance.
///
/// Serializes as a JSON object keyed by display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<(String, ShoppingListItem)>,
}

impl ShoppingList {
    pub fn get(&self, name: &str) -> Option<&ShoppingListItem> {
        self.items
            .iter()
            .find(|(display_name, _)| display_name == name)
            .map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Display names in list order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShoppingListItem)> {
        self.items.iter().map(|(name, item)| (name.as_str(), item))
    }
}

impl Serialize for ShoppingList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (name, item) in &self.items {
            map.serialize_entry(name, item)?;
        }
        map.end()
    }
}

/// Identity of a running quantity inside one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
enum BucketKey {
    Class(BaseUnit),
    Unknown(String),
}

impl BucketKey {
    fn of(quantity: &Quantity) -> Self {
        match (quantity.unit(), quantity.unknown_unit()) {
            (Unit::Unknown, Some(label)) => BucketKey::Unknown(label.to_string()),
            _ => BucketKey::Class(quantity.base_unit()),
        }
    }
}

#[derive(Debug, Default)]
struct Bucket {
    key: String,
    quantities: Vec<(BucketKey, Quantity)>,
    plural: Option<String>,
    origins: Vec<IngredientOrigin>,
}

impl Bucket {
    fn merge(&mut self, quantity: Quantity) {
        let key = BucketKey::of(&quantity);
        match self.quantities.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, running)) => match add(running, &quantity) {
                Ok(sum) => *running = sum,
                Err(err) => warn!(
                    "Dropping {} for '{}' from its running total: {}",
                    quantity, self.key, err
                ),
            },
            None => self.quantities.push((key, quantity)),
        }
    }
}

/// Incremental shopping-list aggregation
pub struct ShoppingListBuilder<I: Inflector = EnglishInflector> {
    config: ShoppingListConfig,
    normalizer: NameNormalizer<I>,
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl ShoppingListBuilder<EnglishInflector> {
    pub fn new() -> Self {
        Self::with_config(ShoppingListConfig::default())
    }

    pub fn with_config(config: ShoppingListConfig) -> Self {
        debug!("Creating ShoppingListBuilder: categorize={}", config.categorize);
        Self {
            config,
            normalizer: NameNormalizer::new(),
            buckets: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl Default for ShoppingListBuilder<EnglishInflector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Inflector> ShoppingListBuilder<I> {
    /// Swap the name normalizer, keeping the configuration
    pub fn with_normalizer<J: Inflector>(self, normalizer: NameNormalizer<J>) -> ShoppingListBuilder<J> {
        ShoppingListBuilder {
            config: self.config,
            normalizer,
            buckets: self.buckets,
            index: self.index,
        }
    }

    /// Fold one occurrence into the running totals
    pub fn add(&mut self, occurrence: &IngredientOccurrence) -> &mut Self {
        let normalized = self.normalizer.normalize(&occurrence.name);
        let quantity = parse_quantity(&occurrence.quantity);

        let position = match self.index.get(&normalized.key) {
            Some(&position) => position,
            None => {
                self.buckets.push(Bucket {
                    key: normalized.key.clone(),
                    ..Bucket::default()
                });
                let position = self.buckets.len() - 1;
                self.index.insert(normalized.key.clone(), position);
                position
            }
        };

        let bucket = &mut self.buckets[position];
        if bucket.plural.is_none() {
            bucket.plural = normalized.plural;
        }
        bucket.merge(quantity);
        bucket.origins.push(IngredientOrigin {
            recipe_id: occurrence.recipe_id,
            quantity: occurrence.quantity.clone(),
        });
        self
    }

    /// Fold every occurrence of a slice
    pub fn extend(&mut self, occurrences: &[IngredientOccurrence]) -> &mut Self {
        for occurrence in occurrences {
            self.add(occurrence);
        }
        self
    }

    /// Produce the shopping list in first-seen order
    pub fn finish(self) -> ShoppingList {
        let categorize = self.config.categorize;
        let items: Vec<(String, ShoppingListItem)> = self
            .buckets
            .into_iter()
            .map(|bucket| {
                let category = categorize.then(|| category(&bucket.key).to_string());
                let display_name = bucket.plural.unwrap_or(bucket.key);
                let item = ShoppingListItem {
                    quantities: bucket.quantities.into_iter().map(|(_, q)| q).collect(),
                    category,
                    origins: bucket.origins,
                };
                (display_name, item)
            })
            .collect();

        info!("Combined ingredients into {} shopping list items", items.len());
        ShoppingList { items }
    }
}

/// Combine occurrences into a shopping list with the default configuration
pub fn combine_ingredients(occurrences: &[IngredientOccurrence]) -> ShoppingList {
    let mut builder = ShoppingListBuilder::new();
    builder.extend(occurrences);
    builder.finish()
}
