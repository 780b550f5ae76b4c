//! # Categorization Module
//!
//! Maps a canonical ingredient name to the store department it is shopped
//! from, using curated keyword lists.
//!
//! A keyword matches whole words of the name; a trailing plural ("s", "es",
//! "ies") on the name is tolerated. When several keywords match, the one
//! ending last wins, so "chicken broth" lands in the pantry and "garlic
//! powder" with the spices. Ties go to the longer keyword.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::errors::CategoryError;

/// Department tag used when no keyword matches
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Grocery store department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    Baking,
    Pantry,
    Spices,
    Condiments,
    Canned,
    Frozen,
    Beverages,
}

impl Department {
    pub const ALL: [Department; 12] = [
        Department::Produce,
        Department::Dairy,
        Department::Meat,
        Department::Seafood,
        Department::Bakery,
        Department::Baking,
        Department::Pantry,
        Department::Spices,
        Department::Condiments,
        Department::Canned,
        Department::Frozen,
        Department::Beverages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Produce => "produce",
            Department::Dairy => "dairy",
            Department::Meat => "meat",
            Department::Seafood => "seafood",
            Department::Bakery => "bakery",
            Department::Baking => "baking",
            Department::Pantry => "pantry",
            Department::Spices => "spices",
            Department::Condiments => "condiments",
            Department::Canned => "canned",
            Department::Frozen => "frozen",
            Department::Beverages => "beverages",
        }
    }

    /// Keywords (singular, lowercase) that identify this department
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Department::Produce => PRODUCE,
            Department::Dairy => DAIRY,
            Department::Meat => MEAT,
            Department::Seafood => SEAFOOD,
            Department::Bakery => BAKERY,
            Department::Baking => BAKING,
            Department::Pantry => PANTRY,
            Department::Spices => SPICES,
            Department::Condiments => CONDIMENTS,
            Department::Canned => CANNED,
            Department::Frozen => FROZEN,
            Department::Beverages => BEVERAGES,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PRODUCE: &[&str] = &[
    "apple", "arugula", "avocado", "banana", "basil", "bell pepper", "berry", "blueberry",
    "broccoli", "cabbage", "carrot", "cauliflower", "celery", "cherry tomato", "chive",
    "cilantro", "corn", "cucumber", "dill", "eggplant", "garlic", "garlic clove", "ginger",
    "green bean", "green onion", "herb", "jalapeno", "kale", "leek", "lemon", "lemon juice",
    "lemon zest", "lettuce", "lime", "lime juice", "mango", "mint", "mushroom", "onion",
    "orange", "parsley", "pea", "peach", "pear", "potato", "red onion", "red pepper",
    "rosemary", "sage", "scallion", "shallot", "spinach", "squash", "strawberry",
    "sweet potato", "thyme", "tomato", "zucchini",
];

const DAIRY: &[&str] = &[
    "butter", "buttermilk", "cheddar", "cheese", "cream", "cream cheese", "egg", "feta",
    "ghee", "greek yogurt", "half and half", "heavy cream", "milk", "mozzarella", "parmesan",
    "ricotta", "sour cream", "whipping cream", "yogurt",
];

const MEAT: &[&str] = &[
    "bacon", "beef", "breast", "chicken", "chorizo", "drumstick", "ground beef",
    "ground turkey", "ham", "lamb", "pork", "prosciutto", "sausage", "steak", "thigh",
    "turkey",
];

const SEAFOOD: &[&str] = &[
    "anchovy", "clam", "cod", "crab", "fish", "halibut", "lobster", "mussel", "salmon",
    "scallop", "shrimp", "tilapia", "tuna",
];

const BAKERY: &[&str] = &[
    "bagel", "baguette", "bread", "brioche", "bun", "ciabatta", "croissant", "english muffin",
    "naan", "pita", "roll", "tortilla",
];

const BAKING: &[&str] = &[
    "all purpose flour", "almond extract", "baking powder", "baking soda", "brown sugar",
    "chocolate chip", "cocoa", "cocoa powder", "cornmeal", "cornstarch", "flour",
    "granulated sugar", "molasses", "powdered sugar", "shortening", "sugar", "vanilla",
    "vanilla extract", "yeast",
];

const PANTRY: &[&str] = &[
    "almond", "bread crumb", "breadcrumb", "broth", "cashew", "cereal", "coconut oil",
    "cracker", "honey", "lentil", "maple syrup", "noodle", "nut", "oat", "oil", "olive oil",
    "panko", "pasta", "peanut", "peanut butter", "pecan", "quinoa", "raisin", "rice",
    "sesame oil", "spaghetti", "stock", "vegetable oil", "vinegar", "walnut",
];

const SPICES: &[&str] = &[
    "allspice", "bay leaf", "bay leaves", "black pepper", "cardamom", "cayenne",
    "chili powder", "cinnamon", "coriander", "crushed red pepper", "cumin", "curry powder",
    "garlic powder", "ground clove", "ground ginger", "italian seasoning", "kosher salt",
    "nutmeg", "onion powder", "oregano", "paprika", "pepper", "peppercorn",
    "red pepper flake", "salt", "sea salt", "seasoning", "smoked paprika", "turmeric",
];

const CONDIMENTS: &[&str] = &[
    "barbecue sauce", "bbq sauce", "dijon mustard", "fish sauce", "hoisin sauce", "hot sauce",
    "ketchup", "mayo", "mayonnaise", "mustard", "pesto", "relish", "salsa", "soy sauce",
    "sriracha", "tahini", "worcestershire sauce",
];

const CANNED: &[&str] = &[
    "artichoke heart", "black bean", "canned tomato", "cannellini bean", "chickpea",
    "coconut milk", "crushed tomato", "diced tomato", "evaporated milk", "kidney bean",
    "olive", "pinto bean", "refried bean", "sweetened condensed milk", "tomato paste",
    "tomato sauce",
];

const FROZEN: &[&str] = &[
    "frozen berry", "frozen corn", "frozen pea", "frozen spinach", "ice cream", "puff pastry",
];

const BEVERAGES: &[&str] = &[
    "beer", "club soda", "coffee", "juice", "orange juice", "red wine", "soda",
    "sparkling water", "tea", "water", "white wine", "wine",
];

struct Keyword {
    words: Vec<&'static str>,
    len: usize,
    department: Department,
}

static KEYWORD_INDEX: LazyLock<Vec<Keyword>> = LazyLock::new(|| {
    Department::ALL
        .iter()
        .flat_map(|department| {
            department.keywords().iter().map(move |keyword| Keyword {
                words: keyword.split(' ').collect(),
                len: keyword.len(),
                department: *department,
            })
        })
        .collect()
});

/// A name word matches a keyword word exactly or as its plural
fn word_matches(word: &str, keyword: &str) -> bool {
    if word == keyword
        || word.strip_suffix('s') == Some(keyword)
        || word.strip_suffix("es") == Some(keyword)
    {
        return true;
    }
    match (keyword.strip_suffix('y'), word.strip_suffix("ies")) {
        (Some(stem), Some(word_stem)) => stem == word_stem,
        _ => false,
    }
}

/// Index of the last name word of the right-most occurrence of `keyword`
fn last_match_end(words: &[&str], keyword: &[&str]) -> Option<usize> {
    if keyword.is_empty() || keyword.len() > words.len() {
        return None;
    }
    (0..=words.len() - keyword.len())
        .rev()
        .find(|&start| {
            keyword
                .iter()
                .enumerate()
                .all(|(offset, kw)| word_matches(words[start + offset], kw))
        })
        .map(|start| start + keyword.len() - 1)
}

/// Classify an ingredient name into a department
pub fn classify(name: &str) -> Option<Department> {
    let lower = name.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    let mut best: Option<(usize, usize, Department)> = None;
    for keyword in KEYWORD_INDEX.iter() {
        let Some(end) = last_match_end(&words, &keyword.words) else {
            continue;
        };
        if best.map_or(true, |(best_end, best_len, _)| (end, keyword.len) > (best_end, best_len)) {
            best = Some((end, keyword.len, keyword.department));
        }
    }

    let department = best.map(|(_, _, department)| department);
    trace!("Classified '{}' as {:?}", name, department);
    department
}

/// Department tag for an ingredient name, `"unknown"` when nothing matches
pub fn category(name: &str) -> &'static str {
    classify(name).map_or(UNKNOWN_CATEGORY, |department| department.as_str())
}

/// Check that no keyword is listed under two departments
pub fn validate_departments() -> Result<(), CategoryError> {
    let mut seen: HashMap<&'static str, Department> = HashMap::new();
    for department in Department::ALL {
        for keyword in department.keywords() {
            if let Some(first) = seen.insert(*keyword, department) {
                return Err(CategoryError::OverlappingKeyword {
                    keyword: keyword.to_string(),
                    first,
                    second: department,
                });
            }
        }
    }
    Ok(())
}
