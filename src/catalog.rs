use serde::Deserialize;
use std::collections::HashMap;

use crate::model::{Diet, NutritionFacts};

/// Keywords that place a recipe in one diet category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DietRule {
    pub diet: Diet,
    pub keywords: Vec<String>,
}

impl DietRule {
    pub fn new(diet: Diet, keywords: &[&str]) -> Self {
        Self {
            diet,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// True when any keyword occurs in the already lower-cased name
    pub fn matches(&self, lowercase_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercase_name.contains(&keyword.to_lowercase()))
    }
}

/// Static lookup data used by the tagger.
///
/// `rules` is checked in order and the first match wins, so the order of
/// the list is the category priority.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_rules")]
    pub rules: Vec<DietRule>,
    #[serde(default = "default_nutrition")]
    pub nutrition: HashMap<String, NutritionFacts>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            nutrition: default_nutrition(),
        }
    }
}

impl Catalog {
    pub fn new(rules: Vec<DietRule>, nutrition: HashMap<String, NutritionFacts>) -> Self {
        Self { rules, nutrition }
    }

    /// First diet whose keywords appear in `name`, or `Diet::Unknown`
    pub fn classify(&self, name: &str) -> Diet {
        let name = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&name))
            .map_or(Diet::Unknown, |rule| rule.diet)
    }

    /// Nutrition facts for a recipe id; unknown ids get all fields "not available"
    pub fn nutrition_for(&self, id: &str) -> NutritionFacts {
        self.nutrition.get(id).copied().unwrap_or_default()
    }
}

fn default_rules() -> Vec<DietRule> {
    vec![
        DietRule::new(Diet::Vegetarian, &["paneer", "vegetarian", "veg"]),
        DietRule::new(Diet::NonVegetarian, &["chicken", "beef", "pork", "fish"]),
        DietRule::new(Diet::Vegan, &["vegan"]),
    ]
}

fn default_nutrition() -> HashMap<String, NutritionFacts> {
    HashMap::from([
        ("52940".to_string(), NutritionFacts::new(500, 35, 50, 20)),
        ("52939".to_string(), NutritionFacts::new(200, 10, 30, 5)),
    ])
}
