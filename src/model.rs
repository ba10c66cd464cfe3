use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::RecommendError;

/// Placeholder rendered for nutrition values the catalog does not know.
pub const NOT_AVAILABLE: &str = "N/A";

/// A recipe as listed by TheMealDB's ingredient filter.
///
/// The serde names follow TheMealDB's JSON. Deserializing goes through
/// [`MealRecord`], so a record read back from anywhere is validated the same
/// way as a fresh API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MealRecord")]
pub struct RawRecipe {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub image_url: String,
}

impl RawRecipe {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}

/// One entry of a `meals` array before validation. Every field may be absent
/// or null on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub image_url: Option<String>,
}

impl TryFrom<MealRecord> for RawRecipe {
    type Error = RecommendError;

    fn try_from(record: MealRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(RecommendError::MissingField("idMeal"))?;
        let name = record.name.ok_or(RecommendError::MissingField("strMeal"))?;

        let image_url = record
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Ok(RawRecipe {
            id,
            name,
            image_url,
        })
    }
}

impl From<RawRecipe> for MealRecord {
    fn from(recipe: RawRecipe) -> Self {
        MealRecord {
            id: Some(recipe.id),
            name: Some(recipe.name),
            image_url: Some(recipe.image_url),
        }
    }
}

/// Diet category derived from keywords in a recipe name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    Vegetarian,
    #[serde(alias = "Non-Vegetarian")]
    NonVegetarian,
    Vegan,
    #[serde(alias = "unknown")]
    Unknown,
}

impl Diet {
    /// Human readable label, as offered to users when asking for a preference
    pub fn label(&self) -> &'static str {
        match self {
            Diet::Vegetarian => "Vegetarian",
            Diet::NonVegetarian => "Non-Vegetarian",
            Diet::Vegan => "Vegan",
            Diet::Unknown => "Unknown",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Diet::Vegetarian => "Vegetarian",
            Diet::NonVegetarian => "NonVegetarian",
            Diet::Vegan => "Vegan",
            Diet::Unknown => "Unknown",
        }
    }

    /// Case-insensitive, whitespace-trimmed equality against either the
    /// variant name or the label.
    pub fn matches(&self, preference: &str) -> bool {
        let wanted = preference.trim().to_lowercase();
        wanted == self.name().to_lowercase() || wanted == self.label().to_lowercase()
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single nutrition value, or the explicit "not available" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nutrient {
    Value(u32),
    #[default]
    NotAvailable,
}

impl From<u32> for Nutrient {
    fn from(value: u32) -> Self {
        Nutrient::Value(value)
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nutrient::Value(v) => write!(f, "{}", v),
            Nutrient::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Nutrient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nutrient::Value(v) => serializer.serialize_u32(*v),
            Nutrient::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Nutrient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Nutrient::Value(n)),
            Repr::Text(text) => {
                let text = text.trim();
                if text.eq_ignore_ascii_case(NOT_AVAILABLE) {
                    Ok(Nutrient::NotAvailable)
                } else {
                    text.parse().map(Nutrient::Value).map_err(|_| {
                        de::Error::custom(format!("invalid nutrient value '{}'", text))
                    })
                }
            }
        }
    }
}

/// Simulated nutrition facts for one recipe. Fields are independent: a
/// catalog entry may know calories but not fat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionFacts {
    pub calories: Nutrient,
    pub protein: Nutrient,
    pub carbs: Nutrient,
    pub fat: Nutrient,
}

impl NutritionFacts {
    pub fn new(calories: u32, protein: u32, carbs: u32, fat: u32) -> Self {
        Self {
            calories: calories.into(),
            protein: protein.into(),
            carbs: carbs.into(),
            fat: fat.into(),
        }
    }
}

/// A raw recipe with its diet category and nutrition facts attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRecipe {
    pub recipe: RawRecipe,
    pub diet: Diet,
    pub nutrition: NutritionFacts,
}

/// The user's dietary preference for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub dietary_preference: String,
}

impl Preference {
    pub fn new(dietary_preference: impl Into<String>) -> Self {
        Self {
            dietary_preference: dietary_preference.into(),
        }
    }
}

/// The deduplicated shape shown to users and written to `recipes.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecipe {
    pub title: String,
    pub image: String,
    pub id: String,
    pub diet: Diet,
    pub calories: Nutrient,
    pub protein: Nutrient,
    pub carbs: Nutrient,
    pub fat: Nutrient,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diet_matches_name_and_label() {
        assert!(Diet::NonVegetarian.matches("Non-Vegetarian"));
        assert!(Diet::NonVegetarian.matches("  nonvegetarian "));
        assert!(Diet::Vegan.matches("VEGAN"));
        assert!(!Diet::Vegan.matches("veg"));
        assert!(!Diet::Vegetarian.matches("Non-Vegetarian"));
    }

    #[test]
    fn test_diet_serializes_as_variant_name() {
        assert_eq!(json!(Diet::NonVegetarian), json!("NonVegetarian"));
        let parsed: Diet = serde_json::from_value(json!("Non-Vegetarian")).unwrap();
        assert_eq!(parsed, Diet::NonVegetarian);
    }

    #[test]
    fn test_nutrient_serialization() {
        assert_eq!(json!(Nutrient::Value(500)), json!(500));
        assert_eq!(json!(Nutrient::NotAvailable), json!("N/A"));

        let value: Nutrient = serde_json::from_value(json!(35)).unwrap();
        assert_eq!(value, Nutrient::Value(35));
        let missing: Nutrient = serde_json::from_value(json!("n/a")).unwrap();
        assert_eq!(missing, Nutrient::NotAvailable);
        assert!(serde_json::from_value::<Nutrient>(json!("lots")).is_err());
    }

    #[test]
    fn test_nutrition_facts_partial_fields() {
        let facts: NutritionFacts = serde_json::from_value(json!({"calories": 120})).unwrap();
        assert_eq!(facts.calories, Nutrient::Value(120));
        assert_eq!(facts.protein, Nutrient::NotAvailable);
        assert_eq!(facts.fat, Nutrient::NotAvailable);
    }

    #[test]
    fn test_meal_record_requires_id() {
        let record: MealRecord =
            serde_json::from_value(json!({"strMeal": "Mystery Stew", "strMealThumb": "x.jpg"}))
                .unwrap();
        let result = RawRecipe::try_from(record);
        assert!(matches!(result, Err(RecommendError::MissingField("idMeal"))));
    }

    #[test]
    fn test_meal_record_requires_name() {
        let record: MealRecord = serde_json::from_value(json!({"idMeal": "1"})).unwrap();
        let result = RawRecipe::try_from(record);
        assert!(matches!(result, Err(RecommendError::MissingField("strMeal"))));
    }

    #[test]
    fn test_meal_record_without_thumbnail() {
        let record: MealRecord =
            serde_json::from_value(json!({"idMeal": "7", "strMeal": "Toast", "strMealThumb": null}))
                .unwrap();
        let recipe = RawRecipe::try_from(record).unwrap();
        assert_eq!(recipe, RawRecipe::new("7", "Toast", "N/A"));

        let record: MealRecord =
            serde_json::from_value(json!({"idMeal": "8", "strMeal": "Jam", "strMealThumb": " "}))
                .unwrap();
        assert_eq!(RawRecipe::try_from(record).unwrap().image_url, "N/A");
    }

    #[test]
    fn test_raw_recipe_deserialize_is_validated() {
        let blank_id = serde_json::from_value::<RawRecipe>(
            json!({"idMeal": "", "strMeal": "Beef Stew", "strMealThumb": "a.jpg"}),
        );
        let err = blank_id.unwrap_err().to_string();
        assert!(err.contains("idMeal"));

        let recipe: RawRecipe =
            serde_json::from_value(json!({"idMeal": "9", "strMeal": "Fish Pie"})).unwrap();
        assert_eq!(recipe.image_url, "N/A");
    }

    #[test]
    fn test_display_recipe_json_shape() {
        let recipe = DisplayRecipe {
            title: "Chicken Congee".to_string(),
            image: "x.jpg".to_string(),
            id: "52940".to_string(),
            diet: Diet::NonVegetarian,
            calories: Nutrient::Value(500),
            protein: Nutrient::Value(35),
            carbs: Nutrient::Value(50),
            fat: Nutrient::NotAvailable,
        };

        assert_eq!(
            serde_json::to_value(&recipe).unwrap(),
            json!({
                "title": "Chicken Congee",
                "image": "x.jpg",
                "id": "52940",
                "diet": "NonVegetarian",
                "calories": 500,
                "protein": 35,
                "carbs": 50,
                "fat": "N/A"
            })
        );
    }

    #[test]
    fn test_preference_json_shape() {
        let preference = Preference::new("Vegan");
        assert_eq!(
            serde_json::to_value(&preference).unwrap(),
            json!({"dietary_preference": "Vegan"})
        );
    }
}
