pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod guide;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod storage;

pub use builder::{parse_ingredients, RecipeRecommender, RecipeRecommenderBuilder, Recommendation};
pub use catalog::{Catalog, DietRule};
pub use config::AppConfig;
pub use error::RecommendError;
pub use guide::GuideGenerator;
pub use model::{
    Diet, DisplayRecipe, Nutrient, NutritionFacts, Preference, RawRecipe, TaggedRecipe,
};
pub use pipelines::{filter_by_preference, find_by_title, project, Pipeline, Tagger};

/// Recommend recipes for a comma-separated ingredient list.
///
/// Configuration comes from `config.toml` and `RECIPES__*` environment
/// variables. Results are written to the configured recipes and preferences
/// files.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recommendation = recipe_recommender::recommend("chicken, rice", "Non-Vegetarian").await?;
/// for recipe in &recommendation.recipes {
///     println!("{} ({} kcal)", recipe.title, recipe.calories);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn recommend(
    ingredients: &str,
    preference: &str,
) -> Result<Recommendation, RecommendError> {
    let config = AppConfig::load(None)?;
    RecipeRecommender::builder()
        .ingredients(parse_ingredients(ingredients))
        .preference(preference)
        .config(config)
        .build()
        .await
}

/// Generate a cooking guide for one recipe with the configured providers.
///
/// Provider failures come back as an error string, never as `Err`; `Err` is
/// only returned when the configuration cannot be loaded or names no usable
/// provider.
pub async fn generate_guide(recipe: &DisplayRecipe) -> Result<String, RecommendError> {
    let config = AppConfig::load(None)?;
    let generator = GuideGenerator::from_config(&config.guide)?;
    Ok(generator.generate(recipe).await)
}
