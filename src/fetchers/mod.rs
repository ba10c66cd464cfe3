mod cache;
mod meal_db;

pub use cache::CachedSource;
pub use meal_db::MealDbFetcher;

use async_trait::async_trait;

use crate::model::RawRecipe;
use crate::RecommendError;

/// Anything that can list recipes for one ingredient.
///
/// Transport failures are absorbed by the source and reported as an empty
/// list. `Err` is reserved for records that break the data contract, such
/// as a recipe without an id.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Short name used in logs (e.g., "themealdb", "cache")
    fn source_name(&self) -> &str;

    async fn fetch(&self, ingredient: &str) -> Result<Vec<RawRecipe>, RecommendError>;
}

#[async_trait]
impl<T: RecipeSource + ?Sized> RecipeSource for Box<T> {
    fn source_name(&self) -> &str {
        (**self).source_name()
    }

    async fn fetch(&self, ingredient: &str) -> Result<Vec<RawRecipe>, RecommendError> {
        (**self).fetch(ingredient).await
    }
}
