use log::{info, warn};
use std::time::Duration;

use crate::config::AppConfig;
use crate::fetchers::{CachedSource, MealDbFetcher, RecipeSource};
use crate::model::{DisplayRecipe, Preference, RawRecipe};
use crate::pipelines::{find_by_title, Pipeline};
use crate::storage;
use crate::RecommendError;

/// Result of one recommendation run
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Preference the recipes were filtered by
    pub preference: Preference,
    /// Deduplicated, display-ready recipes in order of first appearance
    pub recipes: Vec<DisplayRecipe>,
    /// Number of raw records returned by the source, duplicates included
    pub fetched: usize,
}

impl Recommendation {
    /// True for the "No recipes found" outcome
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Case-insensitive exact title lookup
    pub fn find(&self, title: &str) -> Option<&DisplayRecipe> {
        find_by_title(&self.recipes, title)
    }
}

/// Split a comma-separated ingredient list, dropping blank entries
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|ingredient| !ingredient.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder for configuring and executing a recommendation run
#[derive(Default)]
pub struct RecipeRecommenderBuilder {
    ingredients: Vec<String>,
    preference: Option<Preference>,
    config: Option<AppConfig>,
    source: Option<Box<dyn RecipeSource>>,
    timeout: Option<Duration>,
    cache: Option<bool>,
    skip_persist: bool,
}

impl RecipeRecommenderBuilder {
    /// Add one ingredient to look up
    ///
    /// # Example
    /// ```
    /// use recipe_recommender::RecipeRecommender;
    ///
    /// let builder = RecipeRecommender::builder()
    ///     .ingredient("chicken")
    ///     .ingredient("rice");
    /// ```
    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredients.push(ingredient.into());
        self
    }

    /// Add several ingredients at once
    pub fn ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients
            .extend(ingredients.into_iter().map(Into::into));
        self
    }

    /// Set the dietary preference recipes are filtered by
    ///
    /// # Example
    /// ```
    /// use recipe_recommender::RecipeRecommender;
    ///
    /// let builder = RecipeRecommender::builder()
    ///     .ingredient("paneer")
    ///     .preference("Vegetarian");
    /// ```
    pub fn preference(mut self, preference: impl Into<String>) -> Self {
        self.preference = Some(Preference::new(preference));
        self
    }

    /// Use an explicit configuration instead of the defaults
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace TheMealDB with another recipe source
    pub fn source(mut self, source: Box<dyn RecipeSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set a timeout for HTTP requests to TheMealDB
    ///
    /// Only the built-in TheMealDB fetcher honours this. A source supplied
    /// through [`source`](Self::source) is used as given and the timeout is
    /// ignored.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Turn the ingredient cache on or off, overriding configuration
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = Some(enabled);
        self
    }

    /// Do not write `recipes.json` and `preferences.json` after the run
    pub fn skip_persist(mut self) -> Self {
        self.skip_persist = true;
        self
    }

    /// Fetch, tag, filter, deduplicate and persist
    ///
    /// # Errors
    /// Returns `RecommendError` if:
    /// - No ingredient or no preference was specified
    /// - The source returns a record without a required field
    /// - The result files cannot be written
    ///
    /// An unreachable recipe source is not an error; it yields an empty
    /// recommendation.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_recommender::RecipeRecommender;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recommendation = RecipeRecommender::builder()
    ///     .ingredient("chicken")
    ///     .preference("Non-Vegetarian")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Recommendation, RecommendError> {
        let ingredients: Vec<String> = self
            .ingredients
            .iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        if ingredients.is_empty() {
            return Err(RecommendError::BuilderError(
                "No ingredients specified. Use .ingredient() or .ingredients()".to_string(),
            ));
        }

        let preference = self.preference.ok_or_else(|| {
            RecommendError::BuilderError(
                "No dietary preference specified. Use .preference()".to_string(),
            )
        })?;

        let mut config = self.config.unwrap_or_default();
        if let Some(timeout) = self.timeout {
            config.meal_db.timeout = timeout.as_secs().max(1);
        }

        let source: Box<dyn RecipeSource> = match self.source {
            Some(source) => source,
            None => Box::new(MealDbFetcher::new(&config.meal_db)?),
        };
        let source: Box<dyn RecipeSource> =
            if self.cache.unwrap_or(config.storage.cache_enabled) {
                Box::new(CachedSource::new(source, &config.storage.cache_file))
            } else {
                source
            };

        let mut all_recipes: Vec<RawRecipe> = Vec::new();
        for ingredient in &ingredients {
            let recipes = source.fetch(ingredient).await?;
            info!("{} recipes for '{}'", recipes.len(), ingredient);
            all_recipes.extend(recipes);
        }
        let fetched = all_recipes.len();
        if fetched == 0 {
            warn!("No recipes found for {:?}", ingredients);
        }

        let pipeline = Pipeline::new(config.catalog.clone());
        let recipes = pipeline.run(all_recipes, &preference);

        if !self.skip_persist {
            storage::save_recipes(&config.storage.recipes_file, &recipes).await?;
            storage::save_preference(&config.storage.preferences_file, &preference).await?;
        }

        Ok(Recommendation {
            preference,
            recipes,
            fetched,
        })
    }
}

/// Main entry point for the builder API
pub struct RecipeRecommender;

impl RecipeRecommender {
    /// Creates a new builder for a recommendation run
    ///
    /// # Example
    /// ```
    /// use recipe_recommender::RecipeRecommender;
    ///
    /// let builder = RecipeRecommender::builder();
    /// ```
    pub fn builder() -> RecipeRecommenderBuilder {
        RecipeRecommenderBuilder::default()
    }
}
