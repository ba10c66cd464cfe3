use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::RecipeSource;
use crate::config::MealDbConfig;
use crate::model::{MealRecord, RawRecipe};
use crate::RecommendError;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeRecommender/0.1)";

#[derive(Debug, Deserialize)]
struct FilterResponse {
    /// TheMealDB answers `{"meals": null}` when nothing matches
    #[serde(default)]
    meals: Option<Vec<MealRecord>>,
}

/// Lists recipes from TheMealDB's `filter.php?i=<ingredient>` endpoint.
pub struct MealDbFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MealDbFetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &MealDbConfig) -> Result<Self, RecommendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(MealDbFetcher {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        MealDbFetcher {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}/filter.php", self.base_url, self.api_key)
    }
}

#[async_trait]
impl RecipeSource for MealDbFetcher {
    fn source_name(&self) -> &str {
        "themealdb"
    }

    async fn fetch(&self, ingredient: &str) -> Result<Vec<RawRecipe>, RecommendError> {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            debug!("Skipping blank ingredient");
            return Ok(Vec::new());
        }

        let url = self.endpoint();
        debug!("API URL: {}?i={}", url, ingredient);

        let response = match self
            .client
            .get(&url)
            .query(&[("i", ingredient)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Error fetching recipes for '{}': {}", ingredient, e);
                return Ok(Vec::new());
            }
        };

        let status = response.status();
        debug!("Response status code: {}", status);
        if !status.is_success() {
            warn!("Error fetching recipes for '{}': {}", ingredient, status);
            return Ok(Vec::new());
        }

        let body: FilterResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Unreadable response for '{}': {}", ingredient, e);
                return Ok(Vec::new());
            }
        };

        let recipes = body
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(RawRecipe::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Found {} recipes for '{}'", recipes.len(), ingredient);
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_key() {
        let fetcher = MealDbFetcher::with_base_url("https://www.themealdb.com/api/json/v1/", "1");
        assert_eq!(
            fetcher.endpoint(),
            "https://www.themealdb.com/api/json/v1/1/filter.php"
        );
    }

    #[test]
    fn test_new_from_config() {
        let fetcher = MealDbFetcher::new(&MealDbConfig::default()).unwrap();
        assert_eq!(fetcher.source_name(), "themealdb");
        assert!(fetcher.endpoint().ends_with("/1/filter.php"));
    }

    #[tokio::test]
    async fn test_blank_ingredient_skips_request() {
        let fetcher = MealDbFetcher::with_base_url("http://127.0.0.1:9", "1");
        let recipes = fetcher.fetch("   ").await.unwrap();
        assert!(recipes.is_empty());
    }
}
