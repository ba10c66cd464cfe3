use log::{debug, error, info};

use crate::config::GuideConfig;
use crate::model::DisplayRecipe;
use crate::providers::{build_guide_prompt, FallbackProvider, LlmProvider, ProviderFactory};
use crate::RecommendError;

/// Produces a step-by-step cooking guide for a selected recipe.
pub struct GuideGenerator {
    provider: Box<dyn LlmProvider>,
}

impl GuideGenerator {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider chain described by `config`
    pub fn from_config(config: &GuideConfig) -> Result<Self, RecommendError> {
        let provider = FallbackProvider::new(config)
            .map_err(|e| RecommendError::ProviderError(e.to_string()))?;
        Ok(Self::new(Box::new(provider)))
    }

    /// Use one named provider from `config`, bypassing the fallback chain
    pub fn with_provider_name(config: &GuideConfig, name: &str) -> Result<Self, RecommendError> {
        let provider_config = config.providers.get(name).ok_or_else(|| {
            RecommendError::ProviderError(format!(
                "Provider '{}' not found in configuration (supported: {})",
                name,
                ProviderFactory::available_providers().join(", ")
            ))
        })?;
        let provider = ProviderFactory::create(name, provider_config)
            .map_err(|e| RecommendError::ProviderError(e.to_string()))?;
        Ok(Self::new(provider))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub async fn try_generate(&self, recipe: &DisplayRecipe) -> Result<String, RecommendError> {
        let prompt = build_guide_prompt(recipe);
        debug!("Generated prompt for LLM: {}", prompt);

        let guide = self
            .provider
            .complete(&prompt)
            .await
            .map_err(|e| RecommendError::ProviderError(e.to_string()))?;
        info!(
            "Received guide for '{}' from {}",
            recipe.title,
            self.provider.provider_name()
        );
        Ok(guide)
    }

    /// The guide text, or an explanatory error string when the provider fails.
    /// The output is passed through as-is.
    pub async fn generate(&self, recipe: &DisplayRecipe) -> String {
        match self.try_generate(recipe).await {
            Ok(guide) => guide,
            Err(e) => {
                error!("Error in LLM invocation: {}", e);
                format!("Error generating detailed guide: {}", e)
            }
        }
    }
}
