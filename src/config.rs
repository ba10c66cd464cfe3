use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::catalog::Catalog;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Recipe source settings
    #[serde(default)]
    pub meal_db: MealDbConfig,
    /// Cache and output file locations
    #[serde(default)]
    pub storage: StorageConfig,
    /// LLM providers used for cooking guides
    #[serde(default)]
    pub guide: GuideConfig,
    /// Diet keyword rules and nutrition table
    #[serde(default)]
    pub catalog: Catalog,
}

/// Configuration for TheMealDB client
#[derive(Debug, Deserialize, Clone)]
pub struct MealDbConfig {
    /// API root, without the key segment
    #[serde(default = "default_meal_db_url")]
    pub base_url: String,
    /// TheMealDB key; "1" is the public test key
    #[serde(default = "default_meal_db_key")]
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            base_url: default_meal_db_url(),
            api_key: default_meal_db_key(),
            timeout: default_timeout(),
        }
    }
}

/// Where run results and the ingredient cache are kept
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Whether fetched ingredients are cached on disk
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
    #[serde(default = "default_recipes_file")]
    pub recipes_file: String,
    #[serde(default = "default_preferences_file")]
    pub preferences_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_file: default_cache_file(),
            recipes_file: default_recipes_file(),
            preferences_file: default_preferences_file(),
        }
    }
}

/// Configuration for cooking guide generation
#[derive(Debug, Deserialize, Clone)]
pub struct GuideConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Fallback configuration for automatic provider switching
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            fallback: FallbackConfig::default(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Model identifier (e.g., "llama3-70b-8192", "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Configuration for provider fallback and retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// Whether fallback is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Order of providers to try (first to last)
    #[serde(default)]
    pub order: Vec<String>,
    /// Number of retry attempts per provider before fallback
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay unit between retries in milliseconds, multiplied by the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

// Default value functions
fn default_meal_db_url() -> String {
    "https://www.themealdb.com/api/json/v1".to_string()
}

fn default_meal_db_key() -> String {
    "1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_cache_file() -> String {
    "cache.json".to_string()
}

fn default_recipes_file() -> String {
    "recipes.json".to_string()
}

fn default_preferences_file() -> String {
    "preferences.json".to_string()
}

fn default_provider() -> String {
    "groq".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    HashMap::from([("groq".to_string(), ProviderConfig::new("llama3-70b-8192"))])
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. The given file, or config.toml in the current directory if present
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__GUIDE__PROVIDERS__GROQ__API_KEY
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Parse configuration from a TOML document, without environment overrides
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

/// Load configuration from file and environment variables
///
/// An explicit `path` must exist; without one, `config.toml` in the working
/// directory is used when present.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("config").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: RECIPES__MEAL_DB__API_KEY
        .add_source(
            Environment::with_prefix("RECIPES")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Diet, Nutrient};

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(
            config.meal_db.base_url,
            "https://www.themealdb.com/api/json/v1"
        );
        assert_eq!(config.meal_db.api_key, "1");
        assert_eq!(config.meal_db.timeout, 30);
        assert!(config.storage.cache_enabled);
        assert_eq!(config.storage.recipes_file, "recipes.json");
        assert_eq!(config.guide.default_provider, "groq");
        assert_eq!(config.guide.providers["groq"].model, "llama3-70b-8192");
        assert_eq!(config.catalog, Catalog::default());
    }

    #[test]
    fn test_fallback_config_default() {
        let fallback = FallbackConfig::default();
        assert!(!fallback.enabled);
        assert!(fallback.order.is_empty());
        assert_eq!(fallback.retry_attempts, 3);
        assert_eq!(fallback.retry_delay_ms, 1000);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.meal_db.api_key, "1");
        assert_eq!(config.storage.cache_file, "cache.json");
        assert!(config.guide.providers.contains_key("groq"));
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [meal_db]
            base_url = "http://localhost:9000"
            timeout = 5

            [storage]
            cache_enabled = false

            [guide]
            default_provider = "openai"

            [guide.providers.openai]
            model = "gpt-4o-mini"
            temperature = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.meal_db.base_url, "http://localhost:9000");
        assert_eq!(config.meal_db.api_key, "1");
        assert_eq!(config.meal_db.timeout, 5);
        assert!(!config.storage.cache_enabled);
        let openai = &config.guide.providers["openai"];
        assert!(openai.enabled);
        assert_eq!(openai.model, "gpt-4o-mini");
        assert_eq!(openai.max_tokens, 2000);
        assert!(!config.guide.providers.contains_key("groq"));
    }

    #[test]
    fn test_toml_catalog() {
        let config = AppConfig::from_toml(
            r#"
            [[catalog.rules]]
            diet = "Vegan"
            keywords = ["tofu", "tempeh"]

            [[catalog.rules]]
            diet = "Non-Vegetarian"
            keywords = ["lamb"]

            [catalog.nutrition.123]
            calories = 410
            protein = 22
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.rules.len(), 2);
        assert_eq!(config.catalog.rules[0].diet, Diet::Vegan);
        assert_eq!(config.catalog.rules[1].diet, Diet::NonVegetarian);
        assert_eq!(config.catalog.classify("Lamb Tagine"), Diet::NonVegetarian);

        let facts = config.catalog.nutrition_for("123");
        assert_eq!(facts.calories, Nutrient::Value(410));
        assert_eq!(facts.fat, Nutrient::NotAvailable);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = load_config(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }
}
