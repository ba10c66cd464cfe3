use thiserror::Error;

/// Errors that can occur while recommending recipes
#[derive(Error, Debug)]
pub enum RecommendError {
    /// HTTP client failure that could not be absorbed by the recipe source
    #[error("Failed to fetch recipes: {0}")]
    FetchError(#[from] reqwest::Error),

    /// A recipe record from the source lacks a field the pipeline needs
    #[error("Recipe record is missing required field '{0}'")]
    MissingField(&'static str),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Reading or writing a cache, recipes or preferences file failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The LLM provider could not produce a guide
    #[error("Provider error: {0}")]
    ProviderError(String),
}
