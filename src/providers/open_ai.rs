use crate::config::ProviderConfig;
use crate::providers::{LlmProvider, GUIDE_SYSTEM_PROMPT};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai";

/// Chat completions client for OpenAI and OpenAI-compatible hosts such as Groq.
pub struct OpenAIProvider {
    client: Client,
    name: &'static str,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::from_config("openai", config, "OPENAI_API_KEY", OPENAI_BASE_URL)
    }

    /// Create a Groq provider; Groq serves the OpenAI chat completions API
    pub fn groq(config: &ProviderConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::from_config("groq", config, "GROQ_API_KEY", GROQ_BASE_URL)
    }

    fn from_config(
        name: &'static str,
        config: &ProviderConfig,
        key_var: &str,
        default_base_url: &str,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(key_var).ok())
            .ok_or_else(|| format!("{} not found in config or environment", key_var))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url.to_string());

        Ok(OpenAIProvider {
            client: Client::new(),
            name,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            name: "openai",
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        self.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": GUIDE_SYSTEM_PROMPT},
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        let response_body: Value = response.json().await?;
        debug!("{} response: {:?}", self.name, response_body);

        if !status.is_success() {
            return Err(format!("{} API error {}: {}", self.name, status, response_body).into());
        }

        let guide = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to extract content from response")?
            .to_string();

        Ok(guide)
    }
}
