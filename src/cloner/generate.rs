use crate::config::{GenerationConfig, Provider};
use crate::error::GenerationError;
use async_trait::async_trait;
use serde_json::{Value, json};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Single-shot text generation capability.
///
/// One call per clone request; the caller wraps it in a timeout and maps
/// any failure into the fallback document.
#[async_trait]
pub trait HtmlGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// The provider client selected by the configuration
pub fn generator_for(config: &GenerationConfig) -> Box<dyn HtmlGenerator> {
    match config.provider {
        Provider::Anthropic => Box::new(AnthropicGenerator::new(config.clone())),
        Provider::OpenAi => Box::new(OpenAiGenerator::new(config.clone())),
    }
}

/// Client for the Anthropic messages API
pub struct AnthropicGenerator {
    config: GenerationConfig,
    client: reqwest::Client,
}

impl AnthropicGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HtmlGenerator for AnthropicGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.config.model_name(),
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": system,
            "messages": [{ "role": "user", "content": prompt }]
        });

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        value["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Client for the OpenAI chat completions API
pub struct OpenAiGenerator {
    config: GenerationConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HtmlGenerator for OpenAiGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.config.model_name(),
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt }
            ]
        });

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        value["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Error payloads from both providers share {"error": {"message": ...}};
/// fall back to the raw body when the shape differs.
fn api_error(status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string());
    GenerationError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_extracts_message() {
        let err = api_error(429, r#"{"error": {"message": "rate limited", "type": "rate_limit_error"}}"#);
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(502, "upstream exploded");
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
