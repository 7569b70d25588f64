use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a page clone run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Browser viewport width in pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Browser viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Navigation timeout in seconds
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Delay after load for dynamic content to settle, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Maximum recursion depth for the serialized DOM tree
    #[serde(default = "default_dom_depth")]
    pub dom_depth: usize,

    /// Text generation settings (absent means: read from environment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,
}

/// Which hosted model family serves the generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAi,
}

/// Settings for the single text-generation call per clone request.
///
/// Built explicitly and passed down to the call site; there is no
/// module-global client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub provider: Provider,

    /// API key for the selected provider
    pub api_key: String,

    /// Model identifier (None selects the provider default)
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Hard timeout for the generation call in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default viewport width
fn default_viewport_width() -> u32 {
    1920
}

/// Default viewport height
fn default_viewport_height() -> u32 {
    1080
}

/// Default navigation timeout in seconds
fn default_navigation_timeout() -> u64 {
    30
}

/// Default settle delay in milliseconds
fn default_settle_ms() -> u64 {
    3000
}

/// Default DOM serialization depth
fn default_dom_depth() -> usize {
    8
}

/// Default sampling temperature
fn default_temperature() -> f64 {
    0.1
}

/// Default completion token limit
fn default_max_tokens() -> u32 {
    8192
}

/// Default generation timeout in seconds
fn default_generation_timeout() -> u64 {
    120
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            navigation_timeout_secs: default_navigation_timeout(),
            settle_ms: default_settle_ms(),
            dom_depth: default_dom_depth(),
            generation: None,
        }
    }
}

impl CloneConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl GenerationConfig {
    /// Build generation settings from the environment.
    ///
    /// Prefers Anthropic when CLAUDE_API_KEY is set, falling back to
    /// OpenAI via OPENAI_API_KEY.
    pub fn from_env() -> Result<Self, GenerationError> {
        if let Ok(key) = std::env::var("CLAUDE_API_KEY") {
            if !key.is_empty() {
                return Ok(Self::for_provider(Provider::Anthropic, key));
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                return Ok(Self::for_provider(Provider::OpenAi, key));
            }
        }
        Err(GenerationError::MissingApiKey)
    }

    /// Settings for a provider with its default model
    pub fn for_provider(provider: Provider, api_key: String) -> Self {
        Self {
            provider,
            api_key,
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_generation_timeout(),
        }
    }

    /// The model identifier to request, falling back to the provider default
    pub fn model_name(&self) -> &str {
        match &self.model {
            Some(model) => model,
            None => match self.provider {
                Provider::Anthropic => "claude-3-5-sonnet-20241022",
                Provider::OpenAi => "gpt-4o",
            },
        }
    }
}
