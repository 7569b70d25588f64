// Re-export modules
pub mod cloner;
pub mod config;
pub mod error;
pub mod extractors;
pub mod session;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use snapshot::{CloneStatus, ClonedDocument, PageSnapshot};

use crate::cloner::generate::generator_for;
use crate::config::{CloneConfig, GenerationConfig};
use crate::error::CloneError;
use crate::session::BrowserPage;
use std::time::Instant;

/// Outcome of a full clone run
#[derive(Debug, Clone)]
pub struct CloneOutcome {
    /// Everything extracted from the live page
    pub snapshot: PageSnapshot,

    /// The generated (or fallback) document
    pub document: ClonedDocument,

    /// Seconds for the whole run, scrape plus generation
    pub processing_time_secs: f64,
}

/// Main builder for cloning a rendered page into a standalone document
pub struct PageCloner {
    url: String,
    config: CloneConfig,
}

impl PageCloner {
    /// Create a new builder for the given page URL
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            config: CloneConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CloneConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = CloneConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Set the browser viewport size
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    /// Set the navigation timeout in seconds
    pub fn with_navigation_timeout(mut self, secs: u64) -> Self {
        self.config.navigation_timeout_secs = secs;
        self
    }

    /// Set explicit generation settings instead of reading the environment
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.config.generation = Some(generation);
        self
    }

    /// Scrape the page and build its snapshot, without generating anything
    pub async fn scrape(&self) -> Result<PageSnapshot, CloneError> {
        let mut config = self.config.clone();

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        let page = BrowserPage::open(&self.url, &config).await?;
        let snapshot = extractors::extract_snapshot(&page, &self.url, &config).await;

        if let Err(e) = page.close().await {
            ::log::warn!("Failed to close browser session: {}", e);
        }

        Ok(snapshot)
    }

    /// Scrape, compose, generate and validate in one pass.
    ///
    /// Scraping trouble is the only hard failure; once a snapshot exists
    /// the result is always a document, possibly the fallback one.
    pub async fn run(&self) -> Result<CloneOutcome, CloneError> {
        let started = Instant::now();

        let snapshot = self.scrape().await?;

        let generation = match &self.config.generation {
            Some(generation) => generation.clone(),
            None => GenerationConfig::from_env()?,
        };
        let generator = generator_for(&generation);

        let document =
            cloner::clone_page(&snapshot, generator.as_ref(), generation.timeout_secs).await;

        Ok(CloneOutcome {
            snapshot,
            document,
            processing_time_secs: started.elapsed().as_secs_f64(),
        })
    }
}
