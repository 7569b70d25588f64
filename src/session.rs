use crate::config::CloneConfig;
use crate::error::{QueryError, SessionError};
use crate::extractors::PageQuery;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use tokio::time::{Duration, sleep, timeout};

/// A live browser page reached over WebDriver.
///
/// Owns the session exclusively for the duration of the extraction; all
/// in-page queries go through this one client.
pub struct BrowserPage {
    client: Client,
}

/// Connects to the WebDriver instance, trying common fallbacks
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, SessionError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    // If we couldn't connect, try with common alternative URLs
    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4723", // Appium default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue; // Skip if it's the same as the one we already tried
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!("Failed to connect to any WebDriver servers");
    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(SessionError::Connect {
        url: webdriver_url.to_string(),
    })
}

impl BrowserPage {
    /// Open a session, size the viewport and navigate to the target URL.
    ///
    /// Navigation is retried twice on failure before giving up; after a
    /// successful load the configured settle delay lets dynamic content
    /// finish rendering.
    pub async fn open(url: &str, config: &CloneConfig) -> Result<Self, SessionError> {
        let client = connect_to_webdriver(&config.webdriver_url).await?;

        if let Err(e) = client
            .set_window_size(config.viewport_width, config.viewport_height)
            .await
        {
            ::log::warn!("Failed to size viewport: {}", e);
        }

        let page = Self { client };
        page.navigate(url, config.navigation_timeout_secs).await?;

        if config.settle_ms > 0 {
            sleep(Duration::from_millis(config.settle_ms)).await;
        }

        Ok(page)
    }

    /// Navigate with up to 3 attempts
    async fn navigate(&self, url: &str, timeout_secs: u64) -> Result<(), SessionError> {
        ::log::info!("Navigating to: {}", url);

        let mut last_err = None;
        for attempt in 0..3 {
            if attempt > 0 {
                ::log::warn!("Navigation attempt {} failed, retrying...", attempt);
                sleep(Duration::from_secs(2)).await;
            }

            match timeout(Duration::from_secs(timeout_secs), self.client.goto(url)).await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(e)) => last_err = Some(e),
                Err(_) => {
                    ::log::error!("Timeout navigating to: {}", url);
                    last_err = None;
                }
            }
        }

        match last_err {
            Some(source) => Err(SessionError::Navigation {
                url: url.to_string(),
                source,
            }),
            None => Err(SessionError::NavigationTimeout {
                url: url.to_string(),
            }),
        }
    }

    /// The URL the browser actually ended up on after redirects
    pub async fn current_url(&self) -> Result<String, SessionError> {
        let url = self.client.current_url().await?;
        Ok(url.to_string())
    }

    /// Close the underlying WebDriver session
    pub async fn close(self) -> Result<(), SessionError> {
        self.client.close().await?;
        Ok(())
    }
}

#[async_trait]
impl PageQuery for BrowserPage {
    async fn query(&self, script: &str) -> Result<serde_json::Value, QueryError> {
        let value = self.client.execute(script, vec![]).await?;
        Ok(value)
    }

    async fn markup(&self) -> Result<String, QueryError> {
        let source = self.client.source().await?;
        Ok(source)
    }
}
