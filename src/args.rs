use clap::Parser;
use mirror_page::config::CloneConfig;

#[derive(Parser, Debug)]
#[command(name = "mirror-page")]
#[command(about = "Clones a rendered web page into a standalone HTML document")]
#[command(version)]
pub struct Args {
    /// URL of the page to clone
    pub url: String,

    /// File the cloned document is written to
    #[arg(short, long, default_value = "cloned_site.html")]
    pub output: String,

    /// WebDriver endpoint (overrides config file)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Viewport width in pixels
    #[arg(long)]
    pub viewport_width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub viewport_height: Option<u32>,

    /// Navigation timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Only scrape and print the snapshot as JSON; skip generation
    #[arg(long)]
    pub scrape_only: bool,
}

/// Build the run configuration from the config file plus CLI overrides
pub fn build_config(args: &Args) -> Result<CloneConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => CloneConfig::from_file(path)?,
        None => CloneConfig::default(),
    };

    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }
    if let Some(width) = args.viewport_width {
        config.viewport_width = width;
    }
    if let Some(height) = args.viewport_height {
        config.viewport_height = height;
    }
    if let Some(timeout) = args.timeout {
        config.navigation_timeout_secs = timeout;
    }

    Ok(config)
}
