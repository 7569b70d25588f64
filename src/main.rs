use clap::Parser;
use mirror_page::PageCloner;
use mirror_page::snapshot::CloneStatus;

mod args;
use args::{Args, build_config};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting clone for URL: {}", args.url);

    println!("Note: Cloning requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    // Assemble the configuration from file and CLI overrides
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return;
        }
    };

    let cloner = PageCloner::new(&args.url).with_config(config);

    if args.scrape_only {
        scrape_and_print(&cloner).await;
        return;
    }

    // Scrape, generate and validate
    let outcome = match cloner.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            ::log::error!("Clone run failed: {}", e);
            return;
        }
    };

    match outcome.document.status {
        CloneStatus::Success => {
            ::log::info!(
                "Clone generated in {:.2} seconds ({} characters)",
                outcome.processing_time_secs,
                outcome.document.html.len()
            );
        }
        CloneStatus::Fallback => {
            ::log::warn!(
                "Generation failed, wrote fallback document: {}",
                outcome.document.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if let Err(e) = std::fs::write(&args.output, &outcome.document.html) {
        ::log::error!("Failed to write {}: {}", args.output, e);
        return;
    }

    println!("Wrote cloned document to {}", args.output);
}

/// Scrape-only mode: print the snapshot as pretty JSON
async fn scrape_and_print(cloner: &PageCloner) {
    match cloner.scrape().await {
        Ok(snapshot) => {
            ::log::info!(
                "Scraped snapshot in {:.2} seconds",
                snapshot.processing_time_secs
            );
            match serde_json::to_string_pretty(&snapshot) {
                Ok(rendered) => println!("{}", rendered),
                Err(e) => ::log::error!("Failed to render snapshot: {}", e),
            }
        }
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
        }
    }
}
