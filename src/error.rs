use thiserror::Error;

/// Failure acquiring or driving the browser session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to connect to any WebDriver server (last tried {url})")]
    Connect { url: String },

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        source: fantoccini::error::CmdError,
    },

    #[error("navigation to {url} timed out")]
    NavigationTimeout { url: String },

    #[error("webdriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),
}

/// Failure of a single read-only in-page query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("in-page query failed: {0}")]
    Script(#[from] fantoccini::error::CmdError),

    #[error("in-page query returned an unexpected shape: {0}")]
    Shape(String),
}

/// Failure of the single text-generation call.
///
/// Only this error family can turn a clone request into a fallback
/// document; everything upstream degrades per-extractor instead.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Network(String),

    #[error("generation API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generation timed out after {0}s")]
    Timeout(u64),

    #[error("generation returned no text content")]
    EmptyResponse,

    #[error("no generation API key configured (set CLAUDE_API_KEY or OPENAI_API_KEY)")]
    MissingApiKey,
}

/// Top-level failure of a clone run, before a snapshot exists.
///
/// Once a snapshot is built the pipeline never fails hard; generation
/// trouble is absorbed into a fallback document.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write output to {path}: {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },
}
