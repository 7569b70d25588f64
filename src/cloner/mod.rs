pub mod generate;
pub mod prompt;
pub mod sanitize;
pub mod validate;

#[cfg(test)]
mod tests;

use crate::cloner::generate::HtmlGenerator;
use crate::error::GenerationError;
use crate::snapshot::{CloneStatus, ClonedDocument, PageSnapshot};
use tokio::time::{Duration, timeout};

/// Title substituted when the scraped page had none
const DEFAULT_TITLE: &str = "Website Clone";

/// Run one clone request through its states:
/// Composing -> Generating -> Validating -> Done | Fallback.
///
/// Generating is the only state that can fail the request, and it fails
/// into a fallback document rather than an error: a clone request always
/// returns a document. Validation problems are logged and the output is
/// returned regardless.
pub async fn clone_page(
    snapshot: &PageSnapshot,
    generator: &dyn HtmlGenerator,
    timeout_secs: u64,
) -> ClonedDocument {
    // Composing
    let prompt_text = prompt::compose(snapshot);
    ::log::debug!("Composed prompt ({} characters)", prompt_text.len());

    // Generating
    let generated = match timeout(
        Duration::from_secs(timeout_secs),
        generator.generate(prompt::SYSTEM_INSTRUCTIONS, &prompt_text),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout_secs)),
    };

    match generated {
        Ok(text) => {
            // Validating
            let html = validate::normalize(&text);
            if !validate::has_required_structure(&html) {
                ::log::warn!("Generated HTML may be incomplete");
            }
            ::log::info!("Generated HTML clone ({} characters)", html.len());

            ClonedDocument {
                html,
                status: CloneStatus::Success,
                error: None,
            }
        }
        Err(e) => {
            ::log::error!("Error in HTML generation: {}", e);
            let title = if snapshot.title.is_empty() {
                DEFAULT_TITLE
            } else {
                &snapshot.title
            };

            ClonedDocument {
                html: validate::fallback_document(title, &e.to_string()),
                status: CloneStatus::Fallback,
                error: Some(e.to_string()),
            }
        }
    }
}
