pub mod assets;
pub mod dom;
pub mod elements;
pub mod metadata;
pub mod styles;
pub mod stylesheets;

use crate::config::CloneConfig;
use crate::error::QueryError;
use crate::snapshot::{PageSnapshot, VisualContext};
use async_trait::async_trait;
use std::time::Instant;

/// Read-only query capability against a live, rendered document.
///
/// Implementations run a script inside the page and hand back the
/// structured result; `BrowserPage` does this over WebDriver. A query may
/// fail on its own (detached page, cross-origin restriction) without
/// poisoning the session.
#[async_trait]
pub trait PageQuery: Send + Sync {
    /// Execute a read-only script in the page and return its value
    async fn query(&self, script: &str) -> Result<serde_json::Value, QueryError>;

    /// Serialized markup of the current document
    async fn markup(&self) -> Result<String, QueryError>;
}

const TITLE_SCRIPT: &str = "return document.title;";

/// Builds a complete PageSnapshot from a live page.
///
/// Sub-extractors run sequentially against the single page resource and
/// their results are merged only after all of them have finished. A
/// failing sub-extractor contributes its empty value and the scan
/// continues; nothing here aborts the snapshot.
pub async fn extract_snapshot(
    page: &dyn PageQuery,
    url: &str,
    config: &CloneConfig,
) -> PageSnapshot {
    let started = Instant::now();

    let title = match page.query(TITLE_SCRIPT).await {
        Ok(value) => value.as_str().unwrap_or_default().to_string(),
        Err(e) => {
            ::log::warn!("Title read failed: {}", e);
            String::new()
        }
    };

    let raw_markup = match page.markup().await {
        Ok(source) => source,
        Err(e) => {
            ::log::warn!("Markup read failed: {}", e);
            String::new()
        }
    };

    // In-page sub-extractors, each failure-isolated
    let (colors, fonts, layout) = match styles::extract(page).await {
        Ok(sampled) => sampled,
        Err(e) => {
            ::log::warn!("Style sampling failed: {}", e);
            Default::default()
        }
    };

    let elements = match elements::extract(page).await {
        Ok(elements) => elements,
        Err(e) => {
            ::log::warn!("Element summarization failed: {}", e);
            Vec::new()
        }
    };

    let (images, links) = match assets::extract_visual(page).await {
        Ok(catalog) => catalog,
        Err(e) => {
            ::log::warn!("Asset cataloging failed: {}", e);
            (Vec::new(), Vec::new())
        }
    };

    let styles = match stylesheets::extract(page).await {
        Ok(sheets) => sheets,
        Err(e) => {
            ::log::warn!("Stylesheet listing failed: {}", e);
            Vec::new()
        }
    };

    let assets = match assets::extract_records(page).await {
        Ok(records) => records,
        Err(e) => {
            ::log::warn!("Asset record extraction failed: {}", e);
            Vec::new()
        }
    };

    // Merge once, after every sub-extractor has returned
    let visual_context = VisualContext {
        colors,
        fonts,
        layout,
        elements,
        images,
        links,
    };

    // Markup-derived extractors; each fails atomically for its own scope
    let dom_tree = dom::extract(&raw_markup, config.dom_depth);
    let metadata = metadata::extract(&raw_markup);

    ::log::info!(
        "Extracted snapshot for {}: {} colors, {} fonts, {} elements, {} images, {} links",
        url,
        visual_context.colors.len(),
        visual_context.fonts.len(),
        visual_context.elements.len(),
        visual_context.images.len(),
        visual_context.links.len()
    );

    PageSnapshot {
        url: url.to_string(),
        title,
        raw_markup,
        metadata,
        dom_tree,
        visual_context,
        styles,
        assets,
        processing_time_secs: started.elapsed().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    /// PageQuery double that serves canned values keyed by script markers
    struct FakePage {
        markup: String,
    }

    #[async_trait]
    impl PageQuery for FakePage {
        async fn query(&self, script: &str) -> Result<Value, QueryError> {
            if script.contains("document.title") {
                Ok(json!("Fake Page"))
            } else if script.contains("styleSheets") {
                Ok(json!([]))
            } else if script.contains("samples") {
                Ok(json!({ "samples": [], "layout": {} }))
            } else {
                Ok(json!([]))
            }
        }

        async fn markup(&self) -> Result<String, QueryError> {
            Ok(self.markup.clone())
        }
    }

    /// PageQuery double where every query raises
    struct BrokenPage;

    #[async_trait]
    impl PageQuery for BrokenPage {
        async fn query(&self, _script: &str) -> Result<Value, QueryError> {
            Err(QueryError::Shape("page went away".to_string()))
        }

        async fn markup(&self) -> Result<String, QueryError> {
            Err(QueryError::Shape("page went away".to_string()))
        }
    }

    #[tokio::test]
    async fn test_extract_snapshot_basic() {
        let page = FakePage {
            markup: "<html><head></head><body><p>hi</p></body></html>".to_string(),
        };
        let snapshot =
            extract_snapshot(&page, "https://example.com", &CloneConfig::default()).await;

        assert_eq!(snapshot.url, "https://example.com");
        assert_eq!(snapshot.title, "Fake Page");
        assert!(snapshot.dom_tree.is_some());
        assert!(snapshot.visual_context.colors.is_empty());
    }

    #[tokio::test]
    async fn test_extract_snapshot_survives_total_query_failure() {
        let snapshot =
            extract_snapshot(&BrokenPage, "https://example.com", &CloneConfig::default()).await;

        // Every sub-extractor failed, yet a snapshot still comes back
        assert_eq!(snapshot.title, "");
        assert_eq!(snapshot.raw_markup, "");
        assert!(snapshot.dom_tree.is_none());
        assert!(snapshot.visual_context.elements.is_empty());
        assert!(snapshot.styles.is_empty());
        assert!(snapshot.assets.is_empty());
    }
}
