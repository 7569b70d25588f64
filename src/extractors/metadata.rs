use crate::snapshot::Metadata;
use scraper::{Html, Selector};

/// Read the fixed document metadata fields from the serialized markup.
///
/// Every field is an independent lookup; a missing tag leaves its field
/// absent. Unparseable or empty markup yields the empty mapping.
pub fn extract(markup: &str) -> Metadata {
    if markup.trim().is_empty() {
        return Metadata::default();
    }

    let document = Html::parse_document(markup);

    Metadata {
        description: meta_content(&document, r#"meta[name="description"]"#),
        keywords: meta_content(&document, r#"meta[name="keywords"]"#),
        author: meta_content(&document, r#"meta[name="author"]"#),
        og_title: meta_content(&document, r#"meta[property="og:title"]"#),
        og_description: meta_content(&document, r#"meta[property="og:description"]"#),
        og_image: meta_content(&document, r#"meta[property="og:image"]"#),
        twitter_card: meta_content(&document, r#"meta[name="twitter:card"]"#),
        viewport: meta_content(&document, r#"meta[name="viewport"]"#),
        favicon: link_href(
            &document,
            &[r#"link[rel="icon"]"#, r#"link[rel="shortcut icon"]"#],
        ),
        canonical: link_href(&document, &[r#"link[rel="canonical"]"#]),
    }
}

/// Content attribute of the first element matching the selector
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("static selector");
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Href of the first element matching any selector, in precedence order
fn link_href(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector in selectors {
        let selector = Selector::parse(selector).expect("static selector");
        if let Some(href) = document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("href"))
        {
            return Some(href.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_fields() {
        let markup = r#"<html><head>
            <meta name="description" content="A demo page">
            <meta name="keywords" content="demo, page">
            <meta name="author" content="Jordan">
            <meta property="og:title" content="Demo">
            <meta property="og:description" content="OG description">
            <meta property="og:image" content="https://example.com/og.png">
            <meta name="twitter:card" content="summary">
            <meta name="viewport" content="width=device-width">
            <link rel="icon" href="/favicon.ico">
            <link rel="canonical" href="https://example.com/">
        </head><body></body></html>"#;

        let meta = extract(markup);
        assert_eq!(meta.description.as_deref(), Some("A demo page"));
        assert_eq!(meta.keywords.as_deref(), Some("demo, page"));
        assert_eq!(meta.author.as_deref(), Some("Jordan"));
        assert_eq!(meta.og_title.as_deref(), Some("Demo"));
        assert_eq!(meta.og_description.as_deref(), Some("OG description"));
        assert_eq!(meta.og_image.as_deref(), Some("https://example.com/og.png"));
        assert_eq!(meta.twitter_card.as_deref(), Some("summary"));
        assert_eq!(meta.viewport.as_deref(), Some("width=device-width"));
        assert_eq!(meta.favicon.as_deref(), Some("/favicon.ico"));
        assert_eq!(meta.canonical.as_deref(), Some("https://example.com/"));
    }

    #[test]
    fn test_absent_tags_yield_absent_fields() {
        let meta = extract("<html><head><title>t</title></head><body></body></html>");
        assert!(meta.description.is_none());
        assert!(meta.og_title.is_none());
        assert!(meta.favicon.is_none());
        assert!(meta.canonical.is_none());
    }

    #[test]
    fn test_favicon_precedence() {
        let markup = r#"<html><head>
            <link rel="shortcut icon" href="/legacy.ico">
            <link rel="icon" href="/modern.svg">
        </head><body></body></html>"#;
        let meta = extract(markup);
        // rel="icon" wins over rel="shortcut icon" regardless of position
        assert_eq!(meta.favicon.as_deref(), Some("/modern.svg"));
    }

    #[test]
    fn test_shortcut_icon_fallback() {
        let markup = r#"<html><head>
            <link rel="shortcut icon" href="/legacy.ico">
        </head><body></body></html>"#;
        assert_eq!(extract(markup).favicon.as_deref(), Some("/legacy.ico"));
    }

    #[test]
    fn test_empty_markup() {
        let meta = extract("");
        assert!(meta.description.is_none());
        assert!(meta.viewport.is_none());
    }
}
