use crate::error::QueryError;
use crate::extractors::PageQuery;
use crate::snapshot::{AssetRecord, ImageRef, LinkRef};
use regex::Regex;
use serde_json::Value;
use url::Url;

/// Hard cap on link references collected for the visual context
pub const MAX_LINKS: usize = 20;

const VISUAL_ASSETS_SCRIPT: &str = r#"
var images = [];
var imgs = document.querySelectorAll('img');
for (var i = 0; i < imgs.length; i++) {
    var img = imgs[i];
    images.push({
        src: img.src,
        alt: img.alt || '',
        width: img.width || img.naturalWidth || 0,
        height: img.height || img.naturalHeight || 0,
        className: typeof img.className === 'string' ? img.className : '',
        id: img.id
    });
}
var links = [];
var anchors = document.querySelectorAll('a');
for (var i = 0; i < anchors.length; i++) {
    var a = anchors[i];
    links.push({
        href: a.href,
        text: a.textContent ? a.textContent.trim() : '',
        className: typeof a.className === 'string' ? a.className : '',
        id: a.id
    });
}
return { images: images, links: links };
"#;

const ASSET_RECORDS_SCRIPT: &str = r#"
var images = [];
var imgs = document.querySelectorAll('img');
for (var i = 0; i < imgs.length; i++) {
    var img = imgs[i];
    if (img.src) {
        images.push({
            src: img.src,
            alt: img.alt || '',
            width: img.naturalWidth || img.width || 0,
            height: img.naturalHeight || img.height || 0,
            className: typeof img.className === 'string' ? img.className : '',
            id: img.id
        });
    }
}
var backgrounds = [];
var all = document.querySelectorAll('*');
for (var i = 0; i < all.length; i++) {
    var bg = window.getComputedStyle(all[i]).backgroundImage;
    if (bg && bg !== 'none' && bg.indexOf('url(') !== -1) {
        backgrounds.push({
            value: bg,
            element: all[i].tagName,
            className: typeof all[i].className === 'string' ? all[i].className : ''
        });
    }
}
var fonts = [];
var sheets = document.querySelectorAll('link[rel="stylesheet"]');
for (var i = 0; i < sheets.length; i++) {
    if (sheets[i].href && sheets[i].href.indexOf('font') !== -1) {
        fonts.push(sheets[i].href);
    }
}
return { images: images, backgrounds: backgrounds, fonts: fonts };
"#;

/// Collect image and link references for the visual context
pub async fn extract_visual(
    page: &dyn PageQuery,
) -> Result<(Vec<ImageRef>, Vec<LinkRef>), QueryError> {
    let value = page.query(VISUAL_ASSETS_SCRIPT).await?;
    Ok(catalog(&value))
}

/// Collect page-level asset records (images, backgrounds, font sheets)
pub async fn extract_records(page: &dyn PageQuery) -> Result<Vec<AssetRecord>, QueryError> {
    let value = page.query(ASSET_RECORDS_SCRIPT).await?;
    Ok(records(&value))
}

/// Image refs (src required) and link refs (non-empty trimmed text,
/// capped at 20 while collecting, never by later truncation).
pub fn catalog(value: &Value) -> (Vec<ImageRef>, Vec<LinkRef>) {
    let images = array_items::<ImageRef>(value.get("images"))
        .into_iter()
        .filter(|image| !image.src.is_empty())
        .collect();

    let mut links = Vec::new();
    for mut link in array_items::<LinkRef>(value.get("links")) {
        link.text = link.text.trim().to_string();
        if link.text.is_empty() {
            continue;
        }
        links.push(link);
        if links.len() >= MAX_LINKS {
            break;
        }
    }

    (images, links)
}

/// Page-level asset records from the raw query value.
///
/// Image and background sources are kept only when scheme-qualified.
pub fn records(value: &Value) -> Vec<AssetRecord> {
    let mut out = Vec::new();

    for image in array_items::<ImageRef>(value.get("images")) {
        if is_absolute(&image.src) {
            out.push(AssetRecord::Image {
                src: image.src,
                alt: image.alt,
                width: image.width,
                height: image.height,
                class_name: image.class_name,
                id: image.id,
            });
        }
    }

    if let Some(backgrounds) = value.get("backgrounds").and_then(Value::as_array) {
        for item in backgrounds {
            let Some(declaration) = item.get("value").and_then(Value::as_str) else {
                continue;
            };
            if let Some(src) = background_url(declaration) {
                out.push(AssetRecord::BackgroundImage {
                    src,
                    element: string_field(item, "element"),
                    class_name: string_field(item, "className"),
                });
            }
        }
    }

    if let Some(fonts) = value.get("fonts").and_then(Value::as_array) {
        for href in fonts.iter().filter_map(Value::as_str) {
            out.push(AssetRecord::Font {
                src: href.to_string(),
            });
        }
    }

    out
}

/// First URL operand of a background-image declaration, if absolute.
///
/// Handles `url("...")`, `url('...')` and unquoted `url(...)` forms.
pub fn background_url(declaration: &str) -> Option<String> {
    let pattern = Regex::new(r#"url\(["']?([^"')]+)["']?\)"#).ok()?;
    let captured = pattern.captures(declaration)?.get(1)?.as_str().to_string();
    if is_absolute(&captured) {
        Some(captured)
    } else {
        None
    }
}

/// Whether a source reference carries an http(s) scheme
fn is_absolute(src: &str) -> bool {
    matches!(Url::parse(src), Ok(url) if url.scheme() == "http" || url.scheme() == "https")
}

fn array_items<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn link(href: &str, text: &str) -> Value {
        json!({ "href": href, "text": text, "className": "", "id": "" })
    }

    #[test]
    fn test_catalog_link_cap() {
        let links: Vec<Value> = (0..30)
            .map(|i| link(&format!("https://example.com/{}", i), &format!("link {}", i)))
            .collect();
        let (_, refs) = catalog(&json!({ "links": links }));
        assert_eq!(refs.len(), MAX_LINKS);
        assert_eq!(refs[0].text, "link 0");
    }

    #[test]
    fn test_catalog_skips_empty_link_text() {
        let value = json!({
            "links": [
                link("https://example.com/a", "   "),
                link("https://example.com/b", " Read more "),
            ]
        });
        let (_, refs) = catalog(&value);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].text, "Read more");
    }

    #[test]
    fn test_catalog_requires_image_src() {
        let value = json!({
            "images": [
                { "src": "", "alt": "decorative" },
                { "src": "https://example.com/logo.png", "alt": "logo" },
            ]
        });
        let (images, _) = catalog(&value);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "https://example.com/logo.png");
    }

    #[test]
    fn test_background_url_forms() {
        assert_eq!(
            background_url(r#"url("https://cdn.example.com/bg.jpg")"#),
            Some("https://cdn.example.com/bg.jpg".to_string())
        );
        assert_eq!(
            background_url("url('https://cdn.example.com/bg.jpg')"),
            Some("https://cdn.example.com/bg.jpg".to_string())
        );
        assert_eq!(
            background_url("url(https://cdn.example.com/bg.jpg)"),
            Some("https://cdn.example.com/bg.jpg".to_string())
        );
    }

    #[test]
    fn test_background_url_relative_dropped() {
        assert_eq!(background_url(r#"url("/assets/bg.jpg")"#), None);
        assert_eq!(background_url("none"), None);
        assert_eq!(background_url("linear-gradient(red, blue)"), None);
    }

    #[test]
    fn test_records_filter_relative_images() {
        let value = json!({
            "images": [
                { "src": "https://example.com/a.png", "alt": "" },
                { "src": "data:image/png;base64,AAAA", "alt": "" },
            ],
            "backgrounds": [
                { "value": "url(\"https://example.com/bg.png\")", "element": "DIV", "className": "hero" }
            ],
            "fonts": ["https://fonts.example.com/css?family=Inter"]
        });
        let records = records(&value);
        assert_eq!(records.len(), 3);
        assert!(matches!(&records[0], AssetRecord::Image { src, .. } if src.ends_with("a.png")));
        assert!(
            matches!(&records[1], AssetRecord::BackgroundImage { element, .. } if element == "DIV")
        );
        assert!(matches!(&records[2], AssetRecord::Font { src } if src.contains("fonts")));
    }
}
