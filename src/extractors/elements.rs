use crate::error::QueryError;
use crate::extractors::PageQuery;
use crate::snapshot::ElementSummary;
use serde_json::Value;
use std::collections::HashMap;

/// Structural tags and common layout class names, scanned in this order
pub const IMPORTANT_SELECTORS: [&str; 25] = [
    "header", "nav", "main", "footer", "section", "article", "aside", "h1", "h2", "h3", "h4",
    "h5", "h6", "p", "div", ".hero", "#hero", ".container", ".wrapper", ".navbar", ".header",
    ".footer", ".content", ".main", ".sidebar",
];

/// Matches kept per selector; the 6th and later are skipped
pub const MAX_PER_SELECTOR: usize = 5;

/// Characters kept of an element's text content
const MAX_TEXT_SNIPPET: usize = 200;

const SUMMARY_SCRIPT_TEMPLATE: &str = r#"
var selectors = __SELECTORS__;
var out = [];
for (var i = 0; i < selectors.length; i++) {
    var matches;
    try { matches = document.querySelectorAll(selectors[i]); } catch (e) { continue; }
    for (var j = 0; j < matches.length && j < __MAX__; j++) {
        var el = matches[j];
        try {
            var s = window.getComputedStyle(el);
            var r = el.getBoundingClientRect();
            out.push({
                selector: selectors[i],
                tagName: el.tagName,
                className: typeof el.className === 'string' ? el.className : '',
                id: el.id,
                position: { top: r.top, left: r.left, width: r.width, height: r.height },
                styles: {
                    display: s.display,
                    position: s.position,
                    width: s.width,
                    height: s.height,
                    padding: s.padding,
                    margin: s.margin,
                    backgroundColor: s.backgroundColor,
                    color: s.color,
                    fontSize: s.fontSize,
                    fontFamily: s.fontFamily,
                    fontWeight: s.fontWeight,
                    textAlign: s.textAlign,
                    border: s.border,
                    borderRadius: s.borderRadius,
                    boxShadow: s.boxShadow,
                    transform: s.transform,
                    opacity: s.opacity,
                    zIndex: s.zIndex,
                    flexDirection: s.flexDirection,
                    justifyContent: s.justifyContent,
                    alignItems: s.alignItems,
                    gridTemplateColumns: s.gridTemplateColumns,
                    gridTemplateRows: s.gridTemplateRows
                },
                textContent: el.textContent ? el.textContent.substring(0, 200) : ''
            });
        } catch (e) {}
    }
}
return out;
"#;

/// The summarization query with the selector list baked in
fn summary_script() -> String {
    let selectors =
        serde_json::to_string(&IMPORTANT_SELECTORS).expect("static selector list serializes");
    SUMMARY_SCRIPT_TEMPLATE
        .replace("__SELECTORS__", &selectors)
        .replace("__MAX__", &MAX_PER_SELECTOR.to_string())
}

/// Summarize the key structural elements of the page
pub async fn extract(page: &dyn PageQuery) -> Result<Vec<ElementSummary>, QueryError> {
    let value = page.query(&summary_script()).await?;
    Ok(parse(&value))
}

/// Turn raw query records into element summaries.
///
/// Malformed records are dropped silently (a detached node mid-scan must
/// not abort the rest), the per-selector cap is enforced here as well,
/// and text snippets are clamped to 200 characters.
pub fn parse(value: &Value) -> Vec<ElementSummary> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let mut per_selector: HashMap<String, usize> = HashMap::new();
    let mut summaries = Vec::new();

    for item in items {
        let Ok(mut summary) = serde_json::from_value::<ElementSummary>(item.clone()) else {
            continue;
        };

        let count = per_selector.entry(summary.selector.clone()).or_insert(0);
        if *count >= MAX_PER_SELECTOR {
            continue;
        }
        *count += 1;

        if summary.text_snippet.chars().count() > MAX_TEXT_SNIPPET {
            summary.text_snippet = summary.text_snippet.chars().take(MAX_TEXT_SNIPPET).collect();
        }
        summaries.push(summary);
    }

    summaries
}
