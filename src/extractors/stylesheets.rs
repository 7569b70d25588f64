use crate::error::QueryError;
use crate::extractors::PageQuery;
use crate::snapshot::StylesheetRecord;
use serde_json::Value;

/// Characters of inline sheet text kept per record
pub const MAX_INLINE_CONTENT: usize = 5000;

const STYLESHEETS_SCRIPT: &str = r#"
var sheets = [];
for (var i = 0; i < document.styleSheets.length; i++) {
    var sheet = document.styleSheets[i];
    try {
        if (sheet.href) {
            sheets.push({
                type: 'external',
                href: sheet.href,
                rules: sheet.cssRules ? sheet.cssRules.length : 0
            });
        } else {
            var content = sheet.ownerNode ? sheet.ownerNode.textContent : '';
            if (content.trim()) {
                sheets.push({
                    type: 'inline',
                    content: content.substring(0, 5000),
                    rules: sheet.cssRules ? sheet.cssRules.length : 0
                });
            }
        }
    } catch (e) {
        // Cross-origin stylesheet, skip
    }
}
return sheets;
"#;

/// List the document's stylesheets, external and inline
pub async fn extract(page: &dyn PageQuery) -> Result<Vec<StylesheetRecord>, QueryError> {
    let value = page.query(STYLESHEETS_SCRIPT).await?;
    Ok(parse(&value))
}

/// Records from the raw query value, malformed entries skipped and
/// inline content clamped to 5000 characters
pub fn parse(value: &Value) -> Vec<StylesheetRecord> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value::<StylesheetRecord>(item.clone()).ok())
        .map(|record| match record {
            StylesheetRecord::Inline { content, rules }
                if content.chars().count() > MAX_INLINE_CONTENT =>
            {
                StylesheetRecord::Inline {
                    content: content.chars().take(MAX_INLINE_CONTENT).collect(),
                    rules,
                }
            }
            other => other,
        })
        .collect()
}
