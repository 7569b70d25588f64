use crate::error::QueryError;
use crate::extractors::PageQuery;
use crate::snapshot::BodyLayout;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Fully transparent color, the universal noise value
const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// Default text color, excluded as noise
const DEFAULT_TEXT_COLOR: &str = "rgb(0, 0, 0)";

/// Default background color, excluded as noise
const DEFAULT_BACKGROUND_COLOR: &str = "rgb(255, 255, 255)";

/// One element's computed color and font properties, as returned by the
/// in-page sampling query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSample {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
}

const SAMPLE_SCRIPT: &str = r#"
var samples = [];
var all = document.querySelectorAll('*');
for (var i = 0; i < all.length; i++) {
    var s = window.getComputedStyle(all[i]);
    samples.push({
        color: s.color,
        backgroundColor: s.backgroundColor,
        borderColor: s.borderColor,
        fontFamily: s.fontFamily,
        fontSize: s.fontSize,
        fontWeight: s.fontWeight
    });
}
var body = window.getComputedStyle(document.body);
return {
    samples: samples,
    layout: {
        display: body.display,
        flexDirection: body.flexDirection,
        justifyContent: body.justifyContent,
        alignItems: body.alignItems,
        padding: body.padding,
        margin: body.margin,
        backgroundColor: body.backgroundColor,
        width: body.width,
        minHeight: body.minHeight,
        fontFamily: body.fontFamily
    }
};
"#;

/// Sample every element's computed colors and fonts plus the body layout
pub async fn extract(
    page: &dyn PageQuery,
) -> Result<(Vec<String>, Vec<String>, BodyLayout), QueryError> {
    let value = page.query(SAMPLE_SCRIPT).await?;
    Ok(parse(&value))
}

/// Split the query result into palette, fonts and body layout
pub fn parse(value: &Value) -> (Vec<String>, Vec<String>, BodyLayout) {
    let samples = collect_samples(value.get("samples"));
    let (colors, fonts) = sample_palette(&samples);

    let layout = value
        .get("layout")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    (colors, fonts, layout)
}

/// Deserialize raw samples one by one, skipping malformed records
fn collect_samples(value: Option<&Value>) -> Vec<StyleSample> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

/// Deduplicated colors and font keys in first-seen order.
///
/// Near-universal values are filtered out as noise: full transparency
/// everywhere, pure black as a text color, pure white as a background,
/// and the literal `inherit` font family.
pub fn sample_palette(samples: &[StyleSample]) -> (Vec<String>, Vec<String>) {
    let mut colors = Vec::new();
    let mut seen_colors = HashSet::new();
    let mut fonts = Vec::new();
    let mut seen_fonts = HashSet::new();

    for sample in samples {
        if let Some(color) = &sample.color {
            if !color.is_empty() && color != TRANSPARENT && color != DEFAULT_TEXT_COLOR {
                push_unique(&mut colors, &mut seen_colors, color);
            }
        }
        if let Some(background) = &sample.background_color {
            if !background.is_empty()
                && background != TRANSPARENT
                && background != DEFAULT_BACKGROUND_COLOR
            {
                push_unique(&mut colors, &mut seen_colors, background);
            }
        }
        if let Some(border) = &sample.border_color {
            if !border.is_empty() && border != TRANSPARENT {
                push_unique(&mut colors, &mut seen_colors, border);
            }
        }

        if let Some(family) = &sample.font_family {
            if !family.is_empty() && family != "inherit" {
                let size = sample.font_size.as_deref().unwrap_or_default();
                let weight = sample.font_weight.as_deref().unwrap_or_default();
                let key = format!("{}|{}|{}", family, size, weight);
                push_unique(&mut fonts, &mut seen_fonts, &key);
            }
        }
    }

    (colors, fonts)
}

fn push_unique(values: &mut Vec<String>, seen: &mut HashSet<String>, value: &str) {
    if seen.insert(value.to_string()) {
        values.push(value.to_string());
    }
}
