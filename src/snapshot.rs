use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything captured from a single rendered page in one scrape.
///
/// Immutable once built; the clone workflow only reads from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// URL the scrape was requested for
    pub url: String,

    /// Document title (empty if unreadable)
    pub title: String,

    /// Serialized markup of the live document
    pub raw_markup: String,

    /// Document metadata (description, Open Graph fields, etc.)
    pub metadata: Metadata,

    /// Shallow tagged tree of the body subtree (None if extraction failed)
    pub dom_tree: Option<DomNode>,

    /// Bounded visual summary used to steer generation
    pub visual_context: VisualContext,

    /// One record per document stylesheet
    pub styles: Vec<StylesheetRecord>,

    /// Page-level asset records (images, background images, font links)
    pub assets: Vec<AssetRecord>,

    /// Seconds spent scraping and extracting
    pub processing_time_secs: f64,
}

/// Bounded, deduplicated summary of a page's colors, fonts, layout and
/// key element styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualContext {
    /// Used colors in first-seen order, noise values filtered out
    pub colors: Vec<String>,

    /// Used fonts as "family|size|weight" keys, first-seen order
    pub fonts: Vec<String>,

    /// Body-level layout properties
    pub layout: BodyLayout,

    /// Key structural elements, at most 5 per important selector
    pub elements: Vec<ElementSummary>,

    /// Image references (unbounded at collection, sliced at render time)
    pub images: Vec<ImageRef>,

    /// Anchor references with visible text, capped at 20 at collection
    pub links: Vec<LinkRef>,
}

/// Computed layout properties of the document body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyLayout {
    pub display: String,
    pub flex_direction: String,
    pub justify_content: String,
    pub align_items: String,
    pub padding: String,
    pub margin: String,
    pub background_color: String,
    pub width: String,
    pub min_height: String,
    pub font_family: String,
}

/// One important element with its geometry, styling subset and text snippet.
///
/// Field names serialize to the key names the in-page query produces, so
/// raw query records deserialize straight into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSummary {
    /// Selector from the importance list that matched this element
    pub selector: String,

    pub tag_name: String,

    #[serde(rename = "className", default)]
    pub class_attribute: String,

    #[serde(default)]
    pub id: String,

    /// Viewport-relative bounding box
    pub position: BoundingBox,

    /// Curated subset of computed style properties
    pub styles: StyleSubset,

    /// Text content truncated to 200 characters
    #[serde(rename = "textContent", default)]
    pub text_snippet: String,
}

/// Viewport-relative element geometry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// The fixed set of computed style properties recorded per element summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSubset {
    pub display: String,
    pub position: String,
    pub width: String,
    pub height: String,
    pub padding: String,
    pub margin: String,
    pub background_color: String,
    pub color: String,
    pub font_size: String,
    pub font_family: String,
    pub font_weight: String,
    pub text_align: String,
    pub border: String,
    pub border_radius: String,
    pub box_shadow: String,
    pub transform: String,
    pub opacity: String,
    pub z_index: String,
    pub flex_direction: String,
    pub justify_content: String,
    pub align_items: String,
    pub grid_template_columns: String,
    pub grid_template_rows: String,
}

/// Image element reference for the visual context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,

    #[serde(default)]
    pub alt: String,

    #[serde(default)]
    pub width: u64,

    #[serde(default)]
    pub height: u64,

    #[serde(rename = "className", default)]
    pub class_name: String,

    #[serde(default)]
    pub id: String,
}

/// Anchor element reference with non-empty visible text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRef {
    pub href: String,

    pub text: String,

    #[serde(rename = "className", default)]
    pub class_name: String,

    #[serde(default)]
    pub id: String,
}

/// One node in the shallow serialized body tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub tag: String,

    pub id: Option<String>,

    pub classes: Vec<String>,

    /// Attributes restricted to the fixed whitelist plus data-* names
    pub attributes: BTreeMap<String, String>,

    /// Leaf text, present only for nodes with no element children
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub children: Vec<DomNode>,
}

/// Document metadata; absent source tags yield absent fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

/// One document stylesheet, external or inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StylesheetRecord {
    External {
        href: String,
        rules: u64,
    },
    Inline {
        /// Sheet text truncated to 5000 characters
        content: String,
        rules: u64,
    },
}

/// One page-level asset discovered during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AssetRecord {
    Image {
        src: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        width: u64,
        #[serde(default)]
        height: u64,
        #[serde(rename = "className", default)]
        class_name: String,
        #[serde(default)]
        id: String,
    },
    BackgroundImage {
        src: String,
        /// Tag name of the element carrying the background
        element: String,
        #[serde(rename = "className", default)]
        class_name: String,
    },
    Font {
        src: String,
    },
}

/// Outcome of a clone request: the document plus how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClonedDocument {
    /// The normalized generated markup, or the synthesized fallback document
    pub html: String,

    pub status: CloneStatus,

    /// The triggering error message when status is Fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Whether generation succeeded or the fallback document was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneStatus {
    Success,
    Fallback,
}
