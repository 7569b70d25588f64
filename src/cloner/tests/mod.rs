mod prompt_tests;

use crate::snapshot::{
    BodyLayout, BoundingBox, ElementSummary, ImageRef, LinkRef, Metadata, PageSnapshot,
    StyleSubset, VisualContext,
};

/// A snapshot with enough material in every section to exercise the
/// render-time slice caps.
pub(crate) fn sample_snapshot() -> PageSnapshot {
    let colors: Vec<String> = (0..20).map(|i| format!("rgb({}, 0, 0)", i)).collect();
    let fonts: Vec<String> = (0..12).map(|i| format!("Font{}|16px|400", i)).collect();

    let elements: Vec<ElementSummary> = (0..18)
        .map(|i| ElementSummary {
            selector: "div".to_string(),
            tag_name: "DIV".to_string(),
            class_attribute: format!("card card-{}", i),
            id: String::new(),
            position: BoundingBox {
                top: 10.0 * i as f64,
                left: 0.0,
                width: 320.0,
                height: 48.0,
            },
            styles: StyleSubset {
                display: "block".to_string(),
                color: "rgb(20, 20, 20)".to_string(),
                ..Default::default()
            },
            text_snippet: format!("card {}", i),
        })
        .collect();

    let images: Vec<ImageRef> = (0..14)
        .map(|i| ImageRef {
            src: format!("https://example.com/img/{}.png", i),
            alt: format!("image {}", i),
            width: 640,
            height: 480,
            class_name: String::new(),
            id: String::new(),
        })
        .collect();

    let links: Vec<LinkRef> = (0..20)
        .map(|i| LinkRef {
            href: format!("https://example.com/page/{}", i),
            text: format!("page {}", i),
            class_name: "nav-link".to_string(),
            id: String::new(),
        })
        .collect();

    PageSnapshot {
        url: "https://example.com".to_string(),
        title: "Example Domain".to_string(),
        raw_markup:
            "<html><head><script>tracker();</script></head><body><h1>Example</h1></body></html>"
                .to_string(),
        metadata: Metadata {
            description: Some("An example page".to_string()),
            ..Default::default()
        },
        dom_tree: None,
        visual_context: VisualContext {
            colors,
            fonts,
            layout: BodyLayout {
                display: "block".to_string(),
                font_family: "Arial, sans-serif".to_string(),
                ..Default::default()
            },
            elements,
            images,
            links,
        },
        styles: Vec::new(),
        assets: Vec::new(),
        processing_time_secs: 0.0,
    }
}
