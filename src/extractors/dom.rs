use crate::snapshot::DomNode;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Default recursion bound for the serialized tree
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Attribute names carried into the serialized tree; any `data-`
/// prefixed name is also kept
const ATTRIBUTE_WHITELIST: [&str; 7] = ["src", "href", "alt", "title", "type", "name", "value"];

/// Characters above which leaf text is dropped entirely
const MAX_LEAF_TEXT: usize = 200;

/// Serialize the body subtree of the given markup into a shallow tagged
/// tree.
///
/// Nodes deeper than `max_depth` are omitted, not stubbed. Returns None
/// when the markup has no body to serialize, which callers treat as a
/// whole-extractor failure.
pub fn extract(markup: &str, max_depth: usize) -> Option<DomNode> {
    if markup.trim().is_empty() {
        return None;
    }

    let document = Html::parse_document(markup);
    let body_selector = Selector::parse("body").expect("static selector");
    let body = document.select(&body_selector).next()?;

    serialize_element(body, 0, max_depth)
}

fn serialize_element(element: ElementRef, depth: usize, max_depth: usize) -> Option<DomNode> {
    if depth > max_depth {
        return None;
    }

    let value = element.value();

    let id = value
        .attr("id")
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let classes = value
        .attr("class")
        .map(|class| class.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    let mut attributes = BTreeMap::new();
    for (name, attr_value) in value.attrs() {
        if ATTRIBUTE_WHITELIST.contains(&name) || name.starts_with("data-") {
            attributes.insert(name.to_string(), attr_value.to_string());
        }
    }

    let child_elements: Vec<ElementRef> = element
        .children()
        .filter_map(ElementRef::wrap)
        .collect();

    // Leaf text only: containers defer to their children
    let text = if child_elements.is_empty() {
        let content: String = element.text().collect::<String>().trim().to_string();
        if !content.is_empty() && content.chars().count() < MAX_LEAF_TEXT {
            Some(content)
        } else {
            None
        }
    } else {
        None
    };

    let children = child_elements
        .into_iter()
        .filter_map(|child| serialize_element(child, depth + 1, max_depth))
        .collect();

    Some(DomNode {
        tag: value.name().to_lowercase(),
        id,
        classes,
        attributes,
        text,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth_of(node: &DomNode) -> usize {
        1 + node.children.iter().map(depth_of).max().unwrap_or(0)
    }

    #[test]
    fn test_extract_basic_tree() {
        let markup = r#"<html><body>
            <div id="app" class="shell dark">
                <p>Hello</p>
            </div>
        </body></html>"#;
        let tree = extract(markup, DEFAULT_MAX_DEPTH).unwrap();

        assert_eq!(tree.tag, "body");
        assert_eq!(tree.children.len(), 1);

        let app = &tree.children[0];
        assert_eq!(app.tag, "div");
        assert_eq!(app.id.as_deref(), Some("app"));
        assert_eq!(app.classes, vec!["shell", "dark"]);
        assert_eq!(app.children[0].text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_depth_cap_omits_not_stubs() {
        // 12 nested divs under body, cap at 8
        let mut markup = String::from("<html><body>");
        for i in 0..12 {
            markup.push_str(&format!("<div id=\"d{}\">", i));
        }
        markup.push_str("deep");
        for _ in 0..12 {
            markup.push_str("</div>");
        }
        markup.push_str("</body></html>");

        let tree = extract(&markup, 8).unwrap();
        // body at depth 0 plus eight div levels; nothing below, no stubs
        assert_eq!(depth_of(&tree), 9);

        let mut node = &tree;
        while let Some(child) = node.children.first() {
            node = child;
        }
        assert_eq!(node.id.as_deref(), Some("d7"));
        assert!(node.children.is_empty());
        // The capped node has element children in the source, so no leaf text
        assert!(node.text.is_none());
    }

    #[test]
    fn test_attribute_whitelist() {
        let markup = r#"<html><body>
            <a href="/home" title="Home" onclick="evil()" style="color: red" data-track="nav">x</a>
        </body></html>"#;
        let tree = extract(markup, DEFAULT_MAX_DEPTH).unwrap();
        let anchor = &tree.children[0];

        assert_eq!(anchor.attributes.get("href").map(String::as_str), Some("/home"));
        assert_eq!(anchor.attributes.get("title").map(String::as_str), Some("Home"));
        assert_eq!(
            anchor.attributes.get("data-track").map(String::as_str),
            Some("nav")
        );
        assert!(!anchor.attributes.contains_key("onclick"));
        assert!(!anchor.attributes.contains_key("style"));
    }

    #[test]
    fn test_leaf_text_rules() {
        let long = "y".repeat(300);
        let markup = format!(
            "<html><body><p>short</p><p>{}</p><div><span>inner</span></div></body></html>",
            long
        );
        let tree = extract(&markup, DEFAULT_MAX_DEPTH).unwrap();

        assert_eq!(tree.children[0].text.as_deref(), Some("short"));
        // Long text is dropped, the node itself stays
        assert!(tree.children[1].text.is_none());
        // A node with element children never carries text
        assert!(tree.children[2].text.is_none());
        assert_eq!(tree.children[2].children[0].text.as_deref(), Some("inner"));
    }

    #[test]
    fn test_no_body_is_none() {
        assert!(extract("", DEFAULT_MAX_DEPTH).is_none());
    }
}
