use regex::Regex;

/// Characters of markup kept for prompt embedding
pub const MAX_MARKUP_CHARS: usize = 3000;

/// Marker appended when markup is truncated
const ELLIPSIS: &str = "...";

/// Clean raw markup for prompt embedding.
///
/// Removes script and style elements with their content (any casing,
/// spanning lines), strips comments and leftover orphan script/style
/// tags, collapses whitespace runs to single spaces, and truncates to
/// 3000 characters plus an ellipsis marker.
pub fn clean_markup(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let script_blocks = Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("static pattern");
    let style_blocks = Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("static pattern");
    let comments = Regex::new(r"(?s)<!--.*?-->").expect("static pattern");
    // Unpaired tags left behind by malformed markup
    let orphan_tags = Regex::new(r"(?i)</?(?:script|style)[^>]*>?").expect("static pattern");
    let whitespace = Regex::new(r"\s+").expect("static pattern");

    let cleaned = script_blocks.replace_all(markup, "");
    let cleaned = style_blocks.replace_all(&cleaned, "");
    let cleaned = comments.replace_all(&cleaned, "");
    let cleaned = orphan_tags.replace_all(&cleaned, "");
    let cleaned = whitespace.replace_all(&cleaned, " ");

    truncate_with_ellipsis(&cleaned)
}

fn truncate_with_ellipsis(text: &str) -> String {
    if text.chars().count() > MAX_MARKUP_CHARS {
        let mut truncated: String = text.chars().take(MAX_MARKUP_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        text.to_string()
    }
}
