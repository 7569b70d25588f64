use regex::Regex;

/// Canonical declaration prepended to undeclared documents
pub const DOCTYPE_LINE: &str = "<!DOCTYPE html>";

/// Substrings every structurally sound document must contain
const REQUIRED_MARKERS: [&str; 4] = ["<!doctype", "<html", "<head", "<body"];

/// Normalize raw generated text into a usable document.
///
/// Strips a leading fenced-code-block marker labeled `html` (any casing)
/// and a trailing fence, then prepends the canonical doctype when the
/// text does not already start with one.
pub fn normalize(raw: &str) -> String {
    let opening_fence = Regex::new(r"(?i)^```html\n?").expect("static pattern");
    let closing_fence = Regex::new(r"\n?```$").expect("static pattern");

    let cleaned = opening_fence.replace(raw.trim(), "");
    let cleaned = closing_fence.replace(cleaned.trim(), "").to_string();

    let mut cleaned = cleaned.trim().to_string();
    if !cleaned.to_lowercase().starts_with("<!doctype") {
        cleaned = format!("{}\n{}", DOCTYPE_LINE, cleaned);
    }

    cleaned
}

/// Whether the document carries all four structural markers
pub fn has_required_structure(html: &str) -> bool {
    let lower = html.to_lowercase();
    REQUIRED_MARKERS.iter().all(|marker| lower.contains(marker))
}

/// Synthesize the minimal replacement document shown when generation
/// itself failed, embedding the page title and the error message.
pub fn fallback_document(title: &str, error_message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }}
        .error-container {{
            max-width: 800px;
            margin: 0 auto;
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }}
        h1 {{
            color: #e74c3c;
            margin-bottom: 20px;
        }}
        .error-message {{
            background: #fdf2f2;
            border: 1px solid #fca5a5;
            padding: 15px;
            border-radius: 4px;
            margin-top: 20px;
        }}
    </style>
</head>
<body>
    <div class="error-container">
        <h1>Website Clone Generation Failed</h1>
        <p>We encountered an error while generating the website clone.</p>
        <div class="error-message">
            <strong>Error:</strong> {error_message}
        </div>
        <p>Please try again or contact support if the issue persists.</p>
    </div>
</body>
</html>"#
    )
}
