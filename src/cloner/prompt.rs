use crate::cloner::sanitize;
use crate::snapshot::PageSnapshot;
use serde::Serialize;

/// Render-time slice caps for the visual context sections
pub const COLOR_LIMIT: usize = 15;
pub const FONT_LIMIT: usize = 10;
pub const ELEMENT_LIMIT: usize = 15;
pub const IMAGE_LIMIT: usize = 10;
pub const LINK_LIMIT: usize = 15;

/// Standing instructions for the generation model
pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert web designer and front-end developer specializing in:
- Pixel-perfect website replication
- Modern CSS techniques (Flexbox, Grid, Custom Properties)
- Responsive web design
- HTML5 semantic structure
- Cross-browser compatibility
- Visual design principles

CRITICAL INSTRUCTIONS:
1. Generate COMPLETE, VALID HTML documents only
2. Include ALL CSS inline using <style> tags in <head>
3. Use modern CSS techniques for layouts
4. Replicate colors, fonts, spacing, and layouts exactly
5. Make it responsive and accessible
6. NO external dependencies or JavaScript
7. Return ONLY the HTML code, no explanations

Your output will be directly used as an HTML file, so it must be complete and functional.";

/// Render the instruction document for one snapshot.
///
/// Pure and deterministic: identical snapshots produce byte-identical
/// output. The fixed slice caps are applied here at render time.
pub fn compose(snapshot: &PageSnapshot) -> String {
    let context = &snapshot.visual_context;

    let description = snapshot
        .metadata
        .description
        .as_deref()
        .unwrap_or("N/A");

    let markup_summary = sanitize::clean_markup(&snapshot.raw_markup);

    format!(
        r#"You are a world-class web designer and front-end developer. Your task is to create a pixel-perfect HTML clone of a website based on the comprehensive design context provided.

## WEBSITE INFORMATION:
- Title: {title}
- Meta Description: {description}

## VISUAL DESIGN CONTEXT:
### Color Palette:
{colors}

### Typography:
{fonts}

### Layout Structure:
{layout}

### Key Elements (with precise styling):
{elements}

### Images:
{images}

### Navigation Links:
{links}

## ORIGINAL HTML STRUCTURE ANALYSIS:
{markup}

## CRITICAL REQUIREMENTS:

1. **EXACT VISUAL REPLICATION**: Create HTML that looks identical to the original
2. **COMPLETE HTML DOCUMENT**: Include <!DOCTYPE html>, <html>, <head>, and <body>
3. **INLINE CSS**: Use <style> tags in <head> - NO external stylesheets
4. **RESPONSIVE DESIGN**: Ensure it works on different screen sizes
5. **SEMANTIC HTML**: Use proper HTML5 semantic elements
6. **NO JAVASCRIPT**: Static HTML/CSS only
7. **PLACEHOLDER IMAGES**: Use https://via.placeholder.com for images with appropriate dimensions
8. **WORKING NAVIGATION**: Include all navigation elements (even if links are placeholder)

## STYLING GUIDELINES:
- Use exact colors from the color palette
- Replicate font families, sizes, and weights precisely
- Match spacing, margins, and padding exactly
- Recreate layouts using modern CSS (Flexbox/Grid)
- Include hover effects and transitions where visible
- Maintain visual hierarchy and typography scale
- Replicate shadows, borders, and visual effects

## OUTPUT FORMAT:
Return ONLY the complete, valid HTML document. No explanations, no code blocks, just the raw HTML.

Generate the pixel-perfect HTML clone now:
"#,
        title = snapshot.title,
        description = description,
        colors = render_json(&head(&context.colors, COLOR_LIMIT)),
        fonts = render_json(&head(&context.fonts, FONT_LIMIT)),
        layout = render_json(&context.layout),
        elements = render_json(&head(&context.elements, ELEMENT_LIMIT)),
        images = render_json(&head(&context.images, IMAGE_LIMIT)),
        links = render_json(&head(&context.links, LINK_LIMIT)),
        markup = markup_summary,
    )
}

/// Leading slice of at most `limit` entries
fn head<T>(values: &[T], limit: usize) -> &[T] {
    &values[..values.len().min(limit)]
}

/// Pretty JSON with two-space indentation
fn render_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("[]"))
}
