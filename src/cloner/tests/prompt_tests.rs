use super::sample_snapshot;
use crate::cloner::prompt;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_is_deterministic() {
        let snapshot = sample_snapshot();
        let first = prompt::compose(&snapshot);
        let second = prompt::compose(&snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compose_embeds_page_information() {
        let rendered = prompt::compose(&sample_snapshot());
        assert!(rendered.contains("- Title: Example Domain"));
        assert!(rendered.contains("- Meta Description: An example page"));
        assert!(rendered.contains("Arial, sans-serif"));
    }

    #[test]
    fn test_compose_applies_slice_caps() {
        let rendered = prompt::compose(&sample_snapshot());

        // 15th color (index 14) is the last one in; index 15 is out
        assert!(rendered.contains("rgb(14, 0, 0)"));
        assert!(!rendered.contains("rgb(15, 0, 0)"));

        // fonts cut at 10
        assert!(rendered.contains("Font9|16px|400"));
        assert!(!rendered.contains("Font10|16px|400"));

        // elements cut at 15
        assert!(rendered.contains("card 14"));
        assert!(!rendered.contains("card 15"));

        // images cut at 10
        assert!(rendered.contains("img/9.png"));
        assert!(!rendered.contains("img/10.png"));

        // links cut at 15
        assert!(rendered.contains("page/14"));
        assert!(!rendered.contains("page/15"));
    }

    #[test]
    fn test_compose_sanitizes_embedded_markup() {
        let rendered = prompt::compose(&sample_snapshot());
        assert!(!rendered.to_lowercase().contains("<script"));
        assert!(!rendered.contains("tracker()"));
        assert!(rendered.contains("<h1>Example</h1>"));
    }

    #[test]
    fn test_compose_missing_description_renders_placeholder() {
        let mut snapshot = sample_snapshot();
        snapshot.metadata.description = None;
        let rendered = prompt::compose(&snapshot);
        assert!(rendered.contains("- Meta Description: N/A"));
    }

    #[test]
    fn test_compose_fixed_instruction_block() {
        let rendered = prompt::compose(&sample_snapshot());
        assert!(rendered.contains("COMPLETE HTML DOCUMENT"));
        assert!(rendered.contains("NO JAVASCRIPT"));
        assert!(rendered.contains("https://via.placeholder.com"));
        assert!(rendered.ends_with("Generate the pixel-perfect HTML clone now:\n"));
    }
}
