// src/links.rs
// =============================================================================
// This module pulls the links out of an exported pad.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// The hrefs are returned exactly as written, in document order. We do not
// resolve relative links or filter by scheme: the crawl engine decides what
// to do with each one (and the fetcher ignores anything that isn't a pad).
// =============================================================================

use scraper::{Html, Selector};

// Returns the href of every <a> element, in document order
//
// Anchors without an href yield None so callers see exactly what the page
// contained.
//
// Example:
//   html = "<a href='/p/A'>A</a><a name='top'></a>"
//   result = [Some("/p/A"), None]
pub fn extract_links(html: &str) -> Vec<Option<String>> {
    let document = Html::parse_document(html);

    // The selector is a constant, so parsing can only fail on a programmer error
    let selector = Selector::parse("a").expect("'a' is a valid CSS selector");

    document
        .select(&selector)
        .map(|element| element.value().attr("href").map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order() {
        let html = r#"
            <p>
              <a href="https://example.org/p/L1">one</a>
              <a href="https://example.org/p/L2">two</a>
            </p>
            <a href="https://example.org/p/L3">three</a>
        "#;
        let links = extract_links(html);
        assert_eq!(
            links,
            vec![
                Some("https://example.org/p/L1".to_string()),
                Some("https://example.org/p/L2".to_string()),
                Some("https://example.org/p/L3".to_string()),
            ]
        );
    }

    #[test]
    fn test_anchor_without_href() {
        let html = r#"<a name="top"></a><a href="">empty</a>"#;
        assert_eq!(extract_links(html), vec![None, Some(String::new())]);
    }

    #[test]
    fn test_hrefs_are_not_resolved() {
        let html = r#"<a href="/p/Relative">rel</a><a href="mailto:a@b.c">mail</a>"#;
        assert_eq!(
            extract_links(html),
            vec![Some("/p/Relative".to_string()), Some("mailto:a@b.c".to_string())]
        );
    }

    #[test]
    fn test_no_links() {
        assert!(extract_links("<p>just text</p>").is_empty());
    }
}
