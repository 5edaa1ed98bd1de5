// src/key.rs
// =============================================================================
// This module turns pad URLs into filesystem-safe keys.
//
// A pad URL like "https://pads.example.org/p/Meeting.2024" becomes:
// - split on the page marker:   ["https://pads.example.org", "Meeting.2024"]
// - each part made safe:        ["pads_example_org", "Meeting_2024"]
// - joined for paths/edges:     "pads_example_org/Meeting_2024"
//
// Everything here is pure: no I/O, no state. The mapping is intentionally
// lossy ("a.b" and "a/b" both become "a_b").
//
// Rust concepts:
// - &str vs String: we borrow input and return owned keys
// - Iterators: split/filter/collect chains
// - Generics: normalize_all accepts any sequence of string-like items
// =============================================================================

// The path segment that marks an address as a pad
pub const PAGE_MARKER: &str = "/p/";

// Some servers expose the same pads under a second route; map it to the canonical one
const DUPLICATE_ROUTE: &str = "/etherpad/p/";

// Substrings replaced by an underscore, in this order.
// The schemes go first so "https:" collapses into a single separator.
const SEPARATORS: [&str; 5] = ["https:", "http:", ":", "/", "."];

// Returns true if the address points at a pad (contains the page marker)
pub fn is_page(address: &str) -> bool {
    address.contains(PAGE_MARKER)
}

// Rewrites the duplicate route to the canonical page marker
fn canonicalize(address: &str) -> String {
    address.trim().replace(DUPLICATE_ROUTE, PAGE_MARKER)
}

// Maps one string to its key
//
// Examples:
//   "https://example.org/p/Root" -> "example_org_p_Root"
//   "__a..b__"                   -> "a_b"
//   ""                           -> ""
pub fn normalize(address: &str) -> String {
    let mut key = canonicalize(address);
    for separator in SEPARATORS {
        key = key.replace(separator, "_");
    }

    // Drop empty pieces so leading, trailing and repeated underscores disappear
    key.split('_')
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

// Maps every element of a sequence, preserving order
pub fn normalize_all<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .map(|part| normalize(part.as_ref()))
        .collect()
}

// Splits an address on the page marker after canonicalizing the route
//
// "https://x.org/etherpad/p/Foo" -> ["https://x.org", "Foo"]
pub fn split_address(address: &str) -> Vec<String> {
    canonicalize(address)
        .split(PAGE_MARKER)
        .map(str::to_string)
        .collect()
}

// The per-segment keys of an address, used to build output paths
pub fn segment_keys(address: &str) -> Vec<String> {
    normalize_all(split_address(address))
}

// Segment keys joined with '/', the form written to edges.csv
pub fn path_key(address: &str) -> String {
    segment_keys(address).join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_url() {
        assert_eq!(normalize("https://example.org/p/Root"), "example_org_p_Root");
    }

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("__a..b//c__"), "a_b_c");
        assert_eq!(normalize("http://host:9001"), "host_9001");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let address = "https://pads.example.org/p/Some.Pad";
        assert_eq!(normalize(address), normalize(address));
    }

    #[test]
    fn test_duplicate_route_is_canonical() {
        assert_eq!(
            normalize("https://x.org/etherpad/p/Foo"),
            normalize("https://x.org/p/Foo")
        );
        assert_eq!(
            path_key("https://x.org/etherpad/p/Foo"),
            path_key("https://x.org/p/Foo")
        );
    }

    #[test]
    fn test_normalize_all_matches_elementwise() {
        let parts = vec!["https://example.org", "Root.Pad", " spaced ", ""];
        let expected: Vec<String> = parts.iter().map(|p| normalize(p)).collect();
        assert_eq!(normalize_all(&parts), expected);
        assert_eq!(normalize_all(&parts).len(), parts.len());
    }

    #[test]
    fn test_path_key() {
        assert_eq!(path_key("https://example.org/p/Root"), "example_org/Root");
        assert_eq!(segment_keys("https://example.org/p/a.b"), vec!["example_org", "a_b"]);
    }

    #[test]
    fn test_is_page() {
        assert!(is_page("https://example.org/p/Root"));
        assert!(!is_page("https://example.org/about"));
    }
}
