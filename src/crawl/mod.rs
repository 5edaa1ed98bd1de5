// src/crawl/mod.rs
// =============================================================================
// This module handles the pad crawl.
//
// Features:
// - Depth-first crawling from a seed pad, following links in document order
// - Every pad fetched at most once per run
// - The link graph collected on the way and written to edges.csv at the end
// =============================================================================

mod edges;
mod engine;

pub use edges::write_edges;
pub use engine::CrawlEngine;
