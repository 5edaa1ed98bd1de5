// src/crawl/engine.rs
// =============================================================================
// This module implements the depth-first pad crawl.
//
// How it works:
// 1. Start with the seed pad on a stack
// 2. Pop a pad; if it came from a link, record the edge (parent -> pad)
// 3. Skip it if it was already visited, otherwise mark it visited
// 4. Fetch both exports and write them to disk
// 5. Push every link found in the HTML (last link first, so the first
//    link is crawled next)
// 6. Repeat until the stack is empty
//
// Popping from a Vec gives exactly the order a recursive crawl would produce:
// the edge to the first link, then everything reachable through it, then the
// edge to the second link, and so on. Unlike recursion, a long chain of pads
// only grows the heap-allocated stack, never the call stack.
//
// A pad is fetched at most once per run. Failures (timeouts, 404s, refused
// directories) are logged and only end the crawl of that one pad.
//
// Rust concepts:
// - HashSet: visited pads (O(1) lookup)
// - Vec as a stack: push() / pop() for depth-first order
// =============================================================================

use crate::error::StoreError;
use crate::fetch::{FetchOutcome, PageFetcher};
use crate::key;
use crate::links;
use crate::store::PageStore;
use std::collections::HashSet;
use tracing::{error, info, warn};

// One observed link between two pads, as path keys ("server/pad")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            from: key::path_key(source),
            to: key::path_key(target),
        }
    }
}

// Everything a finished crawl hands back
#[derive(Debug, Default)]
pub struct EdgeGraph {
    /// Links in discovery order, duplicates kept
    pub edges: Vec<Edge>,
    /// Every address that was dispatched to the fetcher
    pub visited: HashSet<String>,
    /// Pads whose exports were written to disk
    pub stored: usize,
}

// A pad waiting on the stack
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    // The pad whose HTML linked here; None for the seed
    parent: Option<String>,
}

// The engine owns its collaborators; a run borrows them immutably
pub struct CrawlEngine {
    fetcher: PageFetcher,
    store: PageStore,
}

impl CrawlEngine {
    pub fn new(fetcher: PageFetcher, store: PageStore) -> Self {
        Self { fetcher, store }
    }

    // Crawls everything reachable from `seed`
    //
    // The visited set and edge list start empty on every call.
    pub async fn run(&self, seed: &str) -> EdgeGraph {
        let mut graph = EdgeGraph::default();

        // The stack is the frontier: pads seen in a link but not yet processed
        let mut stack = vec![CrawlItem {
            url: seed.to_string(),
            parent: None,
        }];

        // Process the stack until empty
        while let Some(item) = stack.pop() {
            // The edge is recorded even if the target turns out to be visited:
            // it is still a link that exists in the parent pad
            if let Some(parent) = &item.parent {
                graph.edges.push(Edge::between(parent, &item.url));
            }

            info!("STARTED {}", item.url);

            // insert() returns false if the pad was already there
            if !graph.visited.insert(item.url.clone()) {
                info!("IGNORE: url already contained");
                continue;
            }

            // Fetch + store; None means the pad was skipped or failed
            let Some(html) = self.visit(&item.url).await else {
                continue;
            };
            graph.stored += 1;

            // Reverse so the first link in the document is popped first
            let children: Vec<CrawlItem> = links::extract_links(&html)
                .into_iter()
                .flatten() // drop anchors without an href
                .filter(|href| !href.is_empty())
                .map(|href| CrawlItem {
                    url: href,
                    parent: Some(item.url.clone()),
                })
                .collect();
            stack.extend(children.into_iter().rev());
        }

        graph
    }

    // Fetches and stores one pad, returning its HTML when both succeeded
    async fn visit(&self, url: &str) -> Option<String> {
        let artifact = match self.fetcher.fetch(url).await {
            Ok(FetchOutcome::Page(artifact)) => artifact,
            // Already logged by the fetcher
            Ok(FetchOutcome::Skipped(_)) => return None,
            Err(e) => {
                error!("{}", e);
                return None;
            }
        };

        // Only a pad that made it to disk has its links followed
        match self.store.store(url, &artifact) {
            Ok(_) => Some(artifact.html),
            Err(e @ StoreError::PathTooShallow(_)) => {
                warn!("{}", e);
                None
            }
            Err(StoreError::CreationDeclined(dir)) => {
                info!("do NOT create path '{}'", dir.display());
                None
            }
            Err(e @ StoreError::Io { .. }) => {
                error!("{}", e);
                None
            }
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a Vec and not a VecDeque?
//    - VecDeque + pop_front() is breadth-first: all links of the seed first
//    - Vec + pop() is depth-first: follow the first link all the way down
//    - Depth-first keeps edges.csv in the same order as a recursive crawl
//
// 2. Why is the edge pushed when the item is popped, not when it is found?
//    - A link found on the seed must only appear in the edge list after
//      everything reachable through the previous link
//    - Popping happens in exactly that order, so recording at pop time
//      gives the right interleaving for free
//
// 3. What is `let ... else`?
//    - `let Some(html) = expr else { continue; };` binds html if expr is
//      Some, otherwise runs the else block (which must leave the scope)
// -----------------------------------------------------------------------------
