// src/error.rs
// =============================================================================
// Error types for the fetch and store stages.
//
// None of these abort the crawl: the engine logs them and abandons the page.
// Only a missing base URL (handled in main.rs) ends the process early.
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Why a page could not be downloaded
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not finish within the configured timeout
    #[error("timeout for url '{url}'")]
    Timeout { url: String },

    /// Connection refused, DNS failure, TLS failure, ...
    #[error("connection error for url '{url}': {message}")]
    Unreachable { url: String, message: String },

    /// The server kept answering 429 after the configured number of retries
    #[error("still rate limited after {attempts} retries for url '{url}'")]
    RateLimitExhausted { url: String, attempts: u32 },
}

// Why a fetched page was not written to disk
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("too few parts in path '{}'", .0.display())]
    PathTooShallow(PathBuf),

    #[error("creation of '{}' declined", .0.display())]
    CreationDeclined(PathBuf),

    #[error("could not write '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
