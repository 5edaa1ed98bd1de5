// src/fetch/mod.rs
// =============================================================================
// This module downloads pad exports.
//
// Submodules:
// - http: the HttpClient trait and its reqwest implementation
// - page: PageFetcher, which applies the timeout / 429 / non-200 policy
// =============================================================================

mod http;
mod page;

pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use page::{FetchOutcome, PageArtifact, PageFetcher};
