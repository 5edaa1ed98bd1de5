// src/config.rs
// =============================================================================
// Typed configuration shared by the fetcher, the store and the engine.
//
// The CLI struct is what the user typed; CrawlConfig is what the rest of the
// program works with (durations instead of raw seconds, a validated URL, ...).
// =============================================================================

use crate::cli::Cli;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// Identifies the archiver to the pad servers
pub const USER_AGENT: &str = concat!(
    "pad-archiver/",
    env!("CARGO_PKG_VERSION"),
    " (recursive pad archiver)"
);

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed pad address
    pub base_url: String,
    /// Root directory of the archive
    pub destination: PathBuf,
    /// Skip the "Create dirs?" prompt
    pub create_all_paths: bool,
    /// Timeout applied to each export request
    pub timeout: Duration,
    /// Edge list file name, relative to `destination`
    pub edges_file: String,
    /// None = retry rate-limited pages forever
    pub max_rate_limit_retries: Option<u32>,
    /// Wait used when a 429 response has no usable Retry-After header
    pub default_retry_after: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            destination: PathBuf::from("../koma-pad-archiv"),
            create_all_paths: false,
            timeout: Duration::from_secs(3),
            edges_file: "edges.csv".to_string(),
            max_rate_limit_retries: None,
            default_retry_after: Duration::from_secs(1),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    // Builds the config from parsed arguments
    //
    // Fails if the base URL is missing, blank or not an absolute URL.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let base_url = cli
            .base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                anyhow!("base URL is empty, please set the 'PAD_BASE_URL' environment variable")
            })?;

        Url::parse(&base_url).map_err(|e| anyhow!("Invalid base URL '{}': {}", base_url, e))?;

        Ok(Self {
            base_url,
            destination: cli.destination,
            create_all_paths: cli.create_all_paths,
            timeout: Duration::from_secs(cli.timeout_secs),
            edges_file: cli.edges_file,
            max_rate_limit_retries: cli.max_rate_limit_retries,
            ..Self::default()
        })
    }
}
