// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option can also come from an environment variable, so the archiver
// can run unattended from cron or CI with nothing but env vars set:
//
//   PAD_BASE_URL=https://pads.example.org/p/Start PAD_CREATE_ALL_PATHS=1 pad-archiver
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Option<T>: arguments that may be absent
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pad-archiver",
    version,
    about = "Recursively archive pads and the links between them",
    long_about = "pad-archiver starts at a pad, downloads its text and HTML exports, \
                  follows every link to other pads and finally writes the link graph \
                  to edges.csv."
)]
pub struct Cli {
    /// Pad to start crawling from (e.g. https://pads.example.org/p/Start)
    ///
    /// Kept optional here so a missing value is reported through the log
    /// rather than clap's usage error.
    #[arg(long, env = "PAD_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory the archive is written to
    #[arg(long, env = "PAD_DESTINATION", default_value = "../koma-pad-archiv")]
    pub destination: PathBuf,

    /// Create missing directories without asking
    #[arg(long, env = "PAD_CREATE_ALL_PATHS")]
    pub create_all_paths: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 3)]
    pub timeout_secs: u64,

    /// Name of the edge list written into the destination directory
    #[arg(long, default_value = "edges.csv")]
    pub edges_file: String,

    /// Log file written next to the console output
    #[arg(long, env = "PAD_LOG_FILE", default_value = "logs.log")]
    pub log_file: PathBuf,

    /// Give up on a page after this many 429 responses (default: never give up)
    #[arg(long)]
    pub max_rate_limit_retries: Option<u32>,
}
