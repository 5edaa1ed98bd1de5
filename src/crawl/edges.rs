// src/crawl/edges.rs
// =============================================================================
// Writes the link graph to a CSV file once the crawl is done.
//
// Format (matches what pandas' DataFrame.to_csv produces, so the file can be
// read back with an index column):
//
//   ,from,to
//   0,example_org/Root,example_org/Child
//   1,...
// =============================================================================

use super::engine::Edge;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Serialize)]
struct EdgeRow<'a> {
    index: usize,
    from: &'a str,
    to: &'a str,
}

// Writes `edges` to `destination/filename`, replacing any previous file
//
// Returns the path that was written.
pub fn write_edges(edges: &[Edge], destination: &Path, filename: &str) -> Result<PathBuf> {
    fs::create_dir_all(destination)
        .with_context(|| format!("could not create '{}'", destination.display()))?;

    let path = destination.join(filename);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("could not open '{}'", path.display()))?;

    // Written by hand so an empty graph still gets its header
    writer.write_record(["", "from", "to"])?;
    for (index, edge) in edges.iter().enumerate() {
        writer.serialize(EdgeRow {
            index,
            from: &edge.from,
            to: &edge.to,
        })?;
    }
    writer.flush()?;

    info!("Successfully wrote edges csv to '{}'", path.display());
    Ok(path)
}
