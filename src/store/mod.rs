// src/store/mod.rs
// =============================================================================
// This module writes fetched pads to disk.
//
// Layout under the destination directory:
//
//   <destination>/<server key>/<pad key>.txt
//   <destination>/<server key>/<pad key>.html
//
// e.g. https://pads.example.org/p/Meeting.2024 ends up in
//   ../koma-pad-archiv/pads_example_org/Meeting_2024.txt
//
// Safety rules:
// - a path with fewer than 3 components is refused (it would land directly
//   in, or next to, the destination directory)
// - a missing directory is only created if the CreationPolicy agrees
//
// Submodules:
// - fs: the Filesystem trait and the local-disk implementation
// - policy: the CreationPolicy trait (interactive prompt / always yes)
// =============================================================================

mod fs;
mod policy;

pub use fs::{Filesystem, LocalFs};
pub use policy::{policy_for, AlwaysCreate, CreationPolicy};

use crate::error::StoreError;
use crate::fetch::PageArtifact;
use crate::key;
use std::path::{Path, PathBuf};
use tracing::info;

// Shallower paths are refused
const MIN_PATH_PARTS: usize = 3;

// Where the two exports of one pad go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePaths {
    pub text: PathBuf,
    pub html: PathBuf,
}

pub struct PageStore {
    destination: PathBuf,
    fs: Box<dyn Filesystem>,
    policy: Box<dyn CreationPolicy>,
}

impl PageStore {
    pub fn new(
        destination: impl Into<PathBuf>,
        fs: Box<dyn Filesystem>,
        policy: Box<dyn CreationPolicy>,
    ) -> Self {
        Self {
            destination: destination.into(),
            fs,
            policy,
        }
    }

    // Derives the .txt/.html paths of a pad from its segment keys
    pub fn resolve_paths(&self, address: &str) -> Result<PagePaths, StoreError> {
        // destination + one directory/file name per segment key
        let mut stem = self.destination.clone();
        for segment in key::segment_keys(address) {
            // An empty key would add a trailing slash, not a component
            if !segment.is_empty() {
                stem.push(segment);
            }
        }

        let text = stem.with_extension("txt");
        // Counted on the final path, destination components included
        if text.components().count() < MIN_PATH_PARTS {
            return Err(StoreError::PathTooShallow(text));
        }

        let html = stem.with_extension("html");
        Ok(PagePaths { text, html })
    }

    // Writes both exports, creating the parent directory if allowed
    //
    // Existing files are overwritten.
    pub fn persist(&self, artifact: &PageArtifact, paths: &PagePaths) -> Result<(), StoreError> {
        // Both files share a parent, so checking one path is enough
        if let Some(parent) = paths.text.parent() {
            if !self.fs.is_dir(parent) {
                // Ask first; with --create-all-paths the answer is always yes
                if !self.policy.should_create(parent) {
                    return Err(StoreError::CreationDeclined(parent.to_path_buf()));
                }

                info!("create path '{}'", parent.display());
                self.fs
                    .create_dir_all(parent)
                    .map_err(|source| StoreError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        // Not atomic: a crash between the two writes leaves only the .txt
        self.write(&paths.text, &artifact.text)?;
        self.write(&paths.html, &artifact.html)?;
        Ok(())
    }

    // resolve_paths + persist
    pub fn store(&self, address: &str, artifact: &PageArtifact) -> Result<PagePaths, StoreError> {
        let paths = self.resolve_paths(address)?;
        self.persist(artifact, &paths)?;
        Ok(paths)
    }

    // Attaches the path to any io::Error
    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        self.fs
            .write(path, contents)
            .map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What does with_extension() do?
//    - Replaces (or adds) the part after the last dot of the file name
//    - Our keys never contain dots, so it always appends ".txt"/".html"
//
// 2. What is components()?
//    - Splits a path into its parts: "../archive/server/pad.txt" has 4
//    - A leading "/" counts as a part (RootDir)
//
// 3. Why Box<dyn Filesystem> and Box<dyn CreationPolicy>?
//    - The store decides *what* to write; the boxes decide *how*
//    - main.rs plugs in LocalFs + the prompt, tests plug in fakes
// -----------------------------------------------------------------------------
