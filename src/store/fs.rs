// src/store/fs.rs
// =============================================================================
// The three filesystem operations PageStore needs, behind a trait.
//
// PageStore never touches std::fs directly. It asks a Filesystem:
// - is this directory there?
// - create it (and its parents)
// - write this file (replacing what was there)
//
// Rust concepts:
// - Traits: the interface; LocalFs is the one implementation we ship
// - Unit structs: LocalFs has no fields, it just forwards to std::fs
// =============================================================================

use std::fs;
use std::io;
use std::path::Path;

pub trait Filesystem {
    /// True if `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;
    /// Like `mkdir -p`
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Creates or truncates `path`
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

// The real disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}
