//! Walk directories recursively.
//!
//! This module uses [`ignore`] under the hood.

use std::path::Path;

pub use ignore::DirEntry;
use ignore::WalkBuilder;

/// A directory walker.
///
/// This walker creates a recursive directory iterator that follows symbolic
/// links and yields every regular file, hidden or ignored ones included.
pub struct DirWalker {
    /// Builds a recursive directory iterator.
    builder: WalkBuilder,
}

impl DirWalker {
    /// Create a directory walker.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut builder = WalkBuilder::new(dir);

        builder
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b));

        Self { builder }
    }

    /// Return an iterator that yields only (valid) files.
    pub fn walk(&self) -> impl Iterator<Item = DirEntry> {
        self.builder
            .build()
            .filter_map(|result| result.ok())
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|file_type| file_type.is_file())
            })
    }
}
