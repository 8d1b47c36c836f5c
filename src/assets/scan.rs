//! Scan base directories for CSS and JavaScript files.

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use crate::util::walk::{DirEntry, DirWalker};

/// Subdirectories of the media directory that hold generated assets.
pub const MEDIA_SUBDIRS: [&str; 3] = ["css", "css_secure", "js"];

/// Kind of asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// CSS stylesheet.
    Css,
    /// JavaScript program.
    Js,
}

impl AssetKind {
    /// Determine the kind of a file from its extension (case-insensitive).
    ///
    /// Returns `None` for files that are neither CSS nor JavaScript.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;

        if extension.eq_ignore_ascii_case("css") {
            Some(Self::Css)
        } else if extension.eq_ignore_ascii_case("js") {
            Some(Self::Js)
        } else {
            None
        }
    }
}

/// A CSS or JavaScript file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPath {
    /// Canonical file path.
    path: PathBuf,

    /// Asset kind.
    kind: AssetKind,
}

impl AssetPath {
    /// Create an asset path, or `None` if the file is not CSS nor JavaScript.
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = AssetKind::from_path(&path)?;

        // Symbolic links are resolved to the file they point to
        let path = path.canonicalize().unwrap_or(path);

        Some(Self { path, kind })
    }

    /// Return the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the asset kind.
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Check if the file can be modified.
    ///
    /// A file marked read-only is never modified, even by a privileged user.
    /// Otherwise the file must open for writing with the effective access of
    /// the current process. Opening does not truncate it.
    pub fn is_writable(&self) -> bool {
        std::fs::metadata(&self.path)
            .is_ok_and(|metadata| metadata.is_file() && !metadata.permissions().readonly())
            && OpenOptions::new().write(true).open(&self.path).is_ok()
    }
}

/// Ordered list of existing directories to scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BaseDirectories(Vec<PathBuf>);

impl BaseDirectories {
    /// Keep the candidate directories that exist, in order.
    ///
    /// Missing directories are not an error.
    pub fn from_paths<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(
            candidates
                .into_iter()
                .map(Into::into)
                .filter(|path| path.is_dir())
                .collect(),
        )
    }

    /// Candidate directories `css`, `css_secure`, and `js` of `media_dir`.
    pub fn from_media_dir(media_dir: impl AsRef<Path>) -> Self {
        let media_dir = media_dir.as_ref();
        Self::from_paths(MEDIA_SUBDIRS.map(|name| media_dir.join(name)))
    }

    /// Return the directories.
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    /// Check if no directory exists.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Walk base directories and yield CSS and JavaScript files.
///
/// The filesystem is read lazily; calling this function again walks it again.
pub fn scan(dirs: &BaseDirectories) -> impl Iterator<Item = AssetPath> {
    dirs.paths()
        .to_vec()
        .into_iter()
        .flat_map(|dir| DirWalker::new(dir).walk())
        .filter_map(|entry: DirEntry| AssetPath::new(entry.into_path()))
}
