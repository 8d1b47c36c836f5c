//! Rewrite a single asset file with its minified content.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::scan::{AssetKind, AssetPath};
use crate::minify::{catch_panic, CssJsOptions, MinifyError, Minifier};

/// Reasons why a file was left untouched.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The file cannot be modified.
    #[error("file {path:?} is not writable")]
    NotWritable {
        /// File path.
        path: PathBuf,
    },
    /// The file cannot be read, or is empty.
    #[error("file {path:?} cannot be read")]
    Unreadable {
        /// File path.
        path: PathBuf,
        /// Source error, `None` for an empty file.
        #[source]
        source: Option<std::io::Error>,
    },
    /// The minifier failed or returned nothing.
    #[error("file {path:?} was not minified")]
    NotMinified {
        /// File path.
        path: PathBuf,
        /// Source error.
        source: MinifyError,
    },
    /// Locking or writing the file failed.
    #[error("failed to write minified content to {path:?}")]
    Write {
        /// File path.
        path: PathBuf,
        /// Source error.
        source: std::io::Error,
    },
}

impl RewriteError {
    /// Return the path of the file that was skipped.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotWritable { path }
            | Self::Unreadable { path, .. }
            | Self::NotMinified { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

/// Replace the content of `asset` with its minified version.
///
/// Nothing is written unless the file is writable, non-empty, and the minifier
/// returns a non-empty result.
pub fn rewrite<M>(
    asset: &AssetPath,
    minifier: &M,
    options: &CssJsOptions,
) -> Result<(), RewriteError>
where
    M: Minifier + ?Sized,
{
    let path = asset.path();

    if !asset.is_writable() {
        return Err(RewriteError::NotWritable {
            path: path.to_owned(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| RewriteError::Unreadable {
        path: path.to_owned(),
        source: Some(source),
    })?;

    if content.is_empty() {
        return Err(RewriteError::Unreadable {
            path: path.to_owned(),
            source: None,
        });
    }

    let result = catch_panic(|| match asset.kind() {
        AssetKind::Css => minifier.minify_css(&content, options),
        AssetKind::Js => minifier.minify_js(&content, options),
    });

    let minified = result
        .and_then(|minified| {
            if minified.is_empty() {
                Err(MinifyError::Empty)
            } else {
                Ok(minified)
            }
        })
        .map_err(|source| RewriteError::NotMinified {
            path: path.to_owned(),
            source,
        })?;

    write_locked(path, minified.as_bytes()).map_err(|source| RewriteError::Write {
        path: path.to_owned(),
        source,
    })
}

/// Replace the content of an existing file while holding an exclusive lock on
/// it.
fn write_locked(path: &Path, content: &[u8]) -> std::io::Result<()> {
    write_locked_with(path, |temp| temp.write_all(content))
}

/// Replace an existing file with a temporary file filled by `write`.
///
/// The temporary file lives in the same directory and is renamed over `path`
/// once complete, so readers see either the old or the new content. It takes
/// the permissions of the original file. On failure, the temporary file is
/// removed and `path` is left untouched.
fn write_locked_with<F>(path: &Path, write: F) -> std::io::Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> std::io::Result<()>,
{
    let file = OpenOptions::new().write(true).open(path)?;

    file.lock()?;

    let result = replace(path, &file, write);
    let unlocked = file.unlock();

    result.and(unlocked)
}

fn replace<F>(path: &Path, file: &File, write: F) -> std::io::Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;

    write(&mut temp)?;

    temp.as_file().sync_all()?;
    temp.as_file().set_permissions(file.metadata()?.permissions())?;
    temp.persist(path).map_err(|error| error.error)?;

    Ok(())
}
