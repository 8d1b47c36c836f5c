//! Minify CSS and JavaScript files on disk.
//!
//! The [`AssetPipeline`] walks the asset directories with [`scan`], and
//! rewrites every file it finds with [`rewrite`].

pub mod pipeline;
pub mod rewrite;
pub mod scan;

pub use pipeline::AssetPipeline;
pub use rewrite::{rewrite, RewriteError};
pub use scan::{scan, AssetKind, AssetPath, BaseDirectories};
