//! Minify web assets on disk and HTML rendered per request.
//!
//! Squeeze can be used as both a CLI and a library.
//!
//! - [`assets`]: rewrite the CSS and JavaScript files of the media directory
//!   with their minified content.
//! - [`html`]: decide, for each request, whether rendered HTML is minified
//!   fragment by fragment or as a whole page, and do it at most once.
//! - [`minify`]: the minifiers themselves, behind the [`Minifier`] trait.
//!
//! Failures never propagate out of these operations: a file that cannot be
//! minified is left as is, and a page that cannot be minified is served
//! unchanged. Every failure is reported through [`tracing`].

#![warn(missing_docs)]

pub mod assets;
pub mod cli;
pub mod config;
pub mod html;
pub mod minify;
pub mod util;

pub use assets::AssetPipeline;
pub use config::Config;
pub use html::RequestHooks;
pub use minify::{Minifier, StandardMinifier};
