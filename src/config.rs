//! Configure the minifier.
//!
//! Configuration is read from a TOML file:
//!
//! ```toml
//! media_dir = "media"
//!
//! [minify_html]
//! enabled = true
//! compatibility = false
//! max_minification = false
//!
//! [minify_css_js]
//! remove_comments = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Opts;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "squeeze.toml";

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading the configuration file.
    #[error("failed to read configuration file {path:?}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Source error.
        source: std::io::Error,
    },
    /// TOML syntax or schema error.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// I/O error while resolving paths.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Configuration for the minifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Media directory containing `css`, `css_secure`, and `js`.
    pub media_dir: PathBuf,

    /// Directories to scan for CSS and JavaScript files.
    ///
    /// If set to `None`, the `css`, `css_secure`, and `js` subdirectories of
    /// `media_dir` are scanned.
    pub asset_dirs: Option<Vec<PathBuf>>,

    /// HTML minification options.
    pub minify_html: MinifyHtmlConfig,

    /// CSS and JavaScript minification options.
    pub minify_css_js: MinifyCssJsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media_dir: PathBuf::from("media"),
            asset_dirs: None,
            minify_html: MinifyHtmlConfig::default(),
            minify_css_js: MinifyCssJsConfig::default(),
        }
    }
}

/// HTML minification options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifyHtmlConfig {
    /// Minify rendered HTML.
    pub enabled: bool,

    /// Minify each rendered fragment instead of the whole page, so cached
    /// fragments are stored minified.
    pub compatibility: bool,

    /// Maximum HTML minification.
    pub max_minification: bool,
}

/// CSS and JavaScript minification options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifyCssJsConfig {
    /// Remove important comments.
    ///
    /// This flag applies to HTML comments as well.
    pub remove_comments: bool,
}

impl Default for MinifyCssJsConfig {
    fn default() -> Self {
        Self {
            remove_comments: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Relative paths are resolved against the directory of the file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config = Self::from_toml_str(content)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Ok(config.resolve(base_dir))
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: impl AsRef<str>) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content.as_ref())?)
    }

    /// Create a configuration from a [`Opts`] object.
    ///
    /// The configuration file is read from `opts.config`, or from
    /// [`DEFAULT_CONFIG_FILE`] if it exists. Command line options take
    /// precedence over the file.
    pub fn from_opts(opts: &Opts) -> Result<Self, ConfigError> {
        let config_path = opts
            .config
            .clone()
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()));

        let config = match config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        let config = Self {
            media_dir: opts.media_dir.clone().unwrap_or(config.media_dir),
            ..config
        };

        config.normalize()
    }

    /// Join relative paths to `base_dir`.
    fn resolve(self, base_dir: &Path) -> Self {
        Self {
            media_dir: base_dir.join(self.media_dir),
            asset_dirs: self
                .asset_dirs
                .map(|dirs| dirs.into_iter().map(|dir| base_dir.join(dir)).collect()),
            ..self
        }
    }

    /// Normalize configuration.
    ///
    /// Make all paths absolute.
    pub fn normalize(self) -> Result<Self, ConfigError> {
        let current_dir = std::env::current_dir()?;

        Ok(self.resolve(&current_dir))
    }
}
