//! Minify every CSS and JavaScript file of the asset directories in place.

use tracing::{debug, info, warn};

use super::{
    rewrite::rewrite,
    scan::{scan, BaseDirectories},
};
use crate::{
    config::Config,
    minify::{CssJsOptions, Minifier, StandardMinifier},
};

/// Batch job that rewrites asset files with their minified content.
///
/// A run is sequential and blocking. Running two pipelines over the same tree
/// at the same time may race on the same file.
#[derive(Debug)]
pub struct AssetPipeline<'config, M = StandardMinifier> {
    /// Configuration.
    config: &'config Config,

    /// Minifier.
    minifier: M,
}

impl<'config> AssetPipeline<'config> {
    /// Create a pipeline using the default minifier.
    pub fn new(config: &'config Config) -> Self {
        Self::with_minifier(config, StandardMinifier::new())
    }
}

impl<'config, M> AssetPipeline<'config, M>
where
    M: Minifier,
{
    /// Create a pipeline using a custom minifier.
    pub fn with_minifier(config: &'config Config, minifier: M) -> Self {
        Self { config, minifier }
    }

    /// Directories scanned by this pipeline.
    ///
    /// Directories that do not exist are left out.
    pub fn base_directories(&self) -> BaseDirectories {
        match &self.config.asset_dirs {
            Some(dirs) => BaseDirectories::from_paths(dirs),
            None => BaseDirectories::from_media_dir(&self.config.media_dir),
        }
    }

    /// Minify all CSS and JavaScript files.
    ///
    /// Failures are logged per file and never abort the run.
    pub fn process(&self) {
        let options = CssJsOptions {
            remove_comments: self.config.minify_css_js.remove_comments,
        };

        let dirs = self.base_directories();

        if dirs.is_empty() {
            info!("No asset directory found");
            return;
        }

        let mut num_minified = 0;
        let mut num_skipped = 0;

        for asset in scan(&dirs) {
            match rewrite(&asset, &self.minifier, &options) {
                Ok(()) => {
                    debug!("Minified {:?}", asset.path());
                    num_minified += 1;
                }
                Err(error) => {
                    warn!("{}", error);
                    debug!("{:?}", error);
                    num_skipped += 1;
                }
            }
        }

        info!("Minified {} files, skipped {}", num_minified, num_skipped);
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::AssetPipeline;
    use crate::{
        config::Config,
        minify::{CssJsOptions, HtmlOptions, MinifyError, Minifier},
    };

    /// Minifier that records the options it receives in the output.
    struct TagMinifier;

    impl Minifier for TagMinifier {
        fn minify_css(&self, input: &str, options: &CssJsOptions) -> Result<String, MinifyError> {
            Ok(format!("{}:{}", options.remove_comments, input.trim()))
        }

        fn minify_js(&self, input: &str, _: &CssJsOptions) -> Result<String, MinifyError> {
            if input.contains("broken") {
                Err(MinifyError::JsSyntax("broken".to_owned()))
            } else {
                Ok(input.trim().to_owned())
            }
        }

        fn minify_html(&self, input: &str, _: &HtmlOptions) -> Result<String, MinifyError> {
            Ok(input.to_owned())
        }
    }

    #[test]
    fn process_media_dir() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("css/a.css").write_str(" a ").unwrap();
        dir.child("css_secure/b.css").write_str(" b ").unwrap();
        dir.child("js/c.js").write_str(" c ").unwrap();
        dir.child("js/d.js").write_str("broken").unwrap();
        dir.child("other/e.css").write_str(" e ").unwrap();

        let config = Config {
            media_dir: dir.path().to_owned(),
            ..Default::default()
        };

        AssetPipeline::with_minifier(&config, TagMinifier).process();

        dir.child("css/a.css").assert("true:a");
        dir.child("css_secure/b.css").assert("true:b");
        dir.child("js/c.js").assert("c");
        dir.child("js/d.js").assert("broken");
        dir.child("other/e.css").assert(" e ");
    }

    #[test]
    fn remove_comments_option() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("css/a.css").write_str("a").unwrap();

        let mut config = Config {
            media_dir: dir.path().to_owned(),
            ..Default::default()
        };
        config.minify_css_js.remove_comments = false;

        AssetPipeline::with_minifier(&config, TagMinifier).process();

        dir.child("css/a.css").assert("false:a");
    }

    #[test]
    fn explicit_asset_dirs() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("css/a.css").write_str(" a ").unwrap();
        dir.child("theme/b.css").write_str(" b ").unwrap();

        let config = Config {
            media_dir: dir.path().to_owned(),
            asset_dirs: Some(vec![dir.path().join("theme"), dir.path().join("missing")]),
            ..Default::default()
        };

        let pipeline = AssetPipeline::with_minifier(&config, TagMinifier);

        assert_eq!(pipeline.base_directories().paths(), &[dir.path().join("theme")]);

        pipeline.process();

        dir.child("css/a.css").assert(" a ");
        dir.child("theme/b.css").assert("true:b");
    }

    #[test]
    fn missing_media_dir() {
        let dir = assert_fs::TempDir::new().unwrap();

        let config = Config {
            media_dir: dir.path().join("missing"),
            ..Default::default()
        };

        let pipeline = AssetPipeline::new(&config);

        assert!(pipeline.base_directories().is_empty());

        pipeline.process();
    }
}
