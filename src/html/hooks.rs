//! Hooks called by the host while a request is rendered.

use tracing::{debug, error};

use super::policy::{decide_fragment, decide_page, PolicyDecision, RequestFlags};
use crate::{
    config::Config,
    minify::{catch_panic, HtmlOptions, MinifyError, Minifier, StandardMinifier},
};

/// HTML minification hooks for a single request.
///
/// Create one per request: the flags are read once and kept for the lifetime
/// of the request.
#[derive(Debug)]
pub struct RequestHooks<M = StandardMinifier> {
    /// Flags snapshot.
    flags: RequestFlags,

    /// Minifier.
    minifier: M,
}

impl RequestHooks {
    /// Create hooks using the default minifier.
    pub fn new(config: &Config) -> Self {
        Self::with_minifier(RequestFlags::from_config(config), StandardMinifier::new())
    }
}

impl<M> RequestHooks<M>
where
    M: Minifier,
{
    /// Create hooks from a flags snapshot and a custom minifier.
    pub fn with_minifier(flags: RequestFlags, minifier: M) -> Self {
        Self { flags, minifier }
    }

    /// Return the flags snapshot.
    pub fn flags(&self) -> &RequestFlags {
        &self.flags
    }

    /// Called after a fragment has been rendered.
    ///
    /// Returns the minified fragment, or `body` unchanged.
    pub fn on_fragment_rendered(&self, body: String, url: &str) -> String {
        match decide_fragment(&self.flags) {
            PolicyDecision::MinifyFragment => {
                self.minify_or_keep(body, &self.flags.fragment_options(), url)
            }
            _ => body,
        }
    }

    /// Called once the response body has been assembled.
    ///
    /// Returns the minified page, or `body` unchanged.
    pub fn on_page_rendered<I, K, V>(&self, body: String, headers: I, url: &str) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match decide_page(&self.flags, &body, headers) {
            PolicyDecision::MinifyPage => {
                self.minify_or_keep(body, &self.flags.page_options(), url)
            }
            _ => body,
        }
    }

    /// Minify `body`, falling back to the original content on failure.
    fn minify_or_keep(&self, body: String, options: &HtmlOptions, url: &str) -> String {
        match catch_panic(|| self.minifier.minify_html(&body, options)) {
            Ok(minified) => {
                debug!(
                    "Minified HTML of {} ({} -> {} bytes)",
                    url,
                    body.len(),
                    minified.len()
                );
                minified
            }
            Err(error) => {
                log_failure(&error, url);
                body
            }
        }
    }
}

/// Report a HTML minification failure.
fn log_failure(error: &MinifyError, url: &str) {
    error!(
        url,
        error = %error,
        detail = ?error,
        "Failed to minify HTML, serving original content"
    );
}
