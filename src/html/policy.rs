//! Decide whether and at which granularity rendered HTML is minified.
//!
//! A response is minified either fragment by fragment, when cache
//! compatibility is on, or as a whole page, never both.

use crate::{config::Config, minify::HtmlOptions};

/// Marker of a HTML5 document, matched case-insensitively.
const DOCTYPE_MARKER: &str = "<!doctype html";

/// Action to take for a rendered piece of HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Leave the content untouched.
    Skip,
    /// Minify a single rendered fragment.
    MinifyFragment,
    /// Minify the whole response body.
    MinifyPage,
}

/// Snapshot of the HTML minification flags for one request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestFlags {
    /// HTML minification is enabled.
    pub minify_enabled: bool,
    /// Minify fragments instead of whole pages.
    pub cache_compatibility: bool,
    /// Maximum HTML minification.
    pub max_minification: bool,
    /// Remove comments.
    pub remove_comments: bool,
}

impl RequestFlags {
    /// Read the flags from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            minify_enabled: config.minify_html.enabled,
            cache_compatibility: config.minify_html.compatibility,
            max_minification: config.minify_html.max_minification,
            remove_comments: config.minify_css_js.remove_comments,
        }
    }

    /// Check if rendered fragments are minified.
    pub fn block_minify(&self) -> bool {
        self.minify_enabled && self.cache_compatibility
    }

    /// Check if whole pages are minified.
    ///
    /// This is never true together with [`RequestFlags::block_minify`], so a
    /// page made of minified fragments is not minified a second time.
    pub fn should_minify_page(&self) -> bool {
        self.minify_enabled && !self.cache_compatibility
    }

    /// Options passed to the minifier for a fragment.
    pub fn fragment_options(&self) -> HtmlOptions {
        HtmlOptions {
            remove_comments: self.remove_comments,
            cache_compatibility: true,
            max_minification: self.max_minification,
        }
    }

    /// Options passed to the minifier for a page.
    pub fn page_options(&self) -> HtmlOptions {
        HtmlOptions {
            remove_comments: self.remove_comments,
            cache_compatibility: false,
            max_minification: self.max_minification,
        }
    }
}

/// Decide what to do with a rendered fragment.
pub fn decide_fragment(flags: &RequestFlags) -> PolicyDecision {
    if flags.block_minify() {
        PolicyDecision::MinifyFragment
    } else {
        PolicyDecision::Skip
    }
}

/// Decide what to do with the final response body.
///
/// The page is minified only if it is a HTML5 document served as `text/html`.
pub fn decide_page<I, K, V>(flags: &RequestFlags, body: &str, headers: I) -> PolicyDecision
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    if flags.should_minify_page() && is_html_document(body) && has_html_content_type(headers) {
        PolicyDecision::MinifyPage
    } else {
        PolicyDecision::Skip
    }
}

/// Check if `body` contains a HTML5 doctype.
pub fn is_html_document(body: &str) -> bool {
    contains_ignore_ascii_case(body, DOCTYPE_MARKER)
}

/// Check if a `Content-Type` header declares `text/html`.
///
/// Both the header name and the value are matched case-insensitively.
pub fn has_html_content_type<I, K, V>(headers: I) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    headers.into_iter().any(|(name, value)| {
        contains_ignore_ascii_case(name.as_ref(), "content-type")
            && contains_ignore_ascii_case(value.as_ref(), "text/html")
    })
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();

    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}
