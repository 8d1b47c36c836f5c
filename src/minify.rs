//! Minify CSS, JavaScript, and HTML code.
//!
//! The [`Minifier`] trait is the seam between the decision logic of this crate
//! and the actual minification algorithms. [`StandardMinifier`] implements it
//! on top of [`lightningcss`], [`swc_core`], [`minify_html`] and [`lol_html`].

pub mod css;
pub mod html;
pub mod js;

use std::{
    any::Any,
    panic::{catch_unwind, AssertUnwindSafe},
    string::FromUtf8Error,
};

use lol_html::errors::RewritingError;
use thiserror::Error;

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum MinifyError {
    /// CSS parser error.
    #[error("failed to parse CSS: {0}")]
    CssParser(String),
    /// CSS minifier error.
    #[error("failed to minify CSS: {0}")]
    CssMinify(String),
    /// CSS printer error.
    #[error("failed to print CSS: {0}")]
    CssPrinter(String),
    /// JavaScript syntax error.
    #[error("failed to minify JavaScript: {0}")]
    JsSyntax(String),
    /// JavaScript code generation error.
    #[error("failed to print JavaScript: {0}")]
    JsEmit(#[source] std::io::Error),
    /// The minified JavaScript code does not parse.
    #[error("minified JavaScript is invalid: {0}")]
    JsOutput(String),
    /// Error converting a string in UTF-8.
    #[error(transparent)]
    FromUtf8(#[from] FromUtf8Error),
    /// Error rewriting HTML.
    #[error(transparent)]
    LolHtmlRewriting(#[from] RewritingError),
    /// Error minifying `<script>` elements.
    #[error("failed to minify `<script>` element")]
    ScriptElement(#[source] Box<Self>),
    /// Error minifying `<style>` elements.
    #[error("failed to minify `<style>` element")]
    StyleElement(#[source] Box<Self>),
    /// Error minifying `style` attributes.
    #[error("failed to minify `style` attribute")]
    StyleAttribute(#[source] Box<Self>),
    /// The minifier produced no output.
    #[error("minifier returned an empty result")]
    Empty,
    /// The minifier panicked.
    #[error("minifier panicked: {0}")]
    Panic(String),
}

/// Run `minify`, turning a panic into [`MinifyError::Panic`].
///
/// Third-party minifiers may panic on unusual input. The caller then keeps the
/// original content instead of unwinding.
pub fn catch_panic<F>(minify: F) -> Result<String, MinifyError>
where
    F: FnOnce() -> Result<String, MinifyError>,
{
    catch_unwind(AssertUnwindSafe(minify))
        .unwrap_or_else(|payload| Err(MinifyError::Panic(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}

/// Options for CSS and JavaScript minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssJsOptions {
    /// Drop important (`/*! ... */`) comments.
    pub remove_comments: bool,
}

impl Default for CssJsOptions {
    fn default() -> Self {
        Self {
            remove_comments: true,
        }
    }
}

/// Options for HTML minification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Drop HTML comments.
    pub remove_comments: bool,

    /// Produce output that stays valid when concatenated with other
    /// independently minified fragments.
    pub cache_compatibility: bool,

    /// Minify attributes aggressively and minify inline CSS and JavaScript.
    pub max_minification: bool,
}

/// A minifier for each supported kind of text.
///
/// Implementations must be idempotent: minifying their own output again must
/// yield the same bytes.
pub trait Minifier {
    /// Minify a CSS stylesheet.
    fn minify_css(&self, input: &str, options: &CssJsOptions) -> Result<String, MinifyError>;

    /// Minify a JavaScript program.
    fn minify_js(&self, input: &str, options: &CssJsOptions) -> Result<String, MinifyError>;

    /// Minify a HTML document or fragment.
    fn minify_html(&self, input: &str, options: &HtmlOptions) -> Result<String, MinifyError>;
}

impl<M> Minifier for &M
where
    M: Minifier + ?Sized,
{
    fn minify_css(&self, input: &str, options: &CssJsOptions) -> Result<String, MinifyError> {
        (**self).minify_css(input, options)
    }

    fn minify_js(&self, input: &str, options: &CssJsOptions) -> Result<String, MinifyError> {
        (**self).minify_js(input, options)
    }

    fn minify_html(&self, input: &str, options: &HtmlOptions) -> Result<String, MinifyError> {
        (**self).minify_html(input, options)
    }
}

/// Default minifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardMinifier;

impl StandardMinifier {
    /// Create a minifier.
    pub fn new() -> Self {
        Self
    }
}

impl Minifier for StandardMinifier {
    fn minify_css(&self, input: &str, options: &CssJsOptions) -> Result<String, MinifyError> {
        css::minify_css(input, options)
    }

    fn minify_js(&self, input: &str, options: &CssJsOptions) -> Result<String, MinifyError> {
        js::minify_js(input, options)
    }

    fn minify_html(&self, input: &str, options: &HtmlOptions) -> Result<String, MinifyError> {
        html::HtmlMinifier::new(options).minify(input)
    }
}
