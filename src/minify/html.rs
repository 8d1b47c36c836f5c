//! Minify HTML code.
//!
//! This module uses [`minify_html`] and [`lol_html`] under the hood.

use minify_html::{minify, Cfg};

use super::{css::minify_css, js::minify_js, CssJsOptions, HtmlOptions, MinifyError};

/// HTML minifier.
pub struct HtmlMinifier {
    /// Configuration.
    cfg: Cfg,

    /// Options for inline CSS and JavaScript code, if they are minified.
    inline: Option<CssJsOptions>,
}

impl HtmlMinifier {
    /// Create a HTML minifier.
    pub fn new(options: &HtmlOptions) -> Self {
        let base = if options.max_minification {
            Cfg::new()
        } else {
            Cfg::spec_compliant()
        };

        let mut cfg = Cfg {
            keep_comments: !options.remove_comments,
            keep_spaces_between_attributes: !options.max_minification,
            ..base
        };

        if options.cache_compatibility {
            // Fragments are concatenated after minification
            cfg.keep_closing_tags = true;
            cfg.keep_html_and_head_opening_tags = true;
            cfg.do_not_minify_doctype = true;
        }

        let inline = options.max_minification.then_some(CssJsOptions {
            remove_comments: options.remove_comments,
        });

        Self { cfg, inline }
    }

    /// Minify a HTML string.
    ///
    /// Inline CSS and JavaScript code are minified only in maximum
    /// minification mode.
    pub fn minify(&self, input: impl AsRef<str>) -> Result<String, MinifyError> {
        let output = self.minify_html_only(input)?;

        match &self.inline {
            Some(options) => minify_inline(output, options),
            None => Ok(output),
        }
    }

    /// Minify a HTML string, excluding inline CSS and JavaScript code.
    pub fn minify_html_only(&self, input: impl AsRef<str>) -> Result<String, MinifyError> {
        let input = input.as_ref();
        let output = minify(input.as_bytes(), &self.cfg);
        Ok(String::from_utf8(output)?)
    }
}

impl Default for HtmlMinifier {
    fn default() -> Self {
        Self::new(&HtmlOptions::default())
    }
}

/// Minify inline CSS and JavaScript in a HTML code.
///
/// This function minifies code inside untyped `<script>` and `<style>`
/// elements, as well as `style` attributes. The rest of the HTML code is not
/// minified.
pub fn minify_inline(
    input: impl AsRef<str>,
    options: &CssJsOptions,
) -> Result<String, MinifyError> {
    let input = input.as_ref();
    let mut script_buffer = String::new();
    let mut style_buffer = String::new();

    Ok(lol_html::rewrite_str(
        input,
        lol_html::RewriteStrSettings {
            element_content_handlers: vec![
                lol_html::text!("script:not([type])", |element| {
                    script_buffer.push_str(element.as_str());

                    if element.last_in_text_node() {
                        let content = minify_js(&script_buffer, options)
                            .map_err(|source| MinifyError::ScriptElement(Box::new(source)))?;

                        element.set_str(content);
                        script_buffer.clear();
                    } else {
                        element.remove();
                    }

                    Ok(())
                }),
                lol_html::text!("style", |element| {
                    style_buffer.push_str(element.as_str());

                    if element.last_in_text_node() {
                        let content = minify_css(&style_buffer, options)
                            .map_err(|source| MinifyError::StyleElement(Box::new(source)))?;

                        element.set_str(content);
                        style_buffer.clear();
                    } else {
                        element.remove();
                    }

                    Ok(())
                }),
                lol_html::element!("*[style]", |element| {
                    let Some(content) = element.get_attribute("style") else {
                        return Ok(());
                    };

                    const PREFIX: &str = "_{";
                    const SUFFIX: &str = "}";

                    // Wrap CSS rules in a fake selector to make a valid CSS stylesheet
                    let content = format!("{PREFIX}{content}{SUFFIX}");

                    let content = minify_css(content, options)
                        .map_err(|source| MinifyError::StyleAttribute(Box::new(source)))?;

                    let Some(rules) = content
                        .strip_prefix(PREFIX)
                        .and_then(|content| content.strip_suffix(SUFFIX))
                    else {
                        return Ok(());
                    };

                    element.set_attribute("style", rules)?;

                    Ok(())
                }),
            ],
            ..lol_html::RewriteStrSettings::default()
        },
    )?)
}
