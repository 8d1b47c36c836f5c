//! Minify CSS code.
//!
//! This module uses [`lightningcss`] under the hood.

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use super::{CssJsOptions, MinifyError};

/// Minify a CSS string.
///
/// Important comments (`/*! ... */`) at the top of the stylesheet are kept
/// unless `remove_comments` is set.
pub fn minify_css(input: impl AsRef<str>, options: &CssJsOptions) -> Result<String, MinifyError> {
    let input = input.as_ref();

    let parser_options = ParserOptions::default();

    let mut style_sheet = StyleSheet::parse(input, parser_options)
        .map_err(|source| MinifyError::CssParser(source.to_string()))?;

    if options.remove_comments {
        style_sheet.license_comments.clear();
    }

    let minify_options = MinifyOptions::default();

    style_sheet
        .minify(minify_options)
        .map_err(|source| MinifyError::CssMinify(source.to_string()))?;

    let printer_options = PrinterOptions {
        minify: true,
        ..Default::default()
    };

    let result = style_sheet
        .to_css(printer_options)
        .map_err(|source| MinifyError::CssPrinter(source.to_string()))?;

    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::minify_css;
    use crate::minify::CssJsOptions;

    #[test]
    fn minify() {
        // Length: 25
        const INPUT: &str = concat!(
            ".foo {\n",          //
            "  color: black;\n", //
            "}\n"
        );

        let result = minify_css(INPUT, &CssJsOptions::default()).unwrap();

        assert!(result.contains(".foo"));
        assert!(result.contains("color:"));
        // Expected: 16
        assert!(result.len() <= 18);
    }

    #[test]
    fn remove_comments() {
        const INPUT: &str = "/* c */\nbody {  color: red;  }\n";

        let result = minify_css(INPUT, &CssJsOptions::default()).unwrap();

        assert!(!result.contains("/* c */"));
        assert!(!result.contains("  "));
        assert!(result.contains("body"));
    }

    #[test]
    fn important_comments() {
        const INPUT: &str = "/*! License */\n.foo { color: black; }\n";

        let kept = minify_css(
            INPUT,
            &CssJsOptions {
                remove_comments: false,
            },
        )
        .unwrap();
        let removed = minify_css(
            INPUT,
            &CssJsOptions {
                remove_comments: true,
            },
        )
        .unwrap();

        assert!(kept.contains("License"));
        assert!(!removed.contains("License"));
    }
}
