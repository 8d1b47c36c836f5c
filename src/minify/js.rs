//! Minify JavaScript code.
//!
//! This module uses [`swc_core`] under the hood.

use swc_core::{
    common::{sync::Lrc, FileName, Globals, Mark, SourceMap, GLOBALS},
    ecma::{
        ast::{EsVersion, Program, Script},
        codegen::{text_writer::JsWriter, Config, Emitter},
        minifier::{
            optimize,
            option::{ExtraOptions, MangleOptions, MinifyOptions},
        },
        parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax},
        transforms::base::{fixer::fixer, resolver},
        visit::FoldWith,
    },
};

use super::{CssJsOptions, MinifyError};

/// Minify a string of JavaScript code.
///
/// The input is a classic script: top-level names are global and are never
/// renamed. The output is parsed again before being returned.
///
/// Important comments (`/*! ... */`) at the top of the program are kept
/// unless `remove_comments` is set.
pub fn minify_js(input: impl AsRef<str>, options: &CssJsOptions) -> Result<String, MinifyError> {
    let input = input.as_ref();

    let cm: Lrc<SourceMap> = Default::default();

    let script = parse_script(&cm, input).map_err(MinifyError::JsSyntax)?;

    let output = GLOBALS.set(&Globals::new(), || {
        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();

        // Conduct identifier scope analysis
        let program =
            Program::Script(script).fold_with(&mut resolver(unresolved_mark, top_level_mark, false));

        let program = optimize(
            program,
            cm.clone(),
            None,
            None,
            &MinifyOptions {
                compress: Some(Default::default()),
                mangle: Some(MangleOptions::default()),
                ..Default::default()
            },
            &ExtraOptions {
                unresolved_mark,
                top_level_mark,
            },
        );

        // Ensure that we have enough parenthesis.
        let program = program.fold_with(&mut fixer(None));

        emit(&cm, &program)
    })?;

    parse_script(&cm, &output).map_err(MinifyError::JsOutput)?;

    if options.remove_comments {
        return Ok(output);
    }

    let comments = important_comments(input);

    if comments.is_empty() {
        return Ok(output);
    }

    let mut result = comments.join("\n");
    result.push('\n');
    result.push_str(&output);

    Ok(result)
}

/// Parse a classic script, treating recoverable errors as failures.
fn parse_script(cm: &Lrc<SourceMap>, input: &str) -> Result<Script, String> {
    let fm = cm.new_source_file(Lrc::new(FileName::Anon), input.into());

    let lexer = Lexer::new(
        Syntax::Es(EsSyntax::default()),
        EsVersion::latest(),
        StringInput::from(&*fm),
        None,
    );

    let mut parser = Parser::new_from(lexer);

    let script = parser
        .parse_script()
        .map_err(|error| error.kind().msg().into_owned())?;

    if let Some(error) = parser.take_errors().into_iter().next() {
        return Err(error.kind().msg().into_owned());
    }

    Ok(script)
}

fn emit(cm: &Lrc<SourceMap>, program: &Program) -> Result<String, MinifyError> {
    let mut buf = vec![];
    {
        let mut emitter = Emitter {
            cfg: Config::default().with_minify(true),
            cm: cm.clone(),
            comments: None,
            wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
        };

        emitter.emit_program(program).map_err(MinifyError::JsEmit)?;
    }

    Ok(String::from_utf8(buf)?)
}

/// Collect the `/*! ... */` comments preceding the first statement.
fn important_comments(input: &str) -> Vec<&str> {
    let mut comments = Vec::new();
    let mut rest = input.trim_start();

    while let Some(body) = rest.strip_prefix("/*") {
        let Some(end) = body.find("*/") else {
            break;
        };

        if body.starts_with('!') {
            comments.push(&rest[..end + 4]);
        }

        rest = body[end + 2..].trim_start();
    }

    comments
}
