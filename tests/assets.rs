//! Asset pipeline tests.

use anyhow::Result;
use assert_fs::prelude::*;
use predicates::prelude::*;
use squeeze::{AssetPipeline, Config};

fn config(dir: &assert_fs::TempDir) -> Config {
    Config {
        media_dir: dir.path().to_owned(),
        ..Default::default()
    }
}

#[test]
fn minify_css() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("css/a.css")
        .write_str("/* c */\nbody {  color: red;  }\n")?;

    AssetPipeline::new(&config(&dir)).process();

    dir.child("css/a.css")
        .assert(predicate::str::contains("/* c */").not())
        .assert(predicate::str::contains("  ").not())
        .assert(predicate::str::contains("body"))
        .assert(predicate::str::contains("red"));

    Ok(())
}

#[test]
fn minify_js() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("js/nested/script.js").write_str(
        r#"// Comment
document.addEventListener('DOMContentLoaded', () => {
    alert('Hello, World!');
});
"#,
    )?;

    AssetPipeline::new(&config(&dir)).process();

    dir.child("js/nested/script.js")
        .assert(predicate::str::contains("Comment").not())
        .assert(predicate::str::contains("addEventListener"))
        .assert(predicate::str::contains("DOMContentLoaded"))
        .assert(predicate::str::contains("Hello, World!"));

    Ok(())
}

#[test]
fn important_comments() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("css/a.css")
        .write_str("/*! License */\n.foo { color: black; }\n")?;
    dir.child("js/a.js")
        .write_str("/*! License */\nconsole.log(\"foo\");\n")?;

    let mut config = config(&dir);
    config.minify_css_js.remove_comments = false;

    AssetPipeline::new(&config).process();

    dir.child("css/a.css")
        .assert(predicate::str::contains("License"));
    dir.child("js/a.js")
        .assert(predicate::str::contains("/*! License */"));

    Ok(())
}

#[test]
fn idempotent() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("css_secure/a.css")
        .write_str(".a {\n  margin: 0px;\n}\n\n.b { color: #ff0000; }\n")?;

    let config = config(&dir);

    AssetPipeline::new(&config).process();
    let once = std::fs::read_to_string(dir.child("css_secure/a.css").path())?;

    AssetPipeline::new(&config).process();
    let twice = std::fs::read_to_string(dir.child("css_secure/a.css").path())?;

    assert_eq!(once, twice);

    Ok(())
}

#[test]
fn failures_do_not_abort() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("css/a.css").write_str("a {  color: red;  }")?;
    dir.child("css/empty.css").touch()?;
    dir.child("js/broken.js").write_str("function (")?;
    dir.child("js/b.js").write_str("var   b = 1;")?;

    let read_only = dir.child("css/read-only.css");
    read_only.write_str("b {  color: blue;  }")?;
    let mut permissions = std::fs::metadata(read_only.path())?.permissions();
    permissions.set_readonly(true);
    std::fs::set_permissions(read_only.path(), permissions)?;

    AssetPipeline::new(&config(&dir)).process();

    read_only.assert("b {  color: blue;  }");
    dir.child("css/empty.css").assert("");
    dir.child("js/broken.js").assert("function (");
    dir.child("css/a.css")
        .assert(predicate::str::contains("  ").not());
    dir.child("js/b.js")
        .assert(predicate::str::contains("var   b").not());

    Ok(())
}

#[test]
fn sloppy_script_does_not_abort() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("js/a.js").write_str("if (a) function f(){}")?;
    dir.child("js/b.js")
        .write_str("function   foo ( ) {  return 1 ; }")?;

    AssetPipeline::new(&config(&dir)).process();

    dir.child("js/b.js")
        .assert(predicate::str::contains("  ").not())
        .assert(predicate::str::contains("foo"));

    Ok(())
}

#[test]
fn javascript_semantics() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("js/c.js").write_str(
        r#"var s = 0..toString();
var o = { get d() { return 1; } };
function strict() {
    'use strict';
    return this;
}
"#,
    )?;

    AssetPipeline::new(&config(&dir)).process();

    dir.child("js/c.js")
        .assert(predicate::str::contains("0.toString").not())
        .assert(predicate::str::contains("get d()"))
        .assert(predicate::str::contains("use strict"))
        .assert(predicate::str::contains("`").not())
        .assert(predicate::str::contains("    ").not());

    Ok(())
}

#[test]
fn ignore_other_files() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("css/readme.txt").write_str("a  b")?;
    dir.child("js/data.json").write_str("{ \"a\":  1 }")?;
    dir.child("images/a.css").write_str("a {  color: red;  }")?;

    AssetPipeline::new(&config(&dir)).process();

    dir.child("css/readme.txt").assert("a  b");
    dir.child("js/data.json").assert("{ \"a\":  1 }");
    dir.child("images/a.css").assert("a {  color: red;  }");

    Ok(())
}

#[cfg(unix)]
#[test]
fn follow_symlinks() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    let shared = assert_fs::TempDir::new()?;
    shared.child("theme/a.css").write_str("a {  color: red;  }")?;
    dir.child("css").create_dir_all()?;
    std::os::unix::fs::symlink(
        shared.child("theme").path(),
        dir.child("css/theme").path(),
    )?;

    AssetPipeline::new(&config(&dir)).process();

    shared
        .child("theme/a.css")
        .assert(predicate::str::contains("  ").not());

    Ok(())
}
