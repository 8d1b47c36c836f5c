//! Command line utilities.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
pub use clap::Parser;
use clap::{Args, Subcommand};
use tracing::info;

use crate::{assets::AssetPipeline, html::RequestHooks, Config};

/// Command line usage description.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Command line options.
    #[command(flatten)]
    pub opts: Opts,
}

/// List of commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Minify CSS and JavaScript files in place
    Assets,

    /// Minify a rendered page and print it
    Page {
        /// HTML file
        file: PathBuf,

        /// Content type of the response
        #[arg(long, default_value = "text/html; charset=UTF-8")]
        content_type: String,

        /// URL reported in diagnostics [default: FILE]
        #[arg(long)]
        url: Option<String>,
    },

    /// Minify a rendered fragment and print it
    Fragment {
        /// HTML file
        file: PathBuf,

        /// URL reported in diagnostics [default: FILE]
        #[arg(long)]
        url: Option<String>,
    },
}

/// Command line options.
#[derive(Debug, Args, Clone)]
pub struct Opts {
    /// Configuration file [default: "squeeze.toml"]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Media directory [default: "media"]
    #[arg(long, global = true)]
    pub media_dir: Option<PathBuf>,
}

/// Run the `assets` command.
pub fn assets(opts: &Opts) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;

    info!("Minifying assets in {:?}...", config.media_dir);

    AssetPipeline::new(&config).process();

    Ok(())
}

/// Run the `page` command.
pub fn page(opts: &Opts, file: &Path, content_type: &str, url: Option<&str>) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;
    let body = read_html(file)?;
    let url = url.map_or_else(|| file.display().to_string(), ToOwned::to_owned);

    let hooks = RequestHooks::new(&config);
    let body = hooks.on_page_rendered(body, [("Content-Type", content_type)], &url);

    print_html(&body)
}

/// Run the `fragment` command.
pub fn fragment(opts: &Opts, file: &Path, url: Option<&str>) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;
    let body = read_html(file)?;
    let url = url.map_or_else(|| file.display().to_string(), ToOwned::to_owned);

    let hooks = RequestHooks::new(&config);
    let body = hooks.on_fragment_rendered(body, &url);

    print_html(&body)
}

fn read_html(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("reading {file:?}"))
}

fn print_html(body: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(body.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
