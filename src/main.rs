//! Minify web assets and rendered HTML.

use anyhow::Result;
use squeeze::cli::{Cli, Command, Parser};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Assets => squeeze::cli::assets(&cli.opts)?,
        Command::Page {
            file,
            content_type,
            url,
        } => squeeze::cli::page(&cli.opts, file, content_type, url.as_deref())?,
        Command::Fragment { file, url } => {
            squeeze::cli::fragment(&cli.opts, file, url.as_deref())?
        }
    }

    Ok(())
}
