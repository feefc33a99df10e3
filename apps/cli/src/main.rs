//! clipscrape CLI: Clips4Sale scene scraper.
//!
//! Reads a scene fragment on stdin and prints the scraped scene, with its
//! description reconciled against the lite page, as JSON on stdout.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
