//! `model-catalog`: fetch, normalize and score metadata for GitHub
//! repositories and Hugging Face models.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load config ([`config::load_config`]).
//! 3. Fetch the raw payload ([`registry`]), or read it from `--input`.
//! 4. Normalize it into a canonical record ([`normalize`]).
//! 5. Score the raw payload ([`scoring`]).
//! 6. Render the requested report ([`report`]).
//!
//! Without a subcommand the [`interactive`] menu runs instead.

mod catalog;
mod cli;
mod config;
mod interactive;
mod license;
mod models;
mod normalize;
mod registry;
mod report;
mod scoring;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use cli::{Cli, Command};
use config::load_config;
use scoring::NetScorer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let scorer = Box::new(NetScorer::new(config.scoring.clone()));
    let catalog = Catalog::new(config, scorer, cli.input, cli.report, cli.quiet)?;

    let mut out = std::io::stdout();
    match cli.command.unwrap_or(Command::Interactive) {
        Command::Repo { owner, repo } => catalog.show_repository(&owner, &repo, &mut out).await,
        Command::Model { model_id } => catalog.show_model(&model_id, &mut out).await,
        Command::Interactive => {
            let mut input = std::io::stdin().lock();
            interactive::run(&catalog, &mut input, &mut out).await
        }
    }
}

/// Log to stderr so stdout carries only the report. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8, quiet: bool) {
    let directives = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "warn,model_catalog=info",
        _ => "warn,model_catalog=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
