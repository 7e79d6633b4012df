use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "model-catalog",
    about = "Browse and score GitHub repositories and Hugging Face models",
    version
)]
pub struct Cli {
    /// Config file [default: ./.model-catalog/config.toml, then ~/.config/model-catalog/]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, global = true, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Read the raw payload from a JSON file instead of the network
    #[arg(long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print the score lines
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch metadata for a GitHub repository
    #[command(alias = "models")]
    Repo {
        #[arg(long, default_value = "huggingface")]
        owner: String,
        #[arg(long, default_value = "transformers")]
        repo: String,
    },
    /// Fetch metadata for a Hugging Face model
    #[command(alias = "hf-model")]
    Model {
        #[arg(long, default_value = "bert-base-uncased")]
        model_id: String,
    },
    /// Menu-driven lookups
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
