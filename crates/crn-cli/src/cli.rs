use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "crn",
    about = "CRN — client for a distributed content repository network",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the coordinating node endpoint (highest precedence).
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// TOML configuration file (defaults to ./crn.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Retrieve the given object identifiers
    Fetch(FetchArgs),
    /// Retrieve every identifier listed in a file
    Batch(BatchArgs),
    /// Show a resolved configuration value and its defining source
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct FetchArgs {
    #[arg(required = true)]
    pub identifiers: Vec<String>,
}

#[derive(Args)]
pub struct BatchArgs {
    /// File with one identifier per line; `#` comments and blanks skipped
    #[arg(long)]
    pub list: PathBuf,
}

#[derive(Args)]
pub struct ConfigArgs {
    pub key: String,
}
