//! CLI argument definitions.

use clap::{Args, Parser};

use crate::commands::Commands;

/// Record student grades and follow them live.
#[derive(Parser, Debug)]
#[command(name = "nilai")]
#[command(author, version = env!("NILAI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where grades are stored. Falls back to the saved configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Store location (file:// URL or directory)
    #[arg(long, env = "NILAI_STORE", global = true)]
    pub store: Option<String>,

    /// Collection holding grade documents
    #[arg(long, env = "NILAI_COLLECTION", global = true)]
    pub collection: Option<String>,
}
