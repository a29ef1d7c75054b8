//! Subcommand implementations.

mod config;
mod export;
mod list;
mod render;
mod submit;
mod watch;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use futures_util::StreamExt;

use nilai_core::traits::GradeStore;
use nilai_core::{Connection, GradeBook};
use nilai_file::{FileGradeStore, FileLiveQuery};

use crate::cli::StoreArgs;
use crate::{config as cfg, output};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and save one grade
    Submit(submit::SubmitArgs),

    /// Show the current grades
    List(list::ListArgs),

    /// Follow grades live
    Watch(watch::WatchArgs),

    /// Export all grades to nilai_mahasiswa.csv
    Export(export::ExportArgs),

    /// Render the grade book as an HTML page
    Render(render::RenderArgs),

    /// Show or change the saved configuration
    Config(config::ConfigCommand),
}

pub async fn handle(cmd: Commands, store: &StoreArgs) -> Result<()> {
    match cmd {
        Commands::Submit(args) => submit::run(args, store).await,
        Commands::List(args) => list::run(args, store).await,
        Commands::Watch(args) => watch::run(args, store).await,
        Commands::Export(args) => export::run(args, store).await,
        Commands::Render(args) => render::run(args, store).await,
        Commands::Config(args) => config::run(args, store).await,
    }
}

/// Open the store, subscribe, and apply the first snapshot.
///
/// The live query is returned so callers can keep following it.
async fn open_book(store: &StoreArgs) -> Result<(GradeBook<FileGradeStore>, FileLiveQuery)> {
    let store = cfg::open_store(store)?;
    let mut live = store.subscribe().context("Failed to start subscription")?;
    let mut book = GradeBook::new(store);

    match live.next().await {
        Some(item) => {
            book.on_live_query(item);
        }
        None => book.fail_subscription(&nilai_core::Error::subscription(
            "live query ended before the first snapshot",
        )),
    }

    if book.connection() == Connection::Failed {
        if let Some(notice) = book.notice() {
            output::notice(notice);
        }
        bail!("No connection to {}", book.store().url());
    }

    Ok((book, live))
}
