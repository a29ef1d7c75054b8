//! Watch command implementation.
//!
//! Follows the live query and redraws the table on every snapshot. Lines read
//! from stdin drive the session:
//!
//! - any text replaces the search keyword (an empty line clears it)
//! - `:add NIM|NAMA|MATA_KULIAH|NILAI` submits a grade
//! - `:clear` discards a form kept after a rejected `:add`
//! - `:export [DIR]` writes nilai_mahasiswa.csv
//! - `:q` quits

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error};

use nilai_core::traits::GradeStore;
use nilai_core::{Connection, FormInput, GradeBook};
use nilai_file::FileGradeStore;

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Initial search keyword
    #[arg(long, short)]
    pub search: Option<String>,
}

enum Input {
    Search(String),
    Add(FormInput),
    Clear,
    Export(PathBuf),
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);

    if line == ":q" || line == ":quit" {
        return Input::Quit;
    }

    if line == ":clear" {
        return Input::Clear;
    }

    if let Some(rest) = line.strip_prefix(":export") {
        let dir = rest.trim();
        return Input::Export(PathBuf::from(if dir.is_empty() { "." } else { dir }));
    }

    if let Some(rest) = line.strip_prefix(":add") {
        let fields: Vec<&str> = rest.trim().split('|').collect();
        return match fields.as_slice() {
            [nim, nama, mata_kuliah, nilai] => {
                Input::Add(FormInput::new(*nim, *nama, *mata_kuliah, *nilai))
            }
            _ => Input::Invalid("usage: :add NIM|NAMA|MATA_KULIAH|NILAI".to_string()),
        };
    }

    if line.starts_with(':') {
        return Input::Invalid(format!("unknown command {}", line));
    }

    Input::Search(line.to_string())
}

pub async fn run(args: WatchArgs, store: &StoreArgs) -> Result<()> {
    let (mut book, mut live) = super::open_book(store).await?;

    if let Some(keyword) = args.search {
        book.set_search(keyword);
    }

    eprintln!("{}", format!("Watching {}", book.store().url()).dimmed());
    eprintln!("{}", "Type a keyword to search, :q to quit.".dimmed());
    redraw(&book);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            item = live.next(), if book.connection() == Connection::Active => {
                match item {
                    Some(item) => {
                        if book.on_live_query(item) {
                            redraw(&book);
                        }
                    }
                    None => book.fail_subscription(&nilai_core::Error::subscription(
                        "live query ended",
                    )),
                }
                if book.connection() == Connection::Failed {
                    show_notice(&book);
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        if !handle_input(&mut book, parse_input(&line)).await {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("stdin closed");
                        stdin_open = false;
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read stdin");
                        output::error(&format!("Failed to read stdin: {}", e));
                        stdin_open = false;
                    }
                }
            }
            _ = ticker.tick() => {
                book.tick(Utc::now());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

/// Returns false when the session should end. Failures are reported and
/// the session continues.
async fn handle_input(book: &mut GradeBook<FileGradeStore>, input: Input) -> bool {
    match input {
        Input::Quit => return false,
        Input::Search(keyword) => {
            book.set_search(keyword);
            redraw(book);
        }
        Input::Add(form) => {
            *book.form_mut() = form;
            book.submit().await;
            show_notice(book);
        }
        Input::Clear => {
            book.clear_form();
            output::success("Form cleared");
        }
        Input::Export(dir) => match book.export() {
            Some(export) => match super::export::write(&export, &dir) {
                Ok(path) => output::success(&format!(
                    "Exported {} record(s) to {}",
                    export.rows,
                    path.display()
                )),
                Err(e) => {
                    error!(error = %e, "Export failed");
                    output::error(&format!("{:#}", e));
                }
            },
            None => show_notice(book),
        },
        Input::Invalid(msg) => output::error(&msg),
    }
    true
}

fn redraw(book: &GradeBook<FileGradeStore>) {
    println!();
    if !book.keyword().trim().is_empty() {
        output::field("Search", book.keyword().trim());
    }
    output::table(&book.view());
}

fn show_notice(book: &GradeBook<FileGradeStore>) {
    if let Some(notice) = book.notice() {
        output::notice(notice);
    }
}
