//! Render command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use nilai_core::render_page;

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Search keyword applied to the table
    #[arg(long, short)]
    pub search: Option<String>,

    /// Write the page to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn run(args: RenderArgs, store: &StoreArgs) -> Result<()> {
    let (mut book, _live) = super::open_book(store).await?;

    if let Some(keyword) = args.search {
        book.set_search(keyword);
    }

    let page = render_page(&book.view(), book.keyword(), book.notice());

    match args.out {
        Some(path) => {
            std::fs::write(&path, page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!("Wrote {}", path.display()));
        }
        None => print!("{}", page),
    }

    Ok(())
}
