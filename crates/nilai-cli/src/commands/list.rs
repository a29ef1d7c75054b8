//! List command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show grades whose NIM, name or course contains this keyword
    #[arg(long, short)]
    pub search: Option<String>,

    /// Print the table body markup and count label instead of text
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// Print the visible records as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, store: &StoreArgs) -> Result<()> {
    let (mut book, _live) = super::open_book(store).await?;

    if let Some(keyword) = args.search {
        book.set_search(keyword);
    }

    if args.json {
        for record in book.visible() {
            output::json(record)?;
        }
        return Ok(());
    }

    let view = book.view();
    if args.html {
        print!("{}", view.rows_html);
        println!("{}", view.count_label);
    } else {
        output::table(&view);
    }

    Ok(())
}
