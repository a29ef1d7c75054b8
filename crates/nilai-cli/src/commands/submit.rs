//! Submit command implementation.

use anyhow::{Result, bail};
use clap::Args;

use nilai_core::{FormInput, GradeBook, SubmitOutcome};

use crate::cli::StoreArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Student ID
    #[arg(long)]
    pub nim: String,

    /// Student name
    #[arg(long)]
    pub nama: String,

    /// Course
    #[arg(long)]
    pub mata_kuliah: String,

    /// Score, 0 to 100
    #[arg(long, allow_hyphen_values = true)]
    pub nilai: String,
}

pub async fn run(args: SubmitArgs, store: &StoreArgs) -> Result<()> {
    let store = config::open_store(store)?;
    let mut book = GradeBook::new(store);

    *book.form_mut() = FormInput::new(args.nim, args.nama, args.mata_kuliah, args.nilai);

    match book.submit().await {
        SubmitOutcome::Saved(id) => {
            println!("{}", id);
            if let Some(notice) = book.notice() {
                output::notice(notice);
            }
            Ok(())
        }
        SubmitOutcome::Rejected(err) => bail!(err),
        SubmitOutcome::Failed => bail!(nilai_core::notice::SAVE_FAILURE),
    }
}
