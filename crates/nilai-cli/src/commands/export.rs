//! Export command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use nilai_core::CsvExport;

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory to write nilai_mahasiswa.csv into
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub async fn run(args: ExportArgs, store: &StoreArgs) -> Result<()> {
    let (mut book, _live) = super::open_book(store).await?;

    let Some(export) = book.export() else {
        // An empty store is not a failure.
        if let Some(notice) = book.notice() {
            output::notice(notice);
        }
        return Ok(());
    };

    let path = write(&export, &args.out)?;

    println!("{}", path.display());
    output::success(&format!("Exported {} record(s)", export.rows));

    Ok(())
}

/// Write the export into `dir`, creating it if needed.
pub(super) fn write(export: &CsvExport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).context("Failed to create output directory")?;
    let path = dir.join(export.file_name);
    std::fs::write(&path, &export.body)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
