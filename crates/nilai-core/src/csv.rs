//! CSV export of the snapshot cache.

use serde::Serialize;

use crate::error::ExportError;
use crate::record::GradeRecord;

/// Default file name offered for download.
pub const FILE_NAME: &str = "nilai_mahasiswa.csv";

pub const MIME_TYPE: &str = "text/csv";

/// Column header, in row order.
pub const COLUMNS: [&str; 5] = ["nim", "nama", "mata_kuliah", "nilai", "created_at"];

/// A materialized CSV file ready to be offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub body: String,
    pub rows: usize,
}

/// Serialize records to CSV.
///
/// Every data cell is double-quoted with embedded quotes doubled; the header
/// is written bare. Rows are joined by `\n` with no trailing newline.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when there is nothing to export.
pub fn export_csv(records: &[GradeRecord]) -> Result<CsvExport, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(COLUMNS.join(","));

    for record in records {
        let created_at = record.created_at.to_iso8601().unwrap_or_default();
        let nilai = record.nilai_display();
        let cells = [
            record.nim.as_deref().unwrap_or(""),
            record.nama.as_deref().unwrap_or(""),
            record.mata_kuliah.as_deref().unwrap_or(""),
            nilai.as_str(),
            created_at.as_str(),
        ];
        lines.push(
            cells
                .iter()
                .map(|cell| quote(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(CsvExport {
        file_name: FILE_NAME,
        mime_type: MIME_TYPE,
        body: lines.join("\n"),
        rows: records.len(),
    })
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
