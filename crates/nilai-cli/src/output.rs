//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use nilai_core::render::{NO_DATA, TableRow, TableView};
use nilai_core::{Notice, NoticeKind};

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

pub fn notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => success(&notice.text),
        NoticeKind::Danger => error(&notice.text),
    }
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

const HEADERS: [&str; 5] = ["NIM", "Nama", "Mata Kuliah", "Nilai", "Waktu"];

/// Print a table view as aligned text, followed by the record count.
pub fn table(view: &TableView) {
    print!("{}", format_table(view));
    println!("{}", view.count_label.dimmed());
}

fn cells(row: &TableRow) -> [&str; 5] {
    [
        row.nim.as_str(),
        row.nama.as_str(),
        row.mata_kuliah.as_str(),
        row.nilai.as_str(),
        row.created_at.as_str(),
    ]
}

fn format_table(view: &TableView) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &view.rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);

    if view.is_empty() {
        out.push_str(NO_DATA);
        out.push('\n');
        return out;
    }

    for row in &view.rows {
        push_line(&mut out, &cells(row), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let pad = width.saturating_sub(cell.chars().count());
            // Scores are right-aligned.
            if i == 3 {
                format!("{}{}", " ".repeat(pad), cell)
            } else {
                format!("{}{}", cell, " ".repeat(pad))
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
