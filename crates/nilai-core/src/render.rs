//! Table rendering.
//!
//! Produces the table body markup for a list of records together with the
//! plain display values, so that HTML and terminal surfaces show identical
//! rows.

use std::fmt::Write;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::notice::{Notice, NoticeKind};
use crate::record::GradeRecord;

/// Message shown in the placeholder row of an empty table.
pub const NO_DATA: &str = "no data";

/// Shown in the timestamp column while the server timestamp is pending.
pub const PENDING_TIMESTAMP: &str = "-";

// id-ID locale style, e.g. "14/10/2026, 13.05.22".
const LOCALE_FORMAT: &str = "%d/%m/%Y, %H.%M.%S";

/// Display values of a single row, unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub nim: String,
    pub nama: String,
    pub mata_kuliah: String,
    pub nilai: String,
    pub created_at: String,
}

/// The rendered table: body markup, rows and the record-count label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub rows_html: String,
    pub count_label: String,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render records with timestamps in the local time zone.
pub fn render<'a>(records: impl IntoIterator<Item = &'a GradeRecord>) -> TableView {
    render_in(records, &Local)
}

/// Render records with timestamps in the given time zone.
pub fn render_in<'a, Tz>(records: impl IntoIterator<Item = &'a GradeRecord>, tz: &Tz) -> TableView
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let rows: Vec<TableRow> = records.into_iter().map(|r| table_row(r, tz)).collect();

    let mut rows_html = String::new();
    if rows.is_empty() {
        let _ = write!(
            rows_html,
            r#"<tr><td colspan="5" class="text-center text-muted">{NO_DATA}</td></tr>"#
        );
    } else {
        for row in &rows {
            let _ = write!(
                rows_html,
                concat!(
                    "<tr>",
                    "<td>{}</td>",
                    "<td>{}</td>",
                    "<td>{}</td>",
                    r#"<td class="text-end">{}</td>"#,
                    r#"<td class="text-nowrap">{}</td>"#,
                    "</tr>\n"
                ),
                escape_html(&row.nim),
                escape_html(&row.nama),
                escape_html(&row.mata_kuliah),
                escape_html(&row.nilai),
                escape_html(&row.created_at),
            );
        }
    }

    TableView {
        count_label: format!("{} record", rows.len()),
        rows,
        rows_html,
    }
}

fn table_row<Tz>(record: &GradeRecord, tz: &Tz) -> TableRow
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let created_at = record
        .created_at
        .resolved()
        .map(|at| at.with_timezone(tz).format(LOCALE_FORMAT).to_string())
        .unwrap_or_else(|| PENDING_TIMESTAMP.to_string());

    TableRow {
        nim: record.nim.clone().unwrap_or_default(),
        nama: record.nama.clone().unwrap_or_default(),
        mata_kuliah: record.mata_kuliah.clone().unwrap_or_default(),
        nilai: record.nilai_display(),
        created_at,
    }
}

/// Escape `&`, `<`, `>` and `"` for insertion into markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Render a standalone page: notice area, search box, table and count.
pub fn render_page(view: &TableView, keyword: &str, notice: Option<&Notice>) -> String {
    let notice_html = notice
        .map(|n| {
            let class = match n.kind {
                NoticeKind::Success => "success",
                NoticeKind::Danger => "danger",
            };
            format!(
                r#"<div class="alert alert-{class} py-1">{}</div>"#,
                escape_html(&n.text)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="id">
<head>
<meta charset="utf-8">
<title>Nilai Mahasiswa</title>
</head>
<body>
<div id="formMsg">{notice_html}</div>
<input id="searchInput" type="search" value="{keyword}">
<table>
<thead><tr><th>NIM</th><th>Nama</th><th>Mata Kuliah</th><th class="text-end">Nilai</th><th>Waktu</th></tr></thead>
<tbody id="tbodyNilai">
{rows}</tbody>
</table>
<span id="recordsCount">{count}</span>
</body>
</html>
"#,
        keyword = escape_html(keyword),
        rows = view.rows_html,
        count = escape_html(&view.count_label),
    )
}
