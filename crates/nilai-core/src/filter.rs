//! Client-side keyword search.

use crate::record::GradeRecord;

/// Records whose `nim`, `nama` or `mata_kuliah` contains `keyword`,
/// case-insensitively.
///
/// The keyword is trimmed first; an empty keyword selects every record.
/// Absent fields never match. Source order is preserved.
pub fn filter<'a>(records: &'a [GradeRecord], keyword: &str) -> Vec<&'a GradeRecord> {
    let keyword = keyword.trim().to_lowercase();

    if keyword.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| {
            [&record.nim, &record.nama, &record.mata_kuliah]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&keyword))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordId, ServerTimestamp};

    fn record(id: &str, nim: Option<&str>, nama: Option<&str>, mk: Option<&str>) -> GradeRecord {
        GradeRecord {
            id: RecordId::new(id).unwrap(),
            nim: nim.map(String::from),
            nama: nama.map(String::from),
            mata_kuliah: mk.map(String::from),
            nilai: Some(70.0),
            created_at: ServerTimestamp::Pending,
        }
    }

    fn sample() -> Vec<GradeRecord> {
        vec![
            record("r1", Some("2201"), Some("Budi Santoso"), Some("Algoritma")),
            record("r2", Some("2202"), Some("Siti"), Some("Basis Data")),
            record("r3", Some("3301"), Some("Agus"), Some("Algoritma Lanjut")),
        ]
    }

    fn ids(records: &[&GradeRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn empty_keyword_returns_everything_in_order() {
        let records = sample();
        assert_eq!(ids(&filter(&records, "")), ["r1", "r2", "r3"]);
        assert_eq!(ids(&filter(&records, "   ")), ["r1", "r2", "r3"]);
    }

    #[test]
    fn matches_are_case_insensitive() {
        let records = sample();
        assert_eq!(ids(&filter(&records, "ALGO")), ["r1", "r3"]);
        assert_eq!(ids(&filter(&records, "  siti ")), ["r2"]);
    }

    #[test]
    fn searches_exactly_three_fields() {
        let records = sample();
        assert_eq!(ids(&filter(&records, "220")), ["r1", "r2"]);
        // The score is not searchable.
        assert!(filter(&records, "70").is_empty());
        // Nor is the id.
        assert!(filter(&records, "r1").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter(&sample(), "fisika").is_empty());
    }

    #[test]
    fn absent_fields_never_match() {
        let records = vec![
            record("r1", None, None, None),
            record("r2", None, Some("Dewi"), None),
        ];
        assert_eq!(ids(&filter(&records, "dewi")), ["r2"]);
        assert!(filter(&records, "none").is_empty());
    }
}
