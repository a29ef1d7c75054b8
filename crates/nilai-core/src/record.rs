//! Grade records.

use serde::{Deserialize, Serialize};

use crate::types::{RecordId, ServerTimestamp};

/// A validated grade that has not been written yet.
///
/// Produced only by [`validate`](crate::validate()); carries neither an id nor
/// a timestamp, both of which the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGrade {
    pub nim: String,
    pub nama: String,
    pub mata_kuliah: String,
    pub nilai: f64,
}

/// A grade document as observed through a live snapshot.
///
/// The string fields are optional because documents written by other
/// clients are not guaranteed to carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: RecordId,

    /// Student ID.
    #[serde(default)]
    pub nim: Option<String>,

    /// Student name.
    #[serde(default)]
    pub nama: Option<String>,

    /// Course.
    #[serde(default)]
    pub mata_kuliah: Option<String>,

    /// Score, 0-100 for documents written by this system.
    #[serde(default)]
    pub nilai: Option<f64>,

    #[serde(default)]
    pub created_at: ServerTimestamp,
}

impl GradeRecord {
    /// A record with a committed timestamp, as the store delivers it.
    pub fn committed(id: RecordId, grade: NewGrade, created_at: ServerTimestamp) -> Self {
        Self {
            id,
            nim: Some(grade.nim),
            nama: Some(grade.nama),
            mata_kuliah: Some(grade.mata_kuliah),
            nilai: Some(grade.nilai),
            created_at,
        }
    }

    /// The score rendered the way a JS number prints, empty when absent.
    pub fn nilai_display(&self) -> String {
        self.nilai.map(|n| (n + 0.0).to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_score(nilai: Option<f64>) -> GradeRecord {
        GradeRecord {
            id: RecordId::new("r1").unwrap(),
            nim: None,
            nama: None,
            mata_kuliah: None,
            nilai,
            created_at: ServerTimestamp::Pending,
        }
    }

    #[test]
    fn score_display_matches_number_printing() {
        assert_eq!(with_score(Some(90.0)).nilai_display(), "90");
        assert_eq!(with_score(Some(85.5)).nilai_display(), "85.5");
        assert_eq!(with_score(Some(-0.0)).nilai_display(), "0");
        assert_eq!(with_score(None).nilai_display(), "");
    }
}
