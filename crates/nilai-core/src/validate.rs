//! Form validation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::NewGrade;

/// Raw values of the four form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub nim: String,
    pub nama: String,
    pub mata_kuliah: String,
    pub nilai: String,
}

impl FormInput {
    pub fn new(
        nim: impl Into<String>,
        nama: impl Into<String>,
        mata_kuliah: impl Into<String>,
        nilai: impl Into<String>,
    ) -> Self {
        Self {
            nim: nim.into(),
            nama: nama.into(),
            mata_kuliah: mata_kuliah.into(),
            nilai: nilai.into(),
        }
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Validate the form and produce a grade ready to be written.
///
/// Checks, in order: every field is non-empty after trimming, then the score
/// parses as a finite number within `[0, 100]`. String fields are trimmed and
/// otherwise kept verbatim.
pub fn validate(input: &FormInput) -> Result<NewGrade, ValidationError> {
    let nim = input.nim.trim();
    let nama = input.nama.trim();
    let mata_kuliah = input.mata_kuliah.trim();
    let nilai = input.nilai.trim();

    if nim.is_empty() || nama.is_empty() || mata_kuliah.is_empty() || nilai.is_empty() {
        return Err(ValidationError::MissingField);
    }

    let score = parse_score(nilai).ok_or(ValidationError::ScoreOutOfRange)?;

    Ok(NewGrade {
        nim: nim.to_string(),
        nama: nama.to_string(),
        mata_kuliah: mata_kuliah.to_string(),
        nilai: score,
    })
}

/// Parse a decimal score and range-check it. `NaN` and infinities never pass.
fn parse_score(s: &str) -> Option<f64> {
    // Rust accepts "inf"/"nan" spellings; a score is always finite.
    let n: f64 = s.parse().ok()?;
    // Adding +0.0 turns -0.0 into 0.0.
    (n.is_finite() && (0.0..=100.0).contains(&n)).then_some(n + 0.0)
}
