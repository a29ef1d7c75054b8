//! nilai-core - Core grade book types and traits.
//!
//! Everything here is free of I/O: validation, the snapshot cache, search,
//! rendering and CSV export operate on plain values, and persistence is
//! reached only through the [`GradeStore`] trait.

pub mod book;
pub mod csv;
pub mod error;
pub mod filter;
pub mod notice;
pub mod record;
pub mod render;
pub mod snapshot;
pub mod traits;
pub mod types;
pub mod validate;

pub use book::{Connection, FormState, GradeBook, SubmitOutcome};
pub use csv::{CsvExport, export_csv};
pub use error::Error;
pub use filter::filter;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use record::{GradeRecord, NewGrade};
pub use render::{TableRow, TableView, render, render_page};
pub use snapshot::{Snapshot, SnapshotCache};
pub use traits::{GradeStore, LiveQuery};
pub use types::{RecordId, ServerTimestamp, StoreUrl};
pub use validate::{FormInput, validate};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default collection holding grade documents.
pub const DEFAULT_COLLECTION: &str = "nilai_mahasiswa";
