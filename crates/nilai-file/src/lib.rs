//! nilai-file - Filesystem-backed grade store.
//!
//! A store is a directory shared by every client that points at it. Each
//! document is one JSON file; live queries watch the collection directory and
//! re-deliver the whole collection whenever it changes.

mod grade_store;
mod live_query;
mod store;

pub use grade_store::FileGradeStore;
pub use live_query::FileLiveQuery;
pub use store::{FileStore, StoredGrade};
