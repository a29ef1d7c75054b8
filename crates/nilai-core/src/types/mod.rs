//! Core grade book types.
//!
//! These types enforce their invariants at construction time.

mod record_id;
mod store_url;
mod timestamp;

pub use record_id::RecordId;
pub use store_url::StoreUrl;
pub use timestamp::ServerTimestamp;
