//! Grade store trait.

use async_trait::async_trait;

use crate::Result;
use crate::record::NewGrade;
use crate::types::{RecordId, StoreUrl};

use super::LiveQuery;

/// A document store holding one collection of grade records.
#[async_trait]
pub trait GradeStore: Send + Sync {
    /// Live query stream type for this store.
    type LiveQuery: LiveQuery;

    /// Returns the location of this store.
    fn url(&self) -> &StoreUrl;

    /// Returns the collection name.
    fn collection(&self) -> &str;

    /// Append a grade. The store assigns the id and the server timestamp.
    ///
    /// A single attempt; callers are not expected to retry.
    async fn save(&self, grade: &NewGrade) -> Result<RecordId>;

    /// Subscribe to every record ordered by `created_at` descending.
    fn subscribe(&self) -> Result<Self::LiveQuery>;
}
