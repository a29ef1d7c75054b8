//! File-backed grade store.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use nilai_core::error::{Error, InvalidInputError};
use nilai_core::traits::GradeStore;
use nilai_core::{NewGrade, RecordId, Result, StoreUrl};

use crate::live_query::FileLiveQuery;
use crate::store::FileStore;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Filesystem-backed [`GradeStore`].
#[derive(Debug, Clone)]
pub struct FileGradeStore {
    store: FileStore,
    url: StoreUrl,
    poll_interval: Duration,
}

impl FileGradeStore {
    /// Open the store at `url`, holding documents in `collection`.
    ///
    /// Nothing is created on disk until the first write or subscription.
    pub fn open(url: StoreUrl, collection: impl Into<String>) -> Result<Self> {
        let root = url.to_file_path().ok_or_else(|| {
            Error::from(InvalidInputError::StoreUrl {
                value: url.to_string(),
                reason: "not a local path".to_string(),
            })
        })?;

        Ok(Self {
            store: FileStore::new(root, collection)?,
            url,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override how often live queries re-check the collection when the
    /// watcher reports nothing.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Access the underlying file store.
    pub fn file_store(&self) -> &FileStore {
        &self.store
    }
}

#[async_trait]
impl GradeStore for FileGradeStore {
    type LiveQuery = FileLiveQuery;

    fn url(&self) -> &StoreUrl {
        &self.url
    }

    fn collection(&self) -> &str {
        self.store.collection()
    }

    #[instrument(skip(self, grade), fields(store = %self.url))]
    async fn save(&self, grade: &NewGrade) -> Result<RecordId> {
        debug!("Saving grade");
        self.store.insert(grade).await
    }

    fn subscribe(&self) -> Result<Self::LiveQuery> {
        FileLiveQuery::from_store(self.store.clone(), self.poll_interval)
    }
}
