//! Live query stream for the file-backed store.

use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::Stream;
use notify::{EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use nilai_core::error::Error;
use nilai_core::{Result, Snapshot};

use crate::store::FileStore;

/// Live query over a file-backed collection.
///
/// The first item is the collection as it stands; afterwards a new snapshot
/// is delivered whenever the set of documents changes, whoever changed it.
/// Change detection combines a directory watcher with a polling fallback.
/// Dropping the stream stops both.
pub struct FileLiveQuery {
    inner: Pin<Box<dyn Stream<Item = Result<Snapshot>> + Send>>,
}

impl FileLiveQuery {
    pub(crate) fn from_store(store: FileStore, poll_interval: Duration) -> Result<Self> {
        let dir = store.collection_dir();

        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::subscription(format!("failed to create collection directory: {}", e))
        })?;

        let (tx, mut rx) = mpsc::channel::<Result<Snapshot>>(100);
        let (dirty_tx, mut dirty_rx) = mpsc::channel::<()>(1);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) if touches_documents(&event) => {
                    // A full channel already has a reload queued.
                    let _ = dirty_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Collection watcher error"),
            }
        })
        .map_err(|e| Error::subscription(format!("failed to create file watcher: {}", e)))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| Error::subscription(format!("failed to watch collection: {}", e)))?;

        tokio::spawn(async move {
            let _watcher = watcher;
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut last: Option<Snapshot> = None;

            loop {
                let snapshot = match reload(&store) {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        break;
                    }
                };

                if last.as_ref() != Some(&snapshot) {
                    debug!(records = snapshot.len(), "Delivering snapshot");
                    if tx.send(Ok(snapshot.clone())).await.is_err() {
                        trace!("Live query dropped");
                        break;
                    }
                    last = Some(snapshot);
                }

                tokio::select! {
                    _ = interval.tick() => {}
                    Some(()) = dirty_rx.recv() => {}
                    _ = tx.closed() => break,
                }
            }
        });

        let stream = async_stream::stream! {
            while let Some(item) = rx.recv().await {
                yield item;
            }
        };

        Ok(Self {
            inner: Box::pin(stream),
        })
    }
}

impl Stream for FileLiveQuery {
    type Item = Result<Snapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Re-read the collection; losing the directory fails the subscription.
fn reload(store: &FileStore) -> Result<Snapshot> {
    let dir = store.collection_dir();
    if !dir.is_dir() {
        return Err(Error::subscription(format!(
            "collection directory {} is gone",
            dir.display()
        )));
    }

    store
        .load()
        .map_err(|e| Error::subscription(format!("failed to read collection: {}", e)))
}

fn touches_documents(event: &notify::Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| is_document(p))
}

fn is_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
