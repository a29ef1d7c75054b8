//! The grade book page controller.
//!
//! A [`GradeBook`] owns everything a session holds: the store handle, the
//! snapshot cache, the form, the search keyword and the notice board. Each
//! operation handles its own failures and reports them as a notice, so no
//! error escapes to the caller.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use crate::csv::{CsvExport, export_csv};
use crate::error::{Error, ValidationError};
use crate::filter::filter;
use crate::notice::{self, Notice, NoticeBoard, NoticeKind};
use crate::record::GradeRecord;
use crate::render::{TableView, render};
use crate::snapshot::{Snapshot, SnapshotCache};
use crate::traits::GradeStore;
use crate::types::RecordId;
use crate::validate::{FormInput, validate};

/// State of the standing subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    /// Snapshots are being applied.
    Active,
    /// The subscription reported an error; terminal for the session.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Saving,
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Written; the record appears once a snapshot echoes it back.
    Saved(RecordId),
    /// Rejected before anything was sent.
    Rejected(ValidationError),
    /// The store failed the write. Nothing is retried.
    Failed,
}

/// Session state for one grade book surface.
#[derive(Debug)]
pub struct GradeBook<S> {
    store: S,
    cache: SnapshotCache,
    notices: NoticeBoard,
    form: FormInput,
    keyword: String,
    form_state: FormState,
    connection: Connection,
}

impl<S: GradeStore> GradeBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: SnapshotCache::new(),
            notices: NoticeBoard::new(),
            form: FormInput::default(),
            keyword: String::new(),
            form_state: FormState::Idle,
            connection: Connection::Active,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormInput {
        &mut self.form
    }

    pub fn form_state(&self) -> FormState {
        self.form_state
    }

    pub fn connection(&self) -> Connection {
        self.connection
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Validate the form and write it.
    ///
    /// On success the form is cleared. Every outcome posts a notice.
    #[instrument(skip(self), fields(collection = %self.store.collection()))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.form_state = FormState::Validating;

        let grade = match validate(&self.form) {
            Ok(grade) => grade,
            Err(err) => {
                debug!(%err, "Form rejected");
                self.post(err.to_string(), NoticeKind::Danger);
                self.form_state = FormState::Idle;
                return SubmitOutcome::Rejected(err);
            }
        };

        self.form_state = FormState::Saving;
        let outcome = match self.store.save(&grade).await {
            Ok(id) => {
                info!(%id, nim = %grade.nim, "Saved grade");
                self.form.clear();
                self.post(notice::SAVE_SUCCESS, NoticeKind::Success);
                SubmitOutcome::Saved(id)
            }
            Err(err) => {
                error!(error = %err, "Failed to save grade");
                self.post(notice::SAVE_FAILURE, NoticeKind::Danger);
                SubmitOutcome::Failed
            }
        };
        self.form_state = FormState::Idle;

        outcome
    }

    /// Reset the form without submitting.
    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    pub fn set_search(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    /// Apply one live query item: a snapshot replaces the cache, an error
    /// fails the subscription.
    ///
    /// Returns true if the cache changed.
    pub fn on_live_query(&mut self, item: crate::Result<Snapshot>) -> bool {
        match item {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(err) => {
                self.fail_subscription(&err);
                false
            }
        }
    }

    /// Replace the cache with a newer snapshot.
    ///
    /// Ignored once the subscription has failed. Returns true if applied.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> bool {
        if self.connection == Connection::Failed {
            warn!("Dropping snapshot delivered after subscription failure");
            return false;
        }

        debug!(records = snapshot.len(), "Applying snapshot");
        self.cache.replace(snapshot);
        true
    }

    /// Mark the subscription as failed for the rest of the session.
    pub fn fail_subscription(&mut self, err: &Error) {
        error!(error = %err, "Live query failed");
        self.connection = Connection::Failed;
        self.post(notice::CONNECTION_FAILURE, NoticeKind::Danger);
    }

    /// Cached records matching the current keyword, in snapshot order.
    pub fn visible(&self) -> Vec<&GradeRecord> {
        filter(self.cache.records(), &self.keyword)
    }

    /// The table for the current keyword.
    pub fn view(&self) -> TableView {
        render(self.visible())
    }

    /// Export the whole cache, ignoring the search keyword.
    ///
    /// Returns `None` and posts a notice when the cache is empty.
    pub fn export(&mut self) -> Option<CsvExport> {
        match export_csv(self.cache.records()) {
            Ok(export) => {
                info!(rows = export.rows, "Exported grades");
                Some(export)
            }
            Err(err) => {
                debug!(%err, "Nothing to export");
                self.post(notice::NOTHING_TO_EXPORT, NoticeKind::Danger);
                None
            }
        }
    }

    /// The notice visible right now.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Utc::now())
    }

    pub fn notice_at(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notices.current(now)
    }

    /// Drop an expired notice. Returns true if one was cleared.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        self.notices.clear_expired(now)
    }

    fn post(&mut self, text: impl Into<String>, kind: NoticeKind) {
        self.notices.post(Notice::new(text, kind, Utc::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::types::{ServerTimestamp, StoreUrl};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use futures_util::stream;
    use std::sync::Mutex;

    /// Records saves in memory; optionally fails every write.
    struct MemoryStore {
        url: StoreUrl,
        saved: Mutex<Vec<crate::record::NewGrade>>,
        fail: bool,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                url: StoreUrl::new("file:///tmp/nilai-memory").unwrap(),
                saved: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn saved(&self) -> Vec<crate::record::NewGrade> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GradeStore for MemoryStore {
        type LiveQuery = stream::Empty<crate::Result<Snapshot>>;

        fn url(&self) -> &StoreUrl {
            &self.url
        }

        fn collection(&self) -> &str {
            crate::DEFAULT_COLLECTION
        }

        async fn save(&self, grade: &crate::record::NewGrade) -> crate::Result<RecordId> {
            if self.fail {
                let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "offline");
                return Err(StoreError::Io(io).into());
            }
            let mut saved = self.saved.lock().unwrap();
            saved.push(grade.clone());
            Ok(RecordId::new(format!("doc{}", saved.len())).unwrap())
        }

        fn subscribe(&self) -> crate::Result<Self::LiveQuery> {
            Ok(stream::empty())
        }
    }

    fn record(id: &str, nim: &str, nama: &str, mk: &str, minute: u32) -> GradeRecord {
        GradeRecord {
            id: RecordId::new(id).unwrap(),
            nim: Some(nim.to_string()),
            nama: Some(nama.to_string()),
            mata_kuliah: Some(mk.to_string()),
            nilai: Some(80.0),
            created_at: ServerTimestamp::from(
                Utc.with_ymd_and_hms(2026, 10, 14, 8, minute, 0).unwrap(),
            ),
        }
    }

    fn fill(book: &mut GradeBook<MemoryStore>, nim: &str, nama: &str, mk: &str, nilai: &str) {
        *book.form_mut() = FormInput::new(nim, nama, mk, nilai);
    }

    #[tokio::test]
    async fn valid_submit_writes_and_clears_form() {
        let mut book = GradeBook::new(MemoryStore::new());
        fill(&mut book, "123", "Budi", "Algo", "90");

        let outcome = book.submit().await;

        assert_eq!(outcome, SubmitOutcome::Saved(RecordId::new("doc1").unwrap()));
        assert_eq!(book.form(), &FormInput::default());
        assert_eq!(book.form_state(), FormState::Idle);
        assert_eq!(book.notice().unwrap().text, notice::SAVE_SUCCESS);
        assert_eq!(book.notice().unwrap().kind, NoticeKind::Success);

        let saved = book.store().saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].nilai, 90.0);
    }

    #[tokio::test]
    async fn saved_record_is_not_inserted_optimistically() {
        let mut book = GradeBook::new(MemoryStore::new());
        fill(&mut book, "123", "Budi", "Algo", "90");
        book.submit().await;

        assert!(book.cache().is_empty());
        assert_eq!(book.view().count_label, "0 record");
    }

    #[tokio::test]
    async fn blank_field_never_reaches_the_store() {
        let mut book = GradeBook::new(MemoryStore::new());
        fill(&mut book, "123", " ", "Algo", "90");

        let outcome = book.submit().await;

        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::MissingField));
        assert!(book.store().saved().is_empty());
        let shown = book.notice().unwrap();
        assert_eq!(shown.text, "all fields required");
        assert_eq!(shown.kind, NoticeKind::Danger);
        // The form keeps what was typed.
        assert_eq!(book.form().nim, "123");
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected() {
        let mut book = GradeBook::new(MemoryStore::new());
        fill(&mut book, "123", "Budi", "Algo", "101");

        assert_eq!(
            book.submit().await,
            SubmitOutcome::Rejected(ValidationError::ScoreOutOfRange)
        );
        assert_eq!(
            book.notice().unwrap().text,
            "score must be a number between 0 and 100"
        );
    }

    #[tokio::test]
    async fn store_failure_posts_generic_notice_and_keeps_form() {
        let mut book = GradeBook::new(MemoryStore::failing());
        fill(&mut book, "123", "Budi", "Algo", "90");

        assert_eq!(book.submit().await, SubmitOutcome::Failed);
        assert_eq!(book.notice().unwrap().text, notice::SAVE_FAILURE);
        assert_eq!(book.form().nama, "Budi");
        assert_eq!(book.form_state(), FormState::Idle);
    }

    #[test]
    fn snapshot_renders_in_delivered_order() {
        let mut book = GradeBook::new(MemoryStore::new());
        let snapshot = Snapshot::new(vec![
            record("c", "3", "Citra", "Algo", 3),
            record("b", "2", "Bima", "Basis Data", 2),
            record("a", "1", "Ayu", "Algo", 1),
        ]);

        assert!(book.apply_snapshot(snapshot));

        let view = book.view();
        assert_eq!(view.count_label, "3 record");
        let nims: Vec<_> = view.rows.iter().map(|r| r.nim.as_str()).collect();
        assert_eq!(nims, ["3", "2", "1"]);
    }

    #[test]
    fn search_filters_view_but_not_export() {
        let mut book = GradeBook::new(MemoryStore::new());
        book.apply_snapshot(Snapshot::new(vec![
            record("b", "2", "Bima", "Basis Data", 2),
            record("a", "1", "Ayu", "Algo", 1),
        ]));

        book.set_search("ALGO");
        assert_eq!(book.view().count_label, "1 record");

        let export = book.export().unwrap();
        assert_eq!(export.rows, 2);
    }

    #[test]
    fn keyword_survives_new_snapshots() {
        let mut book = GradeBook::new(MemoryStore::new());
        book.set_search("ayu");
        book.apply_snapshot(Snapshot::new(vec![record("a", "1", "Ayu", "Algo", 1)]));
        book.apply_snapshot(Snapshot::new(vec![
            record("b", "2", "Bima", "Basis Data", 2),
            record("a", "1", "Ayu", "Algo", 1),
        ]));

        assert_eq!(book.visible().len(), 1);
        assert_eq!(book.cache().len(), 2);
    }

    #[test]
    fn empty_export_posts_notice() {
        let mut book = GradeBook::new(MemoryStore::new());
        assert!(book.export().is_none());
        assert_eq!(book.notice().unwrap().text, notice::NOTHING_TO_EXPORT);
    }

    #[test]
    fn subscription_error_is_terminal() {
        let mut book = GradeBook::new(MemoryStore::new());
        book.apply_snapshot(Snapshot::new(vec![record("a", "1", "Ayu", "Algo", 1)]));

        let changed = book.on_live_query(Err(Error::subscription("watcher died")));
        assert!(!changed);
        assert_eq!(book.connection(), Connection::Failed);
        assert_eq!(book.notice().unwrap().text, notice::CONNECTION_FAILURE);

        // Later deliveries are ignored; the last snapshot stays visible.
        assert!(!book.on_live_query(Ok(Snapshot::default())));
        assert_eq!(book.cache().len(), 1);
    }

    #[test]
    fn notices_clear_after_three_seconds() {
        let mut book = GradeBook::new(MemoryStore::new());
        book.export();

        let later = Utc::now() + Duration::seconds(4);
        assert!(book.notice_at(later).is_none());
        assert!(book.tick(later));
        assert!(book.notice().is_none());
    }

    #[test]
    fn clear_form_resets_fields() {
        let mut book = GradeBook::new(MemoryStore::new());
        fill(&mut book, "1", "A", "X", "80");
        book.clear_form();
        assert_eq!(book.form(), &FormInput::default());
    }
}
