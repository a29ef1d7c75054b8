//! Live query snapshots and the local snapshot cache.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::GradeRecord;

/// A complete, ordered result set delivered by a live query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    records: Vec<GradeRecord>,
}

impl Snapshot {
    /// Wrap records that are already ordered as the store delivered them.
    pub fn new(records: Vec<GradeRecord>) -> Self {
        Self { records }
    }

    /// Order records by `created_at` descending.
    ///
    /// Pending timestamps sort after every resolved one; ties keep their
    /// input order.
    pub fn ordered(mut records: Vec<GradeRecord>) -> Self {
        records.sort_by(|a, b| newest_first(a, b));
        Self { records }
    }

    pub fn records(&self) -> &[GradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<GradeRecord> {
        self.records
    }
}

fn newest_first(a: &GradeRecord, b: &GradeRecord) -> Ordering {
    match (a.created_at.resolved(), b.created_at.resolved()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The working copy of every record for the session.
///
/// [`SnapshotCache::replace`] is the only way to change the contents; each
/// call discards the previous list entirely.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    records: Vec<GradeRecord>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list with a newer snapshot.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.records = snapshot.into_records();
    }

    pub fn records(&self) -> &[GradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordId, ServerTimestamp};
    use chrono::{TimeZone, Utc};

    fn record(id: &str, minute: Option<u32>) -> GradeRecord {
        GradeRecord {
            id: RecordId::new(id).unwrap(),
            nim: Some(id.to_string()),
            nama: Some("A".to_string()),
            mata_kuliah: Some("X".to_string()),
            nilai: Some(80.0),
            created_at: minute
                .map(|m| Utc.with_ymd_and_hms(2026, 10, 14, 8, m, 0).unwrap())
                .into(),
        }
    }

    fn ids(records: &[GradeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn ordered_is_newest_first() {
        let snap = Snapshot::ordered(vec![
            record("a", Some(1)),
            record("c", Some(3)),
            record("b", Some(2)),
        ]);
        assert_eq!(ids(snap.records()), ["c", "b", "a"]);
    }

    #[test]
    fn pending_sorts_last_and_keeps_order() {
        let snap = Snapshot::ordered(vec![
            record("p1", None),
            record("a", Some(1)),
            record("p2", None),
            record("b", Some(2)),
        ]);
        assert_eq!(ids(snap.records()), ["b", "a", "p1", "p2"]);
        assert_eq!(snap.records()[2].created_at, ServerTimestamp::Pending);
    }

    #[test]
    fn replace_discards_previous_contents() {
        let mut cache = SnapshotCache::new();
        assert!(cache.is_empty());

        cache.replace(Snapshot::new(vec![record("a", Some(1)), record("b", Some(2))]));
        assert_eq!(cache.len(), 2);

        cache.replace(Snapshot::new(vec![record("c", Some(3))]));
        assert_eq!(ids(cache.records()), ["c"]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn empty_snapshot_empties_cache() {
        let mut cache = SnapshotCache::new();
        cache.replace(Snapshot::new(vec![record("a", Some(1))]));
        cache.replace(Snapshot::default());
        assert!(cache.is_empty());
    }
}
