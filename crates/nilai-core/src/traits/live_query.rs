//! Live query stream trait.

use futures_core::Stream;

use crate::Result;
use crate::snapshot::Snapshot;

/// A standing query over a whole collection, newest first.
///
/// Each item is the complete current result set and supersedes every earlier
/// item. An `Err` item reports that the subscription failed.
pub trait LiveQuery: Stream<Item = Result<Snapshot>> + Send {}

impl<T> LiveQuery for T where T: Stream<Item = Result<Snapshot>> + Send {}
