//! Server-assigned timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp assigned by the store when a document is committed.
///
/// A document observed before the store has committed its timestamp, or
/// written by a client that never set one, carries [`ServerTimestamp::Pending`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ServerTimestamp {
    #[default]
    Pending,
    Resolved(DateTime<Utc>),
}

impl ServerTimestamp {
    /// Returns the committed point in time, if any.
    pub fn resolved(&self) -> Option<DateTime<Utc>> {
        match self {
            ServerTimestamp::Pending => None,
            ServerTimestamp::Resolved(at) => Some(*at),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ServerTimestamp::Pending)
    }

    /// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-14T05:30:00.000Z`.
    ///
    /// Returns `None` while pending.
    pub fn to_iso8601(&self) -> Option<String> {
        self.resolved()
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for ServerTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        ServerTimestamp::Resolved(at)
    }
}

impl From<Option<DateTime<Utc>>> for ServerTimestamp {
    fn from(at: Option<DateTime<Utc>>) -> Self {
        at.map_or(ServerTimestamp::Pending, ServerTimestamp::Resolved)
    }
}

// Serialized as an RFC 3339 string, or `null` while pending.
impl Serialize for ServerTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.resolved().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ServerTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<DateTime<Utc>>::deserialize(deserializer).map(Into::into)
    }
}
