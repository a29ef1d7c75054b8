//! Transient user-facing notices.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a notice stays visible, in seconds.
pub const NOTICE_LIFETIME_SECS: i64 = 3;

pub const SAVE_SUCCESS: &str = "record saved";
pub const SAVE_FAILURE: &str = "failed to save record, see log";
pub const CONNECTION_FAILURE: &str = "failed to connect to the grade store, check the configuration";
pub const NOTHING_TO_EXPORT: &str = "nothing to export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Danger,
}

/// A short-lived message with an expiry time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    /// A notice posted at `now`, expiring after [`NOTICE_LIFETIME_SECS`].
    pub fn new(text: impl Into<String>, kind: NoticeKind, now: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: now + Duration::seconds(NOTICE_LIFETIME_SECS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Holds at most one notice; a new notice supersedes the previous one
/// together with its pending expiry.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, notice: Notice) {
        self.current = Some(notice);
    }

    /// The visible notice at `now`, if it has not expired.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Drop the notice once it has expired. Returns true if one was cleared.
    pub fn clear_expired(&mut self, now: DateTime<Utc>) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }
}
