//! Store location type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated location of a grade store.
///
/// Stores live on a filesystem shared by every client, so the location is a
/// `file://` URL. Plain absolute or relative paths are accepted and converted.
///
/// # Example
///
/// ```
/// use nilai_core::StoreUrl;
///
/// let store = StoreUrl::new("file:///srv/nilai").unwrap();
/// assert_eq!(store.to_file_path().unwrap(), std::path::PathBuf::from("/srv/nilai"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Create a store URL from a `file://` URL or a filesystem path.
    ///
    /// # Errors
    ///
    /// Returns an error for non-`file` schemes, `file://` URLs without a
    /// path, or paths that cannot be made absolute.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();

        if s.trim().is_empty() {
            return Err(Self::invalid(s, "must not be empty"));
        }

        if !s.contains("://") {
            return Self::from_path(s);
        }

        let url = Url::parse(s).map_err(|e| Self::invalid(s, &e.to_string()))?;

        if url.scheme() != "file" {
            return Err(Self::invalid(s, "only file:// stores are supported"));
        }

        if url.path().is_empty() || url.path() == "/" {
            return Err(Self::invalid(s, "file:// URL must have a path"));
        }

        Ok(Self(url))
    }

    /// Create a store URL from a filesystem path, resolving relative paths
    /// against the current directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let absolute =
            std::path::absolute(path).map_err(|e| Self::invalid(&display, &e.to_string()))?;

        Url::from_directory_path(&absolute)
            .map(Self)
            .map_err(|_| Self::invalid(&display, "path cannot be expressed as a file:// URL"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the store root directory.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.0.to_file_path().ok()
    }

    fn invalid(value: &str, reason: &str) -> Error {
        InvalidInputError::StoreUrl {
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into()
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StoreUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
