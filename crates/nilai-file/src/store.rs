//! Filesystem storage for grade documents.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use nilai_core::error::{Error, InvalidInputError, StoreError};
use nilai_core::{GradeRecord, NewGrade, RecordId, Result, ServerTimestamp, Snapshot};

fn map_io(err: std::io::Error) -> Error {
    StoreError::Io(err).into()
}

/// A grade document as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredGrade {
    pub nim: String,
    pub nama: String,
    pub mata_kuliah: String,
    pub nilai: f64,
    /// Assigned by the store at commit time.
    pub created_at: ServerTimestamp,
}

/// Filesystem-backed storage for one collection.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    collection: String,
}

impl FileStore {
    /// Create a file store for `collection` under the given root directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection name is not a safe directory name.
    pub fn new(root: impl AsRef<Path>, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        validate_collection(&collection)?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            collection,
        })
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Get the directory holding this collection's documents.
    pub(crate) fn collection_dir(&self) -> PathBuf {
        self.root.join("collections").join(&self.collection)
    }

    /// Lock file serializing writers across processes.
    ///
    /// Kept beside the collection directory so that locking does not wake
    /// live queries.
    fn lock_path(&self) -> PathBuf {
        self.root
            .join("collections")
            .join(format!("{}.lock", self.collection))
    }

    fn document_path(&self, id: &RecordId) -> PathBuf {
        self.collection_dir().join(format!("{}.json", id))
    }

    fn generate_id() -> Result<RecordId> {
        RecordId::new(Uuid::new_v4().simple().to_string())
    }

    /// Append a grade, assigning its id and server timestamp.
    ///
    /// The document is written to a temporary file and renamed into place
    /// while holding the collection lock, so readers never see partial JSON.
    /// Runs on the blocking pool.
    #[instrument(skip(self, grade), fields(collection = %self.collection))]
    pub async fn insert(&self, grade: &NewGrade) -> Result<RecordId> {
        let store = self.clone();
        let grade = grade.clone();

        let id = tokio::task::spawn_blocking(move || store.insert_locked(&grade))
            .await
            .map_err(|e| map_io(std::io::Error::other(e)))??;

        debug!(%id, "Inserted grade document");

        Ok(id)
    }

    fn insert_locked(&self, grade: &NewGrade) -> Result<RecordId> {
        let dir = self.collection_dir();
        fs::create_dir_all(&dir).map_err(map_io)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        lock_file.lock_exclusive().map_err(map_io)?;

        let id = Self::generate_id()?;
        let document = StoredGrade {
            nim: grade.nim.clone(),
            nama: grade.nama.clone(),
            mata_kuliah: grade.mata_kuliah.clone(),
            nilai: grade.nilai,
            created_at: ServerTimestamp::Resolved(Utc::now()),
        };

        let content = serde_json::to_string_pretty(&document).map_err(StoreError::from)?;

        let path = self.document_path(&id);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(map_io)?;
        fs::rename(&temp_path, &path).map_err(map_io)?;

        FileExt::unlock(&lock_file).map_err(map_io)?;

        Ok(id)
    }

    /// Read the whole collection, newest first.
    ///
    /// Documents that cannot be read or parsed are skipped. A collection
    /// that does not exist yet is empty.
    pub fn load(&self) -> Result<Snapshot> {
        let dir = self.collection_dir();

        if !dir.exists() {
            return Ok(Snapshot::default());
        }

        let mut entries: Vec<_> = fs::read_dir(&dir)
            .map_err(map_io)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();

        entries.sort();

        let mut records = Vec::with_capacity(entries.len());
        for path in &entries {
            match read_document(path) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable document"),
            }
        }

        Ok(Snapshot::ordered(records))
    }
}

fn validate_collection(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.starts_with('.') {
        Some("must not start with '.'")
    } else if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        Some("only ASCII letters, digits, '_', '-' and '.' are allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(InvalidInputError::Collection {
            value: name.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

fn read_document(path: &Path) -> Result<GradeRecord> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let id = RecordId::new(stem)?;

    let content = fs::read_to_string(path).map_err(map_io)?;
    let value: Value = serde_json::from_str(&content).map_err(StoreError::from)?;

    let Value::Object(fields) = value else {
        return Err(StoreError::Document {
            id: id.to_string(),
            reason: "document is not a JSON object".to_string(),
        }
        .into());
    };

    Ok(GradeRecord {
        nim: fields.get("nim").and_then(text_field),
        nama: fields.get("nama").and_then(string_field),
        mata_kuliah: fields.get("mata_kuliah").and_then(string_field),
        nilai: fields.get("nilai").and_then(Value::as_f64),
        created_at: fields
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|at| at.with_timezone(&Utc))
            .into(),
        id,
    })
}

fn string_field(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Student IDs written by other clients may be numeric.
fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
