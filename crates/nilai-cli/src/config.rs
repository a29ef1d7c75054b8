//! Persisted CLI configuration and store resolution.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nilai_core::{DEFAULT_COLLECTION, StoreUrl};
use nilai_file::FileGradeStore;

use crate::cli::StoreArgs;

/// Stored configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "nilai").context("Could not determine config directory")
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

/// Store used when nothing is configured.
fn default_store_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("store"))
}

/// Load the config, or defaults if none was saved.
pub fn load() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let json = fs::read_to_string(&path).context("Failed to read config file")?;
    serde_json::from_str(&json).context("Invalid config file")
}

/// Save the config to disk.
pub fn save(config: &Config) -> Result<PathBuf> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json).context("Failed to write config file")?;

    Ok(path)
}

/// The store location and collection after applying precedence:
/// flag or environment, then config file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub store: StoreUrl,
    pub collection: String,
}

pub fn resolve(args: &StoreArgs) -> Result<Resolved> {
    let config = load()?;

    let store = match args.store.as_ref().or(config.store.as_ref()) {
        Some(s) => StoreUrl::new(s).context("Invalid store location")?,
        None => StoreUrl::from_path(default_store_dir()?).context("Invalid default store")?,
    };

    let collection = args
        .collection
        .clone()
        .or(config.collection)
        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

    debug!(%store, %collection, "Resolved store");

    Ok(Resolved { store, collection })
}

/// Open the resolved grade store.
pub fn open_store(args: &StoreArgs) -> Result<FileGradeStore> {
    let resolved = resolve(args)?;
    FileGradeStore::open(resolved.store, resolved.collection).context("Failed to open store")
}
