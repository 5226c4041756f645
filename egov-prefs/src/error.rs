//! Error types shared by the preference core.

use thiserror::Error;

/// Failures while reading or writing persisted preferences.
///
/// None of these ever reach the user; the manager logs them and falls back to
/// defaults or keeps the in-memory state.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored preferences must be a JSON object")]
    NotAnObject,
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Failures while loading a translation resource.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("translation resource has no `{0}` locale")]
    MissingDefault(String),
}
