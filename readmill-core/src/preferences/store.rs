//! Key-value storage abstraction for preferences.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceStoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A single typed preference value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PreferenceValue {
    Int(i32),
    Float(f32),
    Bool(bool),
}

impl PreferenceValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// Namespaced key-value storage.
pub trait PreferenceStore {
    /// Read one value. `Ok(None)` when the key was never written.
    fn read(&self, namespace: &str, key: &str)
        -> Result<Option<PreferenceValue>, PreferenceStoreError>;

    /// Write all entries atomically: either every entry lands or none does.
    fn commit(
        &self,
        namespace: &str,
        entries: &[(&str, PreferenceValue)],
    ) -> Result<(), PreferenceStoreError>;
}
