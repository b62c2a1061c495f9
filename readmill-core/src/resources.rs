//! Bundled integer-array resources.
//!
//! The reader screen only offers font sizes and margins from these lists.
//! A JSON file can replace the built-in arrays.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identifies an integer-array resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntArray {
    ValidFontSizes,
    ValidMargins,
}

/// Source of the whitelists checked by the preference setters.
pub trait WhitelistSource {
    fn int_array(&self, id: IntArray) -> Vec<i32>;
}

/// Integer-array resources, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub valid_font_sizes: Vec<i32>,
    pub valid_margins: Vec<i32>,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            valid_font_sizes: vec![8, 10, 12, 14, 16, 18, 20, 24],
            valid_margins: vec![0, 5, 10, 15, 20, 30],
        }
    }
}

impl Resources {
    /// Default override location: `~/.config/readmill/resources.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("readmill").join("resources.json"))
    }

    /// Read resources from a JSON file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let resources: Self = serde_json::from_str(&content)?;
        Ok(resources)
    }

    /// Read resources from `path`, falling back to the built-in arrays.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No resource override, using built-in arrays");
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(resources) => resources,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read resources, using built-in arrays");
                Self::default()
            }
        }
    }
}

impl WhitelistSource for Resources {
    fn int_array(&self, id: IntArray) -> Vec<i32> {
        match id {
            IntArray::ValidFontSizes => self.valid_font_sizes.clone(),
            IntArray::ValidMargins => self.valid_margins.clone(),
        }
    }
}
