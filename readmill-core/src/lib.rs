//! Readmill Core Library
//!
//! Display preferences for the Readmill reader:
//!
//! - Validated user preferences (font size, margin, brightness, night mode)
//! - Namespaced key-value storage in SQLite
//! - Integer-array resources holding the valid font sizes and margins
//! - Reader screen lifecycle (load on create, save on pause)

pub mod db;
pub mod preferences;
pub mod reader;
pub mod resources;

pub use db::Database;
pub use preferences::{
    PreferenceStore, PreferenceStoreError, PreferenceValue, UserPreferences, DEFAULT_BRIGHTNESS,
    DEFAULT_FONT_SIZE, DEFAULT_MARGIN, DEFAULT_NIGHT_MODE, USER_PREFERENCES,
};
pub use reader::ReaderScreen;
pub use resources::{IntArray, Resources, WhitelistSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
