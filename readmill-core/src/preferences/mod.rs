//! Reader display preferences.
//!
//! [`UserPreferences`] loads font size, margin, brightness and night mode from a
//! [`PreferenceStore`], validates every change against the whitelists it was
//! built with, and writes all four values back in a single commit.

mod store;

pub use store::{PreferenceStore, PreferenceStoreError, PreferenceValue};

use crate::resources::{IntArray, WhitelistSource};

/// Namespace all reader preferences are stored under.
pub const USER_PREFERENCES: &str = "user_preferences";
pub const FONT_SIZE: &str = "font_size";
pub const MARGIN: &str = "margin";
pub const BRIGHTNESS: &str = "brightness";
pub const NIGHT_MODE: &str = "night_mode";

pub const DEFAULT_FONT_SIZE: i32 = 12;
pub const DEFAULT_MARGIN: i32 = 10;
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;
pub const DEFAULT_NIGHT_MODE: bool = false;

/// Display settings of the reader screen.
#[derive(Debug, Clone)]
pub struct UserPreferences {
    font_size: i32,
    margin: i32,
    brightness: f32,
    night_mode: bool,
    valid_font_sizes: Box<[i32]>,
    valid_margins: Box<[i32]>,
}

impl UserPreferences {
    /// Load preferences, using defaults for any key that is missing or unreadable.
    ///
    /// Stored values are not checked against the whitelists, except that a
    /// brightness outside `0.0..=1.0` is replaced by the default.
    pub fn load<S, W>(store: &S, whitelist: &W) -> Self
    where
        S: PreferenceStore + ?Sized,
        W: WhitelistSource + ?Sized,
    {
        let font_size = read_or(store, FONT_SIZE, DEFAULT_FONT_SIZE, PreferenceValue::as_int);
        let margin = read_or(store, MARGIN, DEFAULT_MARGIN, PreferenceValue::as_int);
        let mut brightness =
            read_or(store, BRIGHTNESS, DEFAULT_BRIGHTNESS, PreferenceValue::as_float);
        let night_mode = read_or(store, NIGHT_MODE, DEFAULT_NIGHT_MODE, PreferenceValue::as_bool);

        if !is_valid_brightness(brightness) {
            tracing::warn!(brightness, "Stored brightness out of range, using default");
            brightness = DEFAULT_BRIGHTNESS;
        }

        let preferences = Self {
            font_size,
            margin,
            brightness,
            night_mode,
            valid_font_sizes: whitelist.int_array(IntArray::ValidFontSizes).into_boxed_slice(),
            valid_margins: whitelist.int_array(IntArray::ValidMargins).into_boxed_slice(),
        };
        tracing::debug!(?preferences, "Loaded user preferences");
        preferences
    }

    /// Persist all four values in one commit.
    ///
    /// Returns `false` if the commit failed; nothing is retried.
    pub fn save<S>(&self, store: &S) -> bool
    where
        S: PreferenceStore + ?Sized,
    {
        let entries = [
            (FONT_SIZE, PreferenceValue::Int(self.font_size)),
            (MARGIN, PreferenceValue::Int(self.margin)),
            (BRIGHTNESS, PreferenceValue::Float(self.brightness)),
            (NIGHT_MODE, PreferenceValue::Bool(self.night_mode)),
        ];

        match store.commit(USER_PREFERENCES, &entries) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to save user preferences");
                false
            }
        }
    }

    /// Set the font size if it is one of the valid sizes.
    ///
    /// Returns `false` and leaves the font size unchanged otherwise.
    pub fn set_font_size(&mut self, font_size: i32) -> bool {
        if self.valid_font_sizes.contains(&font_size) {
            self.font_size = font_size;
            true
        } else {
            false
        }
    }

    /// Set the margin if it is one of the valid margins.
    pub fn set_margin(&mut self, margin: i32) -> bool {
        if self.valid_margins.contains(&margin) {
            self.margin = margin;
            true
        } else {
            false
        }
    }

    /// Set the brightness if it lies in `0.0..=1.0`.
    pub fn set_brightness(&mut self, brightness: f32) -> bool {
        if is_valid_brightness(brightness) {
            self.brightness = brightness;
            true
        } else {
            false
        }
    }

    pub fn set_night_mode(&mut self, night_mode: bool) {
        self.night_mode = night_mode;
    }

    pub fn font_size(&self) -> i32 {
        self.font_size
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn is_night_mode(&self) -> bool {
        self.night_mode
    }

    pub fn valid_font_sizes(&self) -> &[i32] {
        &self.valid_font_sizes
    }

    pub fn valid_margins(&self) -> &[i32] {
        &self.valid_margins
    }
}

fn is_valid_brightness(brightness: f32) -> bool {
    (0.0..=1.0).contains(&brightness)
}

fn read_or<S, T>(
    store: &S,
    key: &str,
    default: T,
    extract: fn(&PreferenceValue) -> Option<T>,
) -> T
where
    S: PreferenceStore + ?Sized,
{
    match store.read(USER_PREFERENCES, key) {
        Ok(Some(value)) => extract(&value).unwrap_or_else(|| {
            tracing::warn!(key, ?value, "Stored preference has unexpected type, using default");
            default
        }),
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read preference, using default");
            default
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Resources;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// In-memory store that records every commit.
    #[derive(Default)]
    struct RecordingStore {
        values: RefCell<HashMap<(String, String), PreferenceValue>>,
        commits: RefCell<Vec<Vec<(String, PreferenceValue)>>>,
        fail_commits: Cell<bool>,
        fail_reads: Cell<bool>,
    }

    impl RecordingStore {
        fn with(entries: &[(&str, PreferenceValue)]) -> Self {
            let store = Self::default();
            for (key, value) in entries {
                store
                    .values
                    .borrow_mut()
                    .insert((USER_PREFERENCES.to_string(), key.to_string()), *value);
            }
            store
        }
    }

    impl PreferenceStore for RecordingStore {
        fn read(
            &self,
            namespace: &str,
            key: &str,
        ) -> Result<Option<PreferenceValue>, PreferenceStoreError> {
            if self.fail_reads.get() {
                return Err(PreferenceStoreError::Database(
                    rusqlite::Error::InvalidQuery,
                ));
            }
            Ok(self
                .values
                .borrow()
                .get(&(namespace.to_string(), key.to_string()))
                .copied())
        }

        fn commit(
            &self,
            namespace: &str,
            entries: &[(&str, PreferenceValue)],
        ) -> Result<(), PreferenceStoreError> {
            if self.fail_commits.get() {
                return Err(PreferenceStoreError::Database(
                    rusqlite::Error::InvalidQuery,
                ));
            }
            let mut values = self.values.borrow_mut();
            for (key, value) in entries {
                values.insert((namespace.to_string(), key.to_string()), *value);
            }
            self.commits.borrow_mut().push(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), *value))
                    .collect(),
            );
            Ok(())
        }
    }

    fn test_resources() -> Resources {
        Resources {
            valid_font_sizes: vec![10, 12, 14],
            valid_margins: vec![4, 6, 8],
        }
    }

    fn fresh_preferences() -> UserPreferences {
        UserPreferences::load(&RecordingStore::default(), &test_resources())
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_store_yields_defaults() {
        let prefs = fresh_preferences();

        assert_eq!(prefs.font_size(), 12);
        assert_eq!(prefs.margin(), 10);
        assert_eq!(prefs.brightness(), 1.0);
        assert!(!prefs.is_night_mode());
    }

    #[test]
    fn test_load_reads_stored_values() {
        let store = RecordingStore::with(&[
            (FONT_SIZE, PreferenceValue::Int(14)),
            (MARGIN, PreferenceValue::Int(6)),
            (BRIGHTNESS, PreferenceValue::Float(0.25)),
            (NIGHT_MODE, PreferenceValue::Bool(true)),
        ]);

        let prefs = UserPreferences::load(&store, &test_resources());

        assert_eq!(prefs.font_size(), 14);
        assert_eq!(prefs.margin(), 6);
        assert_eq!(prefs.brightness(), 0.25);
        assert!(prefs.is_night_mode());
    }

    #[test]
    fn test_load_fills_only_missing_keys_with_defaults() {
        let store = RecordingStore::with(&[(MARGIN, PreferenceValue::Int(8))]);

        let prefs = UserPreferences::load(&store, &test_resources());

        assert_eq!(prefs.font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(prefs.margin(), 8);
        assert_eq!(prefs.brightness(), DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn test_load_ignores_wrongly_typed_values() {
        let store = RecordingStore::with(&[
            (FONT_SIZE, PreferenceValue::Bool(true)),
            (NIGHT_MODE, PreferenceValue::Int(1)),
        ]);

        let prefs = UserPreferences::load(&store, &test_resources());

        assert_eq!(prefs.font_size(), DEFAULT_FONT_SIZE);
        assert!(!prefs.is_night_mode());
    }

    #[test]
    fn test_load_replaces_out_of_range_brightness() {
        let store = RecordingStore::with(&[(BRIGHTNESS, PreferenceValue::Float(3.0))]);
        let prefs = UserPreferences::load(&store, &test_resources());
        assert_eq!(prefs.brightness(), DEFAULT_BRIGHTNESS);

        let store = RecordingStore::with(&[(BRIGHTNESS, PreferenceValue::Float(f32::NAN))]);
        let prefs = UserPreferences::load(&store, &test_resources());
        assert_eq!(prefs.brightness(), DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn test_load_falls_back_to_defaults_on_read_error() {
        let store = RecordingStore::with(&[(FONT_SIZE, PreferenceValue::Int(14))]);
        store.fail_reads.set(true);

        let prefs = UserPreferences::load(&store, &test_resources());

        assert_eq!(prefs.font_size(), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_load_retains_whitelists() {
        let prefs = fresh_preferences();
        assert_eq!(prefs.valid_font_sizes(), &[10, 12, 14]);
        assert_eq!(prefs.valid_margins(), &[4, 6, 8]);
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    #[test]
    fn test_set_font_size() {
        let mut prefs = fresh_preferences();

        assert!(prefs.set_font_size(10));
        assert!(prefs.set_font_size(12));
        assert!(prefs.set_font_size(14));
        assert_eq!(prefs.font_size(), 14);

        assert!(!prefs.set_font_size(6));
        assert!(!prefs.set_font_size(11));
        assert!(!prefs.set_font_size(13));
        assert!(!prefs.set_font_size(16));
        assert_eq!(prefs.font_size(), 14);
    }

    #[test]
    fn test_set_margin() {
        let mut prefs = fresh_preferences();

        assert!(prefs.set_margin(4));
        assert!(prefs.set_margin(6));
        assert!(prefs.set_margin(8));
        assert_eq!(prefs.margin(), 8);

        assert!(!prefs.set_margin(7));
        assert!(!prefs.set_margin(10));
        assert_eq!(prefs.margin(), 8);
    }

    #[test]
    fn test_rejected_margin_keeps_loaded_default() {
        // The default margin is not in this whitelist; it stays until a valid value arrives.
        let mut prefs = fresh_preferences();
        assert!(!prefs.set_margin(10));
        assert_eq!(prefs.margin(), DEFAULT_MARGIN);
    }

    #[test]
    fn test_set_brightness() {
        let mut prefs = fresh_preferences();

        assert!(prefs.set_brightness(0.5));
        assert_eq!(prefs.brightness(), 0.5);

        assert!(!prefs.set_brightness(1.2));
        assert!(!prefs.set_brightness(-0.5));
        assert_eq!(prefs.brightness(), 0.5);
    }

    #[test]
    fn test_set_brightness_accepts_bounds_and_rejects_nan() {
        let mut prefs = fresh_preferences();

        assert!(prefs.set_brightness(0.0));
        assert_eq!(prefs.brightness(), 0.0);
        assert!(prefs.set_brightness(1.0));
        assert_eq!(prefs.brightness(), 1.0);

        assert!(!prefs.set_brightness(f32::NAN));
        assert!(!prefs.set_brightness(f32::INFINITY));
        assert_eq!(prefs.brightness(), 1.0);
    }

    #[test]
    fn test_set_night_mode() {
        let mut prefs = fresh_preferences();

        prefs.set_night_mode(true);
        assert!(prefs.is_night_mode());
        prefs.set_night_mode(true);
        assert!(prefs.is_night_mode());
        prefs.set_night_mode(false);
        assert!(!prefs.is_night_mode());
    }

    // -------------------------------------------------------------------------
    // Saving
    // -------------------------------------------------------------------------

    #[test]
    fn test_save_defaults_in_one_commit() {
        let store = RecordingStore::default();
        let prefs = UserPreferences::load(&store, &test_resources());

        assert!(prefs.save(&store));

        let commits = store.commits.borrow();
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0],
            vec![
                (FONT_SIZE.to_string(), PreferenceValue::Int(12)),
                (MARGIN.to_string(), PreferenceValue::Int(10)),
                (BRIGHTNESS.to_string(), PreferenceValue::Float(1.0)),
                (NIGHT_MODE.to_string(), PreferenceValue::Bool(false)),
            ]
        );
    }

    #[test]
    fn test_save_reports_commit_failure() {
        let store = RecordingStore::default();
        let prefs = UserPreferences::load(&store, &test_resources());
        store.fail_commits.set(true);

        assert!(!prefs.save(&store));
        assert!(store.commits.borrow().is_empty());
    }

    #[test]
    fn test_saved_values_are_loaded_by_next_instance() {
        let store = RecordingStore::default();
        let mut prefs = UserPreferences::load(&store, &test_resources());
        assert!(prefs.set_font_size(10));
        assert!(prefs.set_margin(4));
        assert!(prefs.set_brightness(0.75));
        prefs.set_night_mode(true);
        assert!(prefs.save(&store));

        let reloaded = UserPreferences::load(&store, &test_resources());
        assert_eq!(reloaded.font_size(), 10);
        assert_eq!(reloaded.margin(), 4);
        assert_eq!(reloaded.brightness(), 0.75);
        assert!(reloaded.is_night_mode());
    }

    #[test]
    fn test_save_to_database() {
        let tmp = tempfile::TempDir::new().unwrap();
        let db = crate::Database::open_at(tmp.path().join("prefs.db")).unwrap();
        db.migrate().unwrap();

        let mut prefs = UserPreferences::load(&db, &test_resources());
        assert!(prefs.set_font_size(14));
        assert!(prefs.save(&db));

        assert_eq!(
            db.read(USER_PREFERENCES, FONT_SIZE).unwrap(),
            Some(PreferenceValue::Int(14))
        );
        assert_eq!(
            db.list_preference_keys(USER_PREFERENCES).unwrap(),
            vec![BRIGHTNESS, FONT_SIZE, MARGIN, NIGHT_MODE]
        );
    }

    #[test]
    fn test_save_to_unmigrated_database_fails() {
        let db = crate::Database::open_in_memory().unwrap();
        let prefs = UserPreferences::load(&db, &test_resources());
        assert!(!prefs.save(&db));
    }
}
