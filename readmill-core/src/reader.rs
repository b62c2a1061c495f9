//! Reader screen lifecycle.
//!
//! A screen owns one [`UserPreferences`] for as long as it is active. Pausing
//! the screen writes the preferences back; resuming builds a new screen that
//! re-reads storage.

use crate::preferences::{PreferenceStore, UserPreferences};
use crate::resources::WhitelistSource;

/// The active reader screen.
#[derive(Debug)]
pub struct ReaderScreen {
    preferences: UserPreferences,
}

impl ReaderScreen {
    /// Screen became active.
    pub fn create<S, W>(store: &S, whitelist: &W) -> Self
    where
        S: PreferenceStore + ?Sized,
        W: WhitelistSource + ?Sized,
    {
        tracing::info!("Reader screen created");
        Self {
            preferences: UserPreferences::load(store, whitelist),
        }
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut UserPreferences {
        &mut self.preferences
    }

    /// Screen became inactive. Returns whether the preferences were saved.
    pub fn pause<S>(&self, store: &S) -> bool
    where
        S: PreferenceStore + ?Sized,
    {
        let saved = self.preferences.save(store);
        if saved {
            tracing::info!("Reader screen paused, preferences saved");
        } else {
            tracing::warn!("Reader screen paused, preferences not saved");
        }
        saved
    }
}
