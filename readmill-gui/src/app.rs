//! Application state and update loop.
//!
//! The window plays the part of the reader screen: it is active while focused.
//! Losing focus or closing the window pauses the screen, which saves the
//! preferences; regaining focus creates a fresh screen from storage.

use eframe::egui;
use tracing::{debug, error, info};

use readmill_core::{Database, ReaderScreen, Resources};

use crate::ui;

/// Main application state.
pub struct ReaderApp {
    /// Preference storage.
    pub db: Database,

    /// Valid font sizes and margins.
    pub resources: Resources,

    /// The reader screen and its preferences.
    pub screen: ReaderScreen,

    /// Whether the screen is currently active (window focused).
    active: bool,

    /// Status message.
    pub status_message: Option<(String, chrono::DateTime<chrono::Utc>)>,
}

impl ReaderApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing ReaderApp");

        let db = match Database::open() {
            Ok(db) => {
                if let Err(e) = db.migrate() {
                    error!("Failed to migrate database: {}", e);
                }
                db
            }
            Err(e) => {
                error!("Failed to open database: {}, preferences will not persist", e);
                let db = Database::open_in_memory().expect("Failed to create in-memory database");
                if let Err(e) = db.migrate() {
                    error!("Failed to migrate in-memory database: {}", e);
                }
                db
            }
        };

        let resources = match Resources::default_path() {
            Some(path) => Resources::load_or_default(&path),
            None => Resources::default(),
        };
        debug!(?resources, "Loaded resources");

        let screen = ReaderScreen::create(&db, &resources);
        ui::apply_visuals(&cc.egui_ctx, screen.preferences().is_night_mode());

        Self {
            db,
            resources,
            screen,
            active: true,
            status_message: None,
        }
    }

    /// Screen became inactive: save preferences.
    fn pause(&mut self) {
        self.active = false;
        if !self.screen.pause(&self.db) {
            self.set_status("Failed to save preferences");
        }
    }

    /// Screen became active again: re-read preferences from storage.
    fn resume(&mut self, ctx: &egui::Context) {
        self.active = true;
        self.screen = ReaderScreen::create(&self.db, &self.resources);
        ui::apply_visuals(ctx, self.screen.preferences().is_night_mode());
    }

    /// Save preferences on request, without leaving the screen.
    pub fn save_preferences(&mut self) {
        if self.screen.preferences().save(&self.db) {
            self.set_status("Preferences saved");
        } else {
            self.set_status("Failed to save preferences");
        }
    }

    pub fn change_font_size(&mut self, font_size: i32) {
        if !self.screen.preferences_mut().set_font_size(font_size) {
            self.set_status(&format!("Font size {} is not available", font_size));
        }
    }

    pub fn change_margin(&mut self, margin: i32) {
        if !self.screen.preferences_mut().set_margin(margin) {
            self.set_status(&format!("Margin {} is not available", margin));
        }
    }

    pub fn change_brightness(&mut self, brightness: f32) {
        if !self.screen.preferences_mut().set_brightness(brightness) {
            self.set_status("Brightness must be between 0 and 1");
        }
    }

    pub fn change_night_mode(&mut self, ctx: &egui::Context, night_mode: bool) {
        self.screen.preferences_mut().set_night_mode(night_mode);
        ui::apply_visuals(ctx, night_mode);
    }

    /// Set a status message.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), chrono::Utc::now()));
    }

    /// Clear old status messages.
    fn clear_old_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if chrono::Utc::now() - *time > chrono::Duration::seconds(5) {
                self.status_message = None;
            }
        }
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let focused = ctx.input(|i| i.focused);
        if focused != self.active {
            if focused {
                self.resume(ctx);
            } else {
                self.pause();
            }
        }

        self.clear_old_status();

        egui::TopBottomPanel::bottom("status_panel")
            .max_height(24.0)
            .show(ctx, |ui| {
                ui::status::render(self, ui);
            });

        egui::SidePanel::right("settings_panel")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui::settings::render(self, ui, ctx);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::page::render(self, ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.active {
            self.pause();
        }
    }
}
