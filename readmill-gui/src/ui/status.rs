//! Status bar at the bottom of the window.

use eframe::egui::{self, RichText};

use crate::app::ReaderApp;
use crate::ui::colors;

/// Render the status bar.
pub fn render(app: &ReaderApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.horizontal(|ui| {
        if let Some((msg, _)) = &app.status_message {
            let color = if msg.starts_with("Failed") || msg.contains("not available") {
                colors::ERROR
            } else {
                muted
            };
            ui.label(RichText::new(msg).size(11.0).color(color));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let prefs = app.screen.preferences();
            let mode = if prefs.is_night_mode() { "night" } else { "day" };
            ui.label(
                RichText::new(format!(
                    "{} pt | margin {} | {:.0}% | {}",
                    prefs.font_size(),
                    prefs.margin(),
                    prefs.brightness() * 100.0,
                    mode
                ))
                .size(11.0)
                .color(muted),
            );
        });
    });
}
