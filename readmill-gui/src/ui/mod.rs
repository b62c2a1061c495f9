//! UI components for Readmill.

pub mod page;
pub mod settings;
pub mod status;

use eframe::egui;

/// Switch between light visuals and the night-mode dark visuals.
pub fn apply_visuals(ctx: &egui::Context, night_mode: bool) {
    let visuals = if night_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    ctx.set_visuals(visuals);
}

// Theme-aware colors for the UI
pub mod colors {
    use eframe::egui::{Color32, Visuals};

    /// Error red
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

    /// Page background: warm paper by day, near-black at night
    pub fn page_bg(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(24, 24, 27)
        } else {
            Color32::from_rgb(250, 246, 236)
        }
    }

    /// Get primary text color based on theme
    pub fn text(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(229, 231, 235)
        } else {
            Color32::from_rgb(30, 30, 35)
        }
    }

    /// Get muted text color based on theme
    pub fn muted(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(156, 163, 175)
        } else {
            Color32::from_rgb(100, 100, 110)
        }
    }
}
