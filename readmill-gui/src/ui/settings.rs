//! Display settings panel.

use eframe::egui::{self, RichText, Rounding, Vec2};

use crate::app::ReaderApp;
use crate::ui::colors;

/// Render the settings panel.
///
/// Every change goes through the validated setters on the preferences.
pub fn render(app: &mut ReaderApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    let muted = colors::muted(ui.visuals());

    ui.spacing_mut().item_spacing = Vec2::new(8.0, 12.0);

    ui.heading("Display");
    ui.separator();

    let prefs = app.screen.preferences();
    let valid_font_sizes = prefs.valid_font_sizes().to_vec();
    let valid_margins = prefs.valid_margins().to_vec();
    let current_font_size = prefs.font_size();
    let current_margin = prefs.margin();
    let current_brightness = prefs.brightness();
    let current_night_mode = prefs.is_night_mode();

    // Font size
    let mut font_size = current_font_size;
    egui::ComboBox::from_label("Font size")
        .selected_text(format!("{} pt", font_size))
        .show_ui(ui, |ui| {
            for size in &valid_font_sizes {
                ui.selectable_value(&mut font_size, *size, format!("{} pt", size));
            }
        });
    if font_size != current_font_size {
        app.change_font_size(font_size);
    }

    // Margin
    let mut margin = current_margin;
    egui::ComboBox::from_label("Margin")
        .selected_text(format!("{} px", margin))
        .show_ui(ui, |ui| {
            for value in &valid_margins {
                ui.selectable_value(&mut margin, *value, format!("{} px", value));
            }
        });
    if margin != current_margin {
        app.change_margin(margin);
    }

    // Brightness
    let mut brightness = current_brightness;
    if ui
        .add(egui::Slider::new(&mut brightness, 0.0..=1.0).text("Brightness"))
        .changed()
    {
        app.change_brightness(brightness);
    }

    // Night mode
    let mut night_mode = current_night_mode;
    if ui.checkbox(&mut night_mode, "Night mode").changed() {
        app.change_night_mode(ctx, night_mode);
    }

    ui.add_space(16.0);
    ui.separator();

    if ui
        .add_sized(
            Vec2::new(100.0, 30.0),
            egui::Button::new(RichText::new("Save").strong()).rounding(Rounding::same(8.0)),
        )
        .clicked()
    {
        app.save_preferences();
    }

    ui.label(
        RichText::new("Preferences are also saved when the window loses focus or closes.")
            .size(11.0)
            .color(muted)
            .italics(),
    );
}
