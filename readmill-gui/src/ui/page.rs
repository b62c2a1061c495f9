//! The reading page.

use eframe::egui::{self, RichText};

use crate::app::ReaderApp;
use crate::ui::colors;

const SAMPLE_TEXT: &str = "The lighthouse keeper kept two notebooks. In the first he wrote the \
weather, the passing ships and the hours the lamp burned. In the second he wrote everything \
else.\n\n\
On the long winter evenings he would read the second notebook aloud to the gulls on the rail, \
adjusting his spectacles and turning the pages slowly, as if the birds might ask him to go back \
and read a passage again.";

/// Render the page with the current display preferences.
pub fn render(app: &ReaderApp, ui: &mut egui::Ui) {
    let prefs = app.screen.preferences();
    let visuals = ui.visuals().clone();

    // Brightness dims the text toward the page background.
    let text_color = colors::text(&visuals).gamma_multiply(prefs.brightness().max(0.1));

    egui::Frame::none()
        .fill(colors::page_bg(&visuals))
        .inner_margin(egui::Margin::same(prefs.margin() as f32))
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(SAMPLE_TEXT)
                            .size(prefs.font_size() as f32)
                            .color(text_color),
                    );
                });
        });
}
