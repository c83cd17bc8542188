//! Shown in place of the image when no texture could be built.

use egui::{Color32, FontId, RichText, Vec2};

pub(super) fn render_placeholder(ui: &mut egui::Ui, size: Vec2, text: &str) {
    egui::Frame::new()
        .fill(Color32::from_rgb(45, 55, 72))
        .show(ui, |ui| {
            ui.set_min_size(size);
            ui.set_max_size(size);
            ui.vertical_centered(|ui| {
                ui.add_space(size.y / 2.0 - 12.0);
                ui.label(
                    RichText::new(text)
                        .font(FontId::proportional(20.0))
                        .color(Color32::GRAY),
                );
            });
        });
}
