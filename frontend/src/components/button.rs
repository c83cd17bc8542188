//! Filled buttons for the control bar and the dialogs.

use egui::{Color32, RichText, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn fill(self, enabled: bool) -> Color32 {
        let color = match self {
            ButtonVariant::Primary => Color32::from_rgb(59, 130, 246),
            ButtonVariant::Secondary => Color32::from_rgb(71, 85, 105),
            ButtonVariant::Danger => Color32::from_rgb(220, 38, 38),
        };
        if enabled { color } else { color.gamma_multiply(0.4) }
    }
}

/// Fixed-size button. A disabled one is dimmed and never reports clicks.
pub fn styled_button(
    ui: &mut egui::Ui,
    label: &str,
    variant: ButtonVariant,
    size: Vec2,
    enabled: bool,
) -> egui::Response {
    let text_size = if size.y >= 44.0 { 16.0 } else { 15.0 };
    let button = egui::Button::new(RichText::new(label).size(text_size).color(Color32::WHITE))
        .fill(variant.fill(enabled))
        .corner_radius(8.0)
        .min_size(size);

    ui.add_enabled(enabled, button)
}
