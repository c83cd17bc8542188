//! Control Bar
//!
//! Capture, Upload Image, Reset and Change Source. All four are disabled
//! while a capture is being processed.

use crate::components::{ButtonVariant, styled_button};
use crate::events::UiCommand;
use egui::Vec2;

const BUTTON_SIZE: Vec2 = Vec2::new(150.0, 44.0);
const BUTTON_GAP: f32 = 12.0;

pub fn render_controls(ui: &mut egui::Ui, input_enabled: bool) -> Option<UiCommand> {
    let buttons = [
        ("📷 Capture", ButtonVariant::Primary, UiCommand::Capture),
        ("🖼 Upload Image", ButtonVariant::Secondary, UiCommand::UploadImage),
        ("↺ Reset", ButtonVariant::Danger, UiCommand::Reset),
        ("🎥 Change Source", ButtonVariant::Secondary, UiCommand::OpenSourcePrompt),
    ];
    let mut command = None;

    ui.horizontal(|ui| {
        let total = buttons.len() as f32 * BUTTON_SIZE.x + (buttons.len() - 1) as f32 * BUTTON_GAP;
        ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));

        for (label, variant, cmd) in buttons {
            if styled_button(ui, label, variant, BUTTON_SIZE, input_enabled).clicked() {
                command = Some(cmd);
            }
            ui.add_space(BUTTON_GAP);
        }
    });

    command
}
