//! Status line under the controls.

use crate::logic::Mode;
use crate::pages::ViewerParams;
use egui::{Color32, RichText};

const MUTED: Color32 = Color32::from_rgb(148, 163, 184);

pub fn render_status_bar(ui: &mut egui::Ui, params: &ViewerParams) {
    let (mode_text, mode_color) = match params.mode {
        Mode::Live => ("● LIVE", Color32::from_rgb(34, 197, 94)),
        Mode::Capturing { .. } => ("● PROCESSING", Color32::from_rgb(245, 158, 11)),
        Mode::Frozen => ("● FROZEN", Color32::from_rgb(96, 165, 250)),
    };

    let source = if params.source_connected {
        format!("Source: {}", params.source)
    } else {
        format!("Source: {} (not connected)", params.source)
    };

    let (width, height) = params.frame_size;
    let click = match params.last_click {
        Some((x, y)) => format!("Last click: ({}, {})", x, y),
        None => "Last click: -".to_string(),
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new(mode_text).strong().color(mode_color));
        ui.separator();
        ui.label(RichText::new(source).color(MUTED));
        ui.separator();
        ui.label(RichText::new(format!("Frame: {}x{}", width, height)).color(MUTED));
        ui.separator();
        ui.label(RichText::new(click).color(MUTED));
    });
}
