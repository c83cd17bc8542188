//! Viewer Page
//!
//! The single page of the application: the image area, the control bar and
//! a status line.

mod components;

use crate::events::UiCommand;
use crate::logic::Mode;
use capture::SourceId;
use egui::{TextureHandle, Vec2};

/// Everything the viewer needs to draw one frame
pub struct ViewerParams<'a> {
    pub texture: Option<&'a TextureHandle>,
    pub viewport: Vec2,
    pub mode: Mode,
    pub input_enabled: bool,
    pub source: &'a SourceId,
    pub source_connected: bool,
    pub frame_size: (i32, i32),
    pub last_click: Option<(i32, i32)>,
}

pub struct Viewer;

impl Viewer {
    pub fn show(ui: &mut egui::Ui, params: ViewerParams) -> Option<UiCommand> {
        let mut command = None;
        let processing = matches!(params.mode, Mode::Capturing { .. });

        ui.vertical_centered(|ui| {
            ui.add_space(16.0);

            if let Some(cmd) =
                components::render_image_area(ui, params.texture, params.viewport, processing)
            {
                command = Some(cmd);
            }

            ui.add_space(16.0);

            if let Some(cmd) = components::render_controls(ui, params.input_enabled) {
                command = Some(cmd);
            }

            ui.add_space(12.0);
            components::render_status_bar(ui, &params);
        });

        command
    }
}
