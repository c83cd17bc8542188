//! Handles events produced by the capture session.

use super::state::App;
use crate::logic::SessionEvent;
use crate::logic::utils::frame_to_color_image;
use egui::TextureOptions;

impl App {
    pub(super) fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            // Picked up by refresh_texture through the frame serial
            SessionEvent::FrameChanged => {}
            SessionEvent::CaptureFinished { task_id } => {
                self.logger
                    .info(&format!("[CAPTURE] Capture {} ready", task_id));
                self.show_success("Capture ready".to_string());
            }
            SessionEvent::CaptureFailed(message) => self.show_error(message),
            SessionEvent::PreviewHookFailed(message) => {
                self.show_warning(format!("Preview failed: {}", message));
            }
        }
    }

    /// Re-uploads the current frame when the session replaced it
    pub(super) fn refresh_texture(&mut self, ctx: &egui::Context) {
        let serial = self.session.frame_serial();
        if self.texture_serial == Some(serial) {
            return;
        }

        let viewport = (
            self.config.viewport_width as i32,
            self.config.viewport_height as i32,
        );
        let image = match frame_to_color_image(self.session.current_frame(), viewport) {
            Ok(image) => image,
            Err(e) => {
                self.logger
                    .warn(&format!("[UI] Could not prepare frame for display: {}", e));
                self.texture_serial = Some(serial);
                return;
            }
        };

        if let Some(ref mut tex) = self.texture {
            tex.set(image, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("current_frame", image, TextureOptions::LINEAR));
        }
        self.texture_serial = Some(serial);
    }
}
