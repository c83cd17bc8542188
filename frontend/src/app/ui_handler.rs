//! UI Command Handler
//!
//! Dispatches commands returned by the view to the session.

use super::state::{App, SourcePrompt};
use crate::events::UiCommand;
use capture::SwitchOutcome;
use capture::loader::supported_extensions;
use capture::source::detection::list_device_ids;

impl App {
    /// Dispatches UI commands to appropriate handlers
    pub(super) fn handle_ui_command(&mut self, command: UiCommand) {
        self.logger
            .debug(&format!("[UI] Handling command: {:?}", command));
        match command {
            UiCommand::Capture => self.handle_capture(),
            UiCommand::Reset => self.handle_reset(),
            UiCommand::UploadImage => self.handle_upload(),

            UiCommand::OpenSourcePrompt => self.handle_open_source_prompt(),
            UiCommand::SubmitSource(text) => self.handle_submit_source(text),
            UiCommand::CancelSourcePrompt => self.source_prompt = None,

            UiCommand::ImageClicked { x, y } => self.handle_image_clicked(x, y),

            UiCommand::DismissError => self.error_message = None,
        }
    }

    fn handle_capture(&mut self) {
        if let Err(e) = self.session.capture() {
            self.show_error(e.to_string());
        }
    }

    fn handle_reset(&mut self) {
        self.last_click = None;
        if let Err(e) = self.session.reset() {
            self.show_error(e.to_string());
        }
    }

    /// Opens the native picker in the home directory
    fn handle_upload(&mut self) {
        if !self.session.input_enabled() {
            return;
        }

        let mut dialog = rfd::FileDialog::new()
            .set_title("Upload Image")
            .add_filter("Images", supported_extensions());
        if let Some(home) = dirs::home_dir() {
            dialog = dialog.set_directory(home);
        }

        let Some(path) = dialog.pick_file() else {
            self.logger.debug("[UI] Upload cancelled");
            return;
        };

        self.logger
            .info(&format!("[UI] Uploading {}", path.display()));
        if let Err(e) = self.session.upload(&path) {
            self.show_error(e.to_string());
        }
    }

    fn handle_open_source_prompt(&mut self) {
        if !self.session.input_enabled() {
            return;
        }
        self.source_prompt = Some(SourcePrompt {
            input: self.session.active_source().to_string(),
            device_hints: list_device_ids(),
        });
    }

    fn handle_submit_source(&mut self, text: String) {
        self.source_prompt = None;

        match self.session.change_source(&text) {
            Ok(SwitchOutcome::Switched) => {
                let message = format!("Switched to source {}", self.session.active_source());
                self.logger.info(&format!("[SOURCE] {}", message));
                self.show_success(message);
            }
            Ok(SwitchOutcome::Unchanged) => {
                self.show_info(format!(
                    "Source {} is already active",
                    self.session.active_source()
                ));
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    fn handle_image_clicked(&mut self, x: f32, y: f32) {
        let viewport = self.viewport();
        self.last_click = self.session.locate_click((x, y), (viewport.x, viewport.y));
    }
}
