//! Application State
//!
//! This module defines the main application state and initialization logic.
//!
//! # MVU Loop
//!
//! The `eframe::App::update()` implementation follows this flow:
//! 1. Drain session events (feed frames, capture results)
//! 2. Refresh the texture if the current frame changed
//! 3. Render the viewer and dialogs, collecting at most one UI command
//! 4. Handle the UI command
//! 5. Render the toast, if any

use crate::components::{ButtonVariant, Toast, show_modal, styled_button};
use crate::config::AppConfig;
use crate::events::UiCommand;
use crate::logic::{Mode, Session, SessionHooks};
use crate::pages::{Viewer, ViewerParams};
use capture::{CaptureSource, Identity, Mirror, OpenCvOpener};
use egui::{Color32, RichText, TextureHandle, Vec2};
use logging::Logger;
use std::sync::Arc;
use std::time::Duration;

/// Repaint interval while frames are arriving
const LIVE_REPAINT: Duration = Duration::from_millis(15);

const DIALOG_BUTTON: Vec2 = Vec2::new(120.0, 38.0);

/// Source prompt dialog state
pub(super) struct SourcePrompt {
    pub(super) input: String,
    /// Local camera indices offered as shortcuts
    pub(super) device_hints: Vec<u32>,
}

/// Main application state - MVU Controller
pub struct App {
    // Config
    pub(super) config: AppConfig,

    // Logger
    pub(super) logger: Logger,

    // Capture state
    pub(super) session: Session,

    // Rendering
    pub(super) texture: Option<TextureHandle>,
    pub(super) texture_serial: Option<u64>,
    pub(super) last_click: Option<(i32, i32)>,

    // Dialogs & notifications
    pub(super) source_prompt: Option<SourcePrompt>,
    pub(super) error_message: Option<String>,
    pub(super) current_toast: Option<Toast>,
}

impl App {
    /// Create a new App instance with configuration and logger
    pub fn new() -> Self {
        let loaded = AppConfig::load();
        let config = loaded.config;

        // Initialize logger from configuration
        let logger = match Logger::with_component(
            config.log_path.clone(),
            config.log_level,
            "App",
            config.log_to_console,
        ) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("Failed to initialize logger: {}", e);
                std::process::exit(1);
            }
        };

        logger.info("[APP] Initializing application...");
        match &loaded.source {
            Some(path) => logger.info(&format!(
                "[APP] Configuration loaded from {}",
                path.display()
            )),
            None => logger.info("[APP] No configuration file found, using defaults"),
        }
        for warning in &loaded.warnings {
            logger.warn(&format!("[APP] {}", warning));
        }

        let source_logger = logger.for_component("Source");
        let opener = Arc::new(OpenCvOpener::new(source_logger.clone()));
        let mut error_message = None;
        let source = match CaptureSource::open(
            config.default_source.clone(),
            opener.clone(),
            source_logger.clone(),
        ) {
            Ok(source) => source,
            Err(e) => {
                logger.warn(&format!("[APP] {}", e));
                error_message = Some(e.to_string());
                CaptureSource::disconnected(config.default_source.clone(), opener, source_logger)
            }
        };

        let hooks = SessionHooks {
            preview: if config.mirror_preview {
                Arc::new(Mirror)
            } else {
                Arc::new(Identity)
            },
            ..SessionHooks::default()
        };

        let mut session = match Session::new(source, hooks, config.viewport(), &logger) {
            Ok(session) => session,
            Err(e) => {
                logger.error(&format!("[APP] Failed to create session: {}", e));
                eprintln!("Failed to create session: {}", e);
                std::process::exit(1);
            }
        };

        if let Err(e) = session.start() {
            logger.error(&format!("[APP] Failed to start camera feed: {}", e));
            error_message = Some(e.to_string());
        }

        logger.info("[APP] Application initialized successfully");

        Self {
            config,
            logger,
            session,
            texture: None,
            texture_serial: None,
            last_click: None,
            source_prompt: None,
            error_message,
            current_toast: None,
        }
    }

    /// Viewport size in points
    pub(super) fn viewport(&self) -> Vec2 {
        Vec2::new(
            self.config.viewport_width as f32,
            self.config.viewport_height as f32,
        )
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- MVU UPDATE LOOP ---

        // 1. Session events from the feed and capture threads
        for event in self.session.poll() {
            self.handle_session_event(event);
        }

        // 2. Upload the frame if it changed
        self.refresh_texture(ctx);

        // 3. Keep polling while frames or results are expected
        if self.session.mode() != Mode::Frozen {
            ctx.request_repaint_after(LIVE_REPAINT);
        }

        // 4. Render the view and collect UI commands
        let ui_command = self.render_view(ctx);

        // 5. Process UI command (if any)
        if let Some(command) = ui_command {
            self.handle_ui_command(command);
        }

        // 6. Render toast notification (if any)
        self.render_toast(ctx);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.logger.info("[APP] Application shutting down...");
    }
}

impl App {
    /// Renders the viewer and any open dialog; returns the UI command, if any
    fn render_view(&mut self, ctx: &egui::Context) -> Option<UiCommand> {
        let mut ui_command = None;
        let modal_open = self.source_prompt.is_some() || self.error_message.is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            let params = ViewerParams {
                texture: self.texture.as_ref(),
                viewport: self.viewport(),
                mode: self.session.mode(),
                input_enabled: self.session.input_enabled() && !modal_open,
                source: self.session.active_source(),
                source_connected: self.session.source_connected(),
                frame_size: self.session.current_frame().size(),
                last_click: self.last_click,
            };
            ui_command = Viewer::show(ui, params);
        });

        if self.source_prompt.is_some() {
            ui_command = self.render_source_prompt(ctx).or(ui_command);
        }

        if self.error_message.is_some() {
            ui_command = self.render_error_dialog(ctx).or(ui_command);
        }

        ui_command
    }

    /// Renders the "Change Source" prompt
    fn render_source_prompt(&mut self, ctx: &egui::Context) -> Option<UiCommand> {
        let prompt = self.source_prompt.as_mut()?;

        show_modal(ctx, "source_prompt", Vec2::new(420.0, 210.0), |ui| {
            let mut command = None;

            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Change Source")
                        .size(20.0)
                        .strong()
                        .color(Color32::from_rgb(96, 165, 250)),
                );
                ui.add_space(12.0);
                ui.label("Enter Valid Url/Integer");
                ui.add_space(6.0);

                let response = ui.add_sized(
                    [360.0, 28.0],
                    egui::TextEdit::singleline(&mut prompt.input)
                        .hint_text("0 or rtsp://host/stream"),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    command = Some(UiCommand::SubmitSource(prompt.input.clone()));
                }

                ui.add_space(8.0);
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("Cameras:").color(Color32::GRAY));
                    for id in &prompt.device_hints {
                        if ui.small_button(id.to_string()).clicked() {
                            prompt.input = id.to_string();
                        }
                    }
                });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(80.0);
                    if styled_button(ui, "Apply", ButtonVariant::Primary, DIALOG_BUTTON, true)
                        .clicked()
                    {
                        command = Some(UiCommand::SubmitSource(prompt.input.clone()));
                    }
                    ui.add_space(12.0);
                    if styled_button(ui, "Cancel", ButtonVariant::Secondary, DIALOG_BUTTON, true)
                        .clicked()
                    {
                        command = Some(UiCommand::CancelSourcePrompt);
                    }
                });
            });

            command
        })
        .flatten()
    }

    /// Renders the modal error dialog
    fn render_error_dialog(&self, ctx: &egui::Context) -> Option<UiCommand> {
        let message = self.error_message.as_deref()?;

        show_modal(ctx, "error_dialog", Vec2::new(420.0, 150.0), |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Error")
                        .size(20.0)
                        .strong()
                        .color(Color32::from_rgb(239, 68, 68)),
                );
                ui.add_space(12.0);
                ui.label(
                    RichText::new(message)
                        .size(15.0)
                        .color(Color32::from_rgb(226, 232, 240)),
                );
                ui.add_space(20.0);

                styled_button(ui, "Close", ButtonVariant::Secondary, DIALOG_BUTTON, true)
                    .clicked()
                    .then_some(UiCommand::DismissError)
            })
            .inner
        })
        .flatten()
    }

    /// Renders a toast notification if one exists
    fn render_toast(&mut self, ctx: &egui::Context) {
        if let Some(toast) = &self.current_toast {
            if toast.show(ctx) {
                self.current_toast = None;
            } else {
                // Keep repainting so the toast expires while the feed is stopped
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }
    }

    /// Shows an error in the modal dialog
    pub(super) fn show_error(&mut self, message: String) {
        self.logger.warn(&format!("[UI] {}", message));
        self.error_message = Some(message);
    }

    pub(super) fn show_success(&mut self, message: String) {
        self.current_toast = Some(Toast::success(message));
    }

    pub(super) fn show_info(&mut self, message: String) {
        self.current_toast = Some(Toast::info(message));
    }

    pub(super) fn show_warning(&mut self, message: String) {
        self.current_toast = Some(Toast::warning(message));
    }
}
