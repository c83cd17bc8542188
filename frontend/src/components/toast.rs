//! Toast Component
//!
//! Short-lived, non-modal notices in the bottom-right corner.

use egui::Color32;
use std::time::{Duration, Instant};

const DEFAULT_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq)]
enum ToastKind {
    Success,
    Info,
    Warning,
}

impl ToastKind {
    fn accent(&self) -> Color32 {
        match self {
            ToastKind::Success => Color32::from_rgb(34, 197, 94),
            ToastKind::Info => Color32::from_rgb(96, 165, 250),
            ToastKind::Warning => Color32::from_rgb(245, 158, 11),
        }
    }
}

/// A notice that disappears on its own or when dismissed
#[derive(Clone, Debug)]
pub struct Toast {
    message: String,
    kind: ToastKind,
    created_at: Instant,
    lifetime: Duration,
}

impl Toast {
    fn new(message: String, kind: ToastKind) -> Self {
        Self {
            message,
            kind,
            created_at: Instant::now(),
            lifetime: DEFAULT_LIFETIME,
        }
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn warning(message: String) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.lifetime
    }

    /// Renders the toast. Returns true once it should be removed.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        if self.is_expired() {
            return true;
        }

        let mut dismissed = false;
        let accent = self.kind.accent();

        egui::Window::new("toast")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .fixed_size(egui::vec2(320.0, 48.0))
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(Color32::from_rgb(30, 41, 59))
                    .stroke(egui::Stroke::new(1.5, accent))
                    .corner_radius(8.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.message)
                            .size(14.0)
                            .color(Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(egui::Button::new("✕").fill(Color32::TRANSPARENT))
                            .clicked()
                        {
                            dismissed = true;
                        }
                    });
                });
            });

        // Keep repainting so expiry is noticed without user input
        ctx.request_repaint_after(Duration::from_millis(250));

        dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_toast_not_expired() {
        let toast = Toast::success("Saved".to_string());
        assert!(!toast.is_expired());
        assert_eq!(toast.message(), "Saved");
    }

    #[test]
    fn test_toast_expires() {
        let mut toast = Toast::info("Hi".to_string());
        toast.created_at = Instant::now() - Duration::from_secs(10);
        assert!(toast.is_expired());
    }
}
