//! Centered modal window shared by the source prompt and the error dialog.

use egui::{Align2, Color32, Margin, Vec2};

/// Shows a title-less window of `size` in the middle of the screen and
/// returns what `content` produced this frame.
///
/// `id` must be unique among open windows.
pub fn show_modal<R>(
    ctx: &egui::Context,
    id: &str,
    size: Vec2,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> Option<R> {
    egui::Window::new(id)
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size(size)
        .frame(
            egui::Frame::new()
                .fill(Color32::from_rgb(30, 41, 59))
                .stroke(egui::Stroke::new(1.0, Color32::from_rgb(51, 65, 85)))
                .corner_radius(12.0)
                .inner_margin(Margin::same(20)),
        )
        .show(ctx, content)
        .and_then(|response| response.inner)
}
