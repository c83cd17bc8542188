//! Image Area
//!
//! Shows the current frame stretched to the fixed viewport and reports
//! clicks on it.

use super::placeholder::render_placeholder;
use crate::events::UiCommand;
use egui::{Align2, Color32, FontId, Sense, TextureHandle, Vec2};

pub fn render_image_area(
    ui: &mut egui::Ui,
    texture: Option<&TextureHandle>,
    viewport: Vec2,
    processing: bool,
) -> Option<UiCommand> {
    let Some(texture) = texture else {
        render_placeholder(ui, viewport, "No image");
        return None;
    };

    let response = ui.add(
        egui::Image::new((texture.id(), viewport))
            .fit_to_exact_size(viewport)
            .sense(Sense::click()),
    );

    if processing {
        let painter = ui.painter_at(response.rect);
        painter.rect_filled(response.rect, 0.0, Color32::from_black_alpha(160));
        painter.text(
            response.rect.center(),
            Align2::CENTER_CENTER,
            "Processing Image...",
            FontId::proportional(26.0),
            Color32::WHITE,
        );
    }

    if response.clicked()
        && let Some(pos) = response.interact_pointer_pos()
    {
        let local = pos - response.rect.min;
        return Some(UiCommand::ImageClicked {
            x: local.x,
            y: local.y,
        });
    }

    None
}
