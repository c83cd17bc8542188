//! Viewer UI Components

mod controls;
mod image_area;
mod placeholder;
mod status_bar;

pub use controls::render_controls;
pub use image_area::render_image_area;
pub use status_bar::render_status_bar;
