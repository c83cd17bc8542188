//! Display preparation: color order and viewport scaling.

mod rgb_converter;
mod scale;

pub use rgb_converter::frame_to_rgb;
pub use scale::{map_viewport_point, scale_to_viewport, to_display_rgb};
