//! Reusable UI components

mod button;
mod dialog;
mod toast;

pub use button::{ButtonVariant, styled_button};
pub use dialog::show_modal;
pub use toast::Toast;
