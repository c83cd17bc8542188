//! Logic Module
//!
//! UI-toolkit independent state of the viewer. The [`Session`] owns the
//! current frame, the feed pump and the capture task results; the app layer
//! only renders it and forwards user actions.

mod session;
pub mod utils;

pub use session::{Mode, Session, SessionEvent, SessionHooks};
