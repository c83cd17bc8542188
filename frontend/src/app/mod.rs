//! Application Module - MVU Controller
//!
//! Coordinates the view (pages) and the capture session.
//!
//! # Structure
//!
//! - `state.rs`: Application state definition and MVU loop
//! - `ui_handler.rs`: Command dispatcher for UI actions
//! - `session_handler.rs`: Reacts to session events (texture, dialogs, toasts)
//!
//! # Communication Flow
//!
//! ```text
//! View (pages) --> UiCommand --> ui_handler --> Session (capture, reset, ...)
//!
//! camera-feed / capture-task threads --> Session::poll --> SessionEvent --> session_handler
//! ```

mod session_handler;
mod state;
mod ui_handler;

pub use state::App;
