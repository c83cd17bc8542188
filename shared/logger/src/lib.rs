//! Thread-safe asynchronous logging library.
//!
//! Every [`Logger`] clone, and every logger derived with
//! [`Logger::for_component`], feeds the same writer thread.

pub mod error;
mod log_level;
mod log_message;
mod log_writer;
mod logger;

pub use error::{LoggingError, Result};
pub use log_level::LogLevel;
pub use logger::Logger;
