//! Internal log message structure.

use crate::log_level::LogLevel;
use chrono::Local;

/// One record queued for the writer thread.
#[derive(Debug, Clone)]
pub(crate) struct LogMessage {
    pub timestamp: String,
    pub level: LogLevel,
    pub thread: String,
    pub component: Option<String>,
    pub message: String,
}

impl LogMessage {
    /// Creates a message stamped with the current time and calling thread.
    pub fn new(level: LogLevel, component: Option<String>, message: String) -> Self {
        let current = std::thread::current();
        let thread = current.name().unwrap_or("unnamed").to_string();

        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            level,
            thread,
            component,
            message,
        }
    }

    /// Formats the line written to the log file:
    /// `[timestamp] LEVEL [thread] [component]: message\n`
    pub fn format(&self) -> String {
        match &self.component {
            Some(component) => format!(
                "[{}] {} [{}] [{}]: {}\n",
                self.timestamp, self.level, self.thread, component, self.message
            ),
            None => format!(
                "[{}] {} [{}]: {}\n",
                self.timestamp, self.level, self.thread, self.message
            ),
        }
    }
}
