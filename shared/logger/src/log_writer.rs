//! Dedicated log file writer thread.

use crate::error::{LoggingError, Result};
use crate::log_message::LogMessage;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::Receiver;

pub(crate) struct LogWriter {
    out: BufWriter<File>,
}

impl LogWriter {
    /// Opens (or creates) the log file in append mode.
    pub fn new(log_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    fn write_message(&mut self, message: &LogMessage) {
        if let Err(e) = self.out.write_all(message.format().as_bytes()) {
            eprintln!("Error writing log: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            eprintln!("Error flushing log: {}", e);
        }
    }

    /// Blocks for the next message, then drains whatever else is already
    /// queued before flushing once. Returns when every sender is gone.
    pub fn run(mut self, receiver: Receiver<LogMessage>) {
        while let Ok(first) = receiver.recv() {
            self.write_message(&first);
            for message in receiver.try_iter() {
                self.write_message(&message);
            }
            self.flush();
        }
    }
}

/// Opens the log file and starts the `log-writer` thread.
pub(crate) fn spawn_writer_thread(log_path: &Path, receiver: Receiver<LogMessage>) -> Result<()> {
    let writer = LogWriter::new(log_path)?;
    std::thread::Builder::new()
        .name("log-writer".to_string())
        .spawn(move || writer.run(receiver))
        .map_err(|e| LoggingError::Spawn(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_level::LogLevel;
    use std::fs;
    use std::sync::mpsc::channel;
    use tempfile::tempdir;

    #[test]
    fn test_run_drains_batch_until_senders_drop() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("batch.log");
        let writer = LogWriter::new(&log_path).unwrap();
        let (sender, receiver) = channel();

        for i in 0..5 {
            sender
                .send(LogMessage::new(LogLevel::Info, None, format!("line {}", i)))
                .unwrap();
        }
        drop(sender);

        writer.run(receiver);

        let content = fs::read_to_string(log_path).unwrap();
        assert_eq!(content.lines().count(), 5);
        assert!(content.contains("line 4"));
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("missing").join("x.log");

        assert!(matches!(LogWriter::new(&log_path), Err(LoggingError::Io(_))));
    }
}
