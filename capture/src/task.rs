//! One-shot capture processing.
//!
//! A [`CaptureTask`] takes ownership of a frozen frame, runs the capture hook
//! on its own thread and reports exactly one [`CaptureOutcome`].

use crate::error::{CaptureError, Result};
use crate::frame::VideoFrame;
use crate::transform::{FrameTransform, apply_guarded};
use logging::Logger;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Result of one capture task
#[derive(Debug)]
pub struct CaptureOutcome {
    pub task_id: u64,
    pub result: Result<VideoFrame>,
}

/// A frame waiting to be processed.
///
/// [`start`](CaptureTask::start) consumes the task, so it can only run once.
pub struct CaptureTask {
    id: u64,
    frame: VideoFrame,
    transform: Arc<dyn FrameTransform>,
    logger: Logger,
}

impl CaptureTask {
    pub fn new(
        id: u64,
        frame: VideoFrame,
        transform: Arc<dyn FrameTransform>,
        logger: &Logger,
    ) -> Self {
        CaptureTask {
            id,
            frame,
            transform,
            logger: logger.for_component("CaptureTask"),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Spawns `capture-task-{id}`, which sends its outcome to `results`.
    ///
    /// # Errors
    /// `Thread` if the OS refuses to spawn the thread. No outcome is sent.
    pub fn start(self, results: Sender<CaptureOutcome>) -> Result<JoinHandle<()>> {
        let name = format!("capture-task-{}", self.id);
        let logger = self.logger.clone();

        thread::Builder::new()
            .name(name.clone())
            .spawn(move || self.run(results))
            .map_err(|e| {
                logger.error(&format!("[CAPTURE] Failed to spawn {}: {}", name, e));
                CaptureError::Thread(format!("failed to spawn {}: {}", name, e))
            })
    }

    fn run(self, results: Sender<CaptureOutcome>) {
        let CaptureTask {
            id,
            frame,
            transform,
            logger,
        } = self;
        let started = Instant::now();
        logger.debug(&format!(
            "[CAPTURE] Task {} running '{}' on {}x{} frame",
            id,
            transform.name(),
            frame.width(),
            frame.height()
        ));

        let result = apply_guarded(transform.as_ref(), frame);

        match &result {
            Ok(_) => logger.info(&format!(
                "[CAPTURE] Task {} finished in {:?}",
                id,
                started.elapsed()
            )),
            Err(e) => logger.warn(&format!("[CAPTURE] Task {} failed: {}", id, e)),
        }

        if results.send(CaptureOutcome { task_id: id, result }).is_err() {
            logger.warn(&format!(
                "[CAPTURE] Task {} finished but nobody is listening",
                id
            ));
        }
    }
}
