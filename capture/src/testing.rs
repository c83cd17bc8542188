//! Fake camera backend for tests.
//!
//! Enabled for this crate's own tests and, through the `test-support`
//! feature, for dependants that need a camera without hardware. Every frame
//! from a source is filled with [`fill_value`] of that source.

use crate::error::{CaptureError, Result};
use crate::frame::VideoFrame;
use crate::source::{DeviceOpener, SourceId, VideoDevice};
use logging::{LogLevel, Logger};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

pub const FAKE_WIDTH: i32 = 4;
pub const FAKE_HEIGHT: i32 = 4;

/// Delay of an ordinary fake read
const READ_DELAY: Duration = Duration::from_millis(2);

/// Debug-level logger writing into a fresh temporary directory.
///
/// Keep the directory alive for as long as the logger is used.
pub fn test_logger() -> (Logger, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::new(dir.path().join("test.log"), LogLevel::Debug).unwrap();
    (logger, dir)
}

/// Pixel value of every frame from `source`: N for camera N, 200 for a URL.
pub fn fill_value(source: &SourceId) -> u8 {
    match source {
        SourceId::Index(index) => *index as u8,
        SourceId::Url(_) => 200,
    }
}

#[derive(Default)]
struct Script {
    refused: HashSet<SourceId>,
    silent: HashSet<SourceId>,
    delays: HashMap<SourceId, Duration>,
    opens: HashMap<SourceId, usize>,
}

/// Opens scripted fake cameras and counts opens and live devices.
#[derive(Default)]
pub struct FakeOpener {
    script: Mutex<Script>,
    live: Arc<AtomicUsize>,
}

impl FakeOpener {
    pub fn new() -> Arc<Self> {
        Arc::new(FakeOpener::default())
    }

    /// Opening `source` fails with `SourceUnavailable`.
    pub fn refuse(&self, source: SourceId) {
        self.script().refused.insert(source);
    }

    /// Reads from `source` always miss.
    pub fn silence(&self, source: SourceId) {
        self.script().silent.insert(source);
    }

    /// Each read from `source` blocks for `delay`.
    pub fn slow(&self, source: SourceId, delay: Duration) {
        self.script().delays.insert(source, delay);
    }

    pub fn open_count(&self, source: &SourceId) -> usize {
        self.script().opens.get(source).copied().unwrap_or(0)
    }

    /// Successful opens across all sources
    pub fn opens(&self) -> usize {
        self.script().opens.values().sum()
    }

    /// Devices opened and not yet dropped
    pub fn live_devices(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceOpener for FakeOpener {
    fn open(&self, source: &SourceId) -> Result<Box<dyn VideoDevice>> {
        let mut script = self.script();
        if script.refused.contains(source) {
            return Err(CaptureError::SourceUnavailable(source.clone()));
        }
        *script.opens.entry(source.clone()).or_insert(0) += 1;
        self.live.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(FakeDevice {
            value: fill_value(source),
            silent: script.silent.contains(source),
            delay: script.delays.get(source).copied().unwrap_or(READ_DELAY),
            live: Arc::clone(&self.live),
        }))
    }
}

struct FakeDevice {
    value: u8,
    silent: bool,
    delay: Duration,
    live: Arc<AtomicUsize>,
}

impl VideoDevice for FakeDevice {
    fn read_frame(&mut self) -> Result<Option<VideoFrame>> {
        thread::sleep(self.delay);
        if self.silent {
            return Ok(None);
        }
        let v = self.value;
        VideoFrame::filled(FAKE_WIDTH, FAKE_HEIGHT, [v, v, v]).map(Some)
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
