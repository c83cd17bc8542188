//! The active video source and how it is replaced.

use super::{DeviceOpener, SourceId, VideoDevice};
use crate::error::Result;
use crate::frame::VideoFrame;
use logging::Logger;
use std::sync::Arc;

/// Result of a switch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The requested source was already active
    Unchanged,
    /// The new source is now active
    Switched,
}

/// A device that has been opened but not yet installed.
///
/// Lets the expensive open happen on one thread and the cheap swap on the
/// thread that owns the [`CaptureSource`].
pub struct PendingSwitch {
    source: SourceId,
    device: Box<dyn VideoDevice>,
}

impl PendingSwitch {
    pub fn open(opener: &dyn DeviceOpener, source: SourceId) -> Result<Self> {
        let device = opener.open(&source)?;
        Ok(PendingSwitch { source, device })
    }
}

/// Owns at most one opened video device.
///
/// A source that could not be opened at startup is kept *disconnected*: it
/// remembers the requested id and every read is a miss.
pub struct CaptureSource {
    active: SourceId,
    device: Option<Box<dyn VideoDevice>>,
    opener: Arc<dyn DeviceOpener>,
    logger: Logger,
}

impl CaptureSource {
    /// Opens `source`.
    ///
    /// # Errors
    /// `SourceUnavailable` when the device cannot be opened.
    pub fn open(source: SourceId, opener: Arc<dyn DeviceOpener>, logger: Logger) -> Result<Self> {
        let pending = PendingSwitch::open(opener.as_ref(), source)?;
        Ok(Self::from_pending(pending, opener, logger))
    }

    /// Builds a source around a device that is already open.
    pub fn from_pending(pending: PendingSwitch, opener: Arc<dyn DeviceOpener>, logger: Logger) -> Self {
        logger.info(&format!("[SOURCE] Active source is {}", pending.source));
        CaptureSource {
            active: pending.source,
            device: Some(pending.device),
            opener,
            logger,
        }
    }

    /// A source with no device behind it. Reads always miss until a
    /// successful switch.
    pub fn disconnected(source: SourceId, opener: Arc<dyn DeviceOpener>, logger: Logger) -> Self {
        logger.warn(&format!("[SOURCE] Source {} is not connected", source));
        CaptureSource {
            active: source,
            device: None,
            opener,
            logger,
        }
    }

    /// Replaces the active device with `source`.
    ///
    /// The new device is opened before the old one is dropped, so a failed
    /// switch leaves the previous source delivering.
    pub fn switch_to(&mut self, source: SourceId) -> Result<SwitchOutcome> {
        if source == self.active && self.is_connected() {
            self.logger
                .debug(&format!("[SOURCE] {} already active, nothing to do", source));
            return Ok(SwitchOutcome::Unchanged);
        }

        let pending = PendingSwitch::open(self.opener.as_ref(), source)?;
        self.commit(pending);
        Ok(SwitchOutcome::Switched)
    }

    /// Installs a device opened elsewhere. The old device is dropped here.
    pub fn commit(&mut self, pending: PendingSwitch) {
        let previous = std::mem::replace(&mut self.active, pending.source);
        self.device = Some(pending.device);
        self.logger.info(&format!(
            "[SOURCE] Switched from {} to {}",
            previous, self.active
        ));
    }

    /// Blocking read from the active device. `Ok(None)` is a miss.
    pub fn read_frame(&mut self) -> Result<Option<VideoFrame>> {
        match self.device.as_mut() {
            Some(device) => device.read_frame(),
            None => Ok(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.device.is_some()
    }

    pub fn active(&self) -> &SourceId {
        &self.active
    }

    /// The opener this source uses for switches
    pub fn opener(&self) -> Arc<dyn DeviceOpener> {
        Arc::clone(&self.opener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaptureError;
    use crate::testing::{FakeOpener, test_logger};

    #[test]
    fn test_open_reads_from_source() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        let mut source =
            CaptureSource::open(SourceId::Index(0), opener.clone(), logger).unwrap();

        let frame = source.read_frame().unwrap().unwrap();
        assert_eq!(frame.pixel_at(0, 0), Some([0, 0, 0]));
        assert_eq!(source.active(), &SourceId::Index(0));
    }

    #[test]
    fn test_open_unavailable() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        opener.refuse(SourceId::Index(7));

        let result = CaptureSource::open(SourceId::Index(7), opener, logger);
        assert!(matches!(
            result,
            Err(CaptureError::SourceUnavailable(SourceId::Index(7)))
        ));
    }

    #[test]
    fn test_switch_replaces_source() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        let mut source =
            CaptureSource::open(SourceId::Index(0), opener.clone(), logger).unwrap();

        let outcome = source.switch_to(SourceId::Index(1)).unwrap();
        assert_eq!(outcome, SwitchOutcome::Switched);
        assert_eq!(source.active(), &SourceId::Index(1));

        let frame = source.read_frame().unwrap().unwrap();
        assert_eq!(frame.pixel_at(0, 0), Some([1, 1, 1]));
    }

    #[test]
    fn test_switch_to_active_source_is_noop() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        let mut source =
            CaptureSource::open(SourceId::Index(0), opener.clone(), logger).unwrap();

        let outcome = source.switch_to(SourceId::Index(0)).unwrap();
        assert_eq!(outcome, SwitchOutcome::Unchanged);
        assert_eq!(opener.open_count(&SourceId::Index(0)), 1);
    }

    #[test]
    fn test_failed_switch_keeps_previous_source() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        opener.refuse(SourceId::Index(9));
        let mut source =
            CaptureSource::open(SourceId::Index(2), opener.clone(), logger).unwrap();

        let err = source.switch_to(SourceId::Index(9)).unwrap_err();
        assert_eq!(err.to_string(), "unable to open video source: 9");
        assert_eq!(source.active(), &SourceId::Index(2));

        let frame = source.read_frame().unwrap().unwrap();
        assert_eq!(frame.pixel_at(0, 0), Some([2, 2, 2]));
    }

    #[test]
    fn test_disconnected_source_misses_until_switched() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        let mut source = CaptureSource::disconnected(SourceId::Index(0), opener.clone(), logger);

        assert!(!source.is_connected());
        assert!(source.read_frame().unwrap().is_none());

        // Re-selecting the same id retries the open
        let outcome = source.switch_to(SourceId::Index(0)).unwrap();
        assert_eq!(outcome, SwitchOutcome::Switched);
        assert!(source.is_connected());
        assert!(source.read_frame().unwrap().is_some());
    }

    #[test]
    fn test_old_device_dropped_after_new_opens() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        let mut source =
            CaptureSource::open(SourceId::Index(0), opener.clone(), logger).unwrap();

        source.switch_to(SourceId::Index(3)).unwrap();
        assert_eq!(opener.live_devices(), 1);
    }
}
