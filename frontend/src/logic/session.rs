//! Viewer Session
//!
//! State machine behind the main window.
//!
//! ```text
//!            capture / upload              outcome (ok or error)
//!   Live ------------------------> Capturing -------------------> Frozen
//!    ^                                                              |
//!    +------------------------------ reset -------------------------+
//! ```
//!
//! While `Capturing` input is disabled: capture, upload and reset are
//! ignored and the view greys out the controls.

use capture::converters::map_viewport_point;
use capture::loader;
use capture::transform::apply_guarded;
use capture::{
    CaptureOutcome, CaptureSource, CaptureTask, FeedFrame, FeedPump,
    FrameTransform, Identity, Result, SourceId, SwitchOutcome, VideoFrame,
};
use logging::Logger;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// What the window is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Following the camera feed
    Live,
    /// A capture task is processing the frozen frame
    Capturing { task_id: u64 },
    /// Showing a processed capture or upload
    Frozen,
}

/// Things the UI should react to after a [`Session::poll`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The current frame was replaced
    FrameChanged,
    CaptureFinished { task_id: u64 },
    /// The capture hook failed; the frozen frame stays visible
    CaptureFailed(String),
    /// The preview hook failed on a feed frame. Reported once per failure run.
    PreviewHookFailed(String),
}

/// The two processing slots.
///
/// `preview` runs synchronously on every displayed feed frame and on
/// uploads, so it must be cheap. `capture` runs in a [`CaptureTask`].
#[derive(Clone)]
pub struct SessionHooks {
    pub preview: Arc<dyn FrameTransform>,
    pub capture: Arc<dyn FrameTransform>,
}

impl Default for SessionHooks {
    fn default() -> Self {
        SessionHooks {
            preview: Arc::new(Identity),
            capture: Arc::new(Identity),
        }
    }
}

pub struct Session {
    pump: FeedPump,
    feed: Receiver<FeedFrame>,
    outcomes_tx: Sender<CaptureOutcome>,
    outcomes: Receiver<CaptureOutcome>,
    hooks: SessionHooks,

    current: VideoFrame,
    frame_serial: u64,
    mode: Mode,
    next_task_id: u64,
    blank_size: (i32, i32),
    preview_failing: bool,

    logger: Logger,
}

impl Session {
    /// Creates a session showing a blank frame. Call [`start`](Self::start)
    /// to begin following the feed.
    ///
    /// # Errors
    /// `OpenCv` if the blank placeholder cannot be allocated.
    pub fn new(
        source: CaptureSource,
        hooks: SessionHooks,
        blank_size: (i32, i32),
        logger: &Logger,
    ) -> Result<Self> {
        let current = VideoFrame::blank(blank_size.0, blank_size.1)?;
        let (pump, feed) = FeedPump::with_channel(source, logger);
        let (outcomes_tx, outcomes) = channel();

        Ok(Session {
            pump,
            feed,
            outcomes_tx,
            outcomes,
            hooks,
            current,
            frame_serial: 0,
            mode: Mode::Live,
            next_task_id: 1,
            blank_size,
            preview_failing: false,
            logger: logger.for_component("Session"),
        })
    }

    /// Starts the feed and enters Live mode.
    pub fn start(&mut self) -> Result<()> {
        self.pump.start()?;
        self.mode = Mode::Live;
        self.logger.info(&format!(
            "[SESSION] Live on source {}",
            self.pump.active_source()
        ));
        Ok(())
    }

    /// Drains pending feed frames and capture outcomes.
    ///
    /// Only the newest acceptable feed frame is kept; older ones would be
    /// replaced before the next repaint anyway.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        let mut latest = None;
        while let Ok(feed) = self.feed.try_recv() {
            if self.mode == Mode::Live && self.pump.accepts(feed.generation) {
                latest = Some(feed.frame);
            }
        }
        if let Some(frame) = latest {
            self.show_feed_frame(frame, &mut events);
        }

        while let Ok(outcome) = self.outcomes.try_recv() {
            self.finish_capture(outcome, &mut events);
        }

        events
    }

    fn show_feed_frame(&mut self, frame: VideoFrame, events: &mut Vec<SessionEvent>) {
        match apply_guarded(self.hooks.preview.as_ref(), frame) {
            Ok(frame) => {
                self.preview_failing = false;
                self.set_current(frame);
                events.push(SessionEvent::FrameChanged);
            }
            Err(e) => {
                if !self.preview_failing {
                    self.logger
                        .warn(&format!("[FEED] Preview hook failed: {}", e));
                    events.push(SessionEvent::PreviewHookFailed(e.to_string()));
                }
                self.preview_failing = true;
            }
        }
    }

    fn finish_capture(&mut self, outcome: CaptureOutcome, events: &mut Vec<SessionEvent>) {
        let expected = match self.mode {
            Mode::Capturing { task_id } => task_id,
            _ => {
                self.logger.debug(&format!(
                    "[CAPTURE] Ignoring outcome of task {} (not capturing)",
                    outcome.task_id
                ));
                return;
            }
        };
        if outcome.task_id != expected {
            self.logger.debug(&format!(
                "[CAPTURE] Ignoring stale outcome of task {} (waiting for {})",
                outcome.task_id, expected
            ));
            return;
        }

        self.mode = Mode::Frozen;
        match outcome.result {
            Ok(frame) => {
                self.set_current(frame);
                self.logger
                    .info(&format!("[CAPTURE] Capture {} displayed", expected));
                events.push(SessionEvent::FrameChanged);
                events.push(SessionEvent::CaptureFinished { task_id: expected });
            }
            Err(e) => {
                self.logger
                    .warn(&format!("[CAPTURE] Capture {} failed: {}", expected, e));
                events.push(SessionEvent::CaptureFailed(e.to_string()));
            }
        }
    }

    /// Freezes the current frame and processes it in a capture task.
    ///
    /// Ignored while another capture is running.
    pub fn capture(&mut self) -> Result<()> {
        if !self.input_enabled() {
            self.logger
                .debug("[CAPTURE] Capture ignored, input is disabled");
            return Ok(());
        }

        self.pump.stop();
        let frozen = self.current.clone();
        self.logger.debug(&format!(
            "[CAPTURE] Freezing frame read {:?} ago",
            frozen.timestamp().elapsed()
        ));
        self.begin_processing(frozen)
    }

    fn begin_processing(&mut self, frame: VideoFrame) -> Result<()> {
        let task = CaptureTask::new(
            self.next_task_id,
            frame,
            Arc::clone(&self.hooks.capture),
            &self.logger,
        );
        self.next_task_id += 1;
        self.mode = Mode::Capturing { task_id: task.id() };
        self.logger.info(&format!(
            "[CAPTURE] Capture {} started with '{}'",
            task.id(),
            self.hooks.capture.name()
        ));

        if let Err(e) = task.start(self.outcomes_tx.clone()) {
            self.mode = Mode::Frozen;
            return Err(e);
        }
        Ok(())
    }

    /// Shows a blank frame and resumes the live feed.
    ///
    /// Ignored while a capture is running.
    pub fn reset(&mut self) -> Result<()> {
        if !self.input_enabled() {
            self.logger.debug("[SESSION] Reset ignored, input is disabled");
            return Ok(());
        }

        let blank = VideoFrame::blank(self.blank_size.0, self.blank_size.1)?;
        self.set_current(blank);
        self.mode = Mode::Live;
        self.logger.info("[SESSION] Reset to live feed");
        self.pump.start()
    }

    /// Switches the camera. `text` is a camera index or a URL.
    ///
    /// # Errors
    /// * `InvalidSource` - `text` is empty
    /// * `SourceUnavailable` - The source could not be opened; the previous
    ///   source keeps running
    pub fn change_source(&mut self, text: &str) -> Result<SwitchOutcome> {
        let source: SourceId = text.parse()?;
        self.pump.switch_to(source)
    }

    /// Shows an image from disk and processes it like a capture.
    ///
    /// The file is decoded before anything else changes, so a bad file
    /// leaves the session exactly as it was.
    pub fn upload(&mut self, path: &Path) -> Result<()> {
        if !self.input_enabled() {
            self.logger.debug("[SESSION] Upload ignored, input is disabled");
            return Ok(());
        }

        let image = loader::load_image(path)?;
        let image = apply_guarded(self.hooks.preview.as_ref(), image)?;
        self.logger.info(&format!(
            "[SESSION] Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        ));

        self.pump.stop();
        self.set_current(image.clone());
        self.begin_processing(image)
    }

    /// Maps a click inside the stretched viewport to frame coordinates.
    pub fn locate_click(&self, point: (f32, f32), viewport: (f32, f32)) -> Option<(i32, i32)> {
        let located = map_viewport_point(point, viewport, self.current.size());
        if let Some((x, y)) = located {
            self.logger.info(&format!(
                "[UI] Image clicked at ({}, {}) -> pixel ({}, {})",
                point.0, point.1, x, y
            ));
        }
        located
    }

    fn set_current(&mut self, frame: VideoFrame) {
        self.current = frame;
        self.frame_serial += 1;
    }

    pub fn current_frame(&self) -> &VideoFrame {
        &self.current
    }

    /// Bumped whenever the current frame is replaced
    pub fn frame_serial(&self) -> u64 {
        self.frame_serial
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input_enabled(&self) -> bool {
        !matches!(self.mode, Mode::Capturing { .. })
    }

    pub fn active_source(&self) -> &SourceId {
        self.pump.active_source()
    }

    pub fn source_connected(&self) -> bool {
        self.pump.is_connected()
    }

    pub fn feed_active(&self) -> bool {
        self.pump.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture::testing::{FakeOpener, fill_value, test_logger};
    use capture::CaptureError;
    use capture::transform::from_fn;
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    const WAIT: Duration = Duration::from_secs(5);
    const BLANK: (i32, i32) = (64, 48);

    struct Fixture {
        session: Session,
        opener: Arc<FakeOpener>,
        dir: TempDir,
    }

    fn fixture_with(hooks: SessionHooks) -> Fixture {
        let (logger, dir) = test_logger();
        let opener = FakeOpener::new();
        let source = CaptureSource::open(SourceId::Index(3), opener.clone(), logger.clone()).unwrap();
        let mut session = Session::new(source, hooks, BLANK, &logger).unwrap();
        session.start().unwrap();
        Fixture {
            session,
            opener,
            dir,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(SessionHooks::default())
    }

    /// Polls until an event matches, collecting everything seen
    fn poll_until(
        session: &mut Session,
        pred: impl Fn(&SessionEvent, &Session) -> bool,
    ) -> Vec<SessionEvent> {
        let deadline = Instant::now() + WAIT;
        let mut seen = Vec::new();
        while Instant::now() < deadline {
            for event in session.poll() {
                let done = pred(&event, session);
                seen.push(event);
                if done {
                    return seen;
                }
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("condition not reached, saw {:?}", seen);
    }

    fn wait_for_live_frame(session: &mut Session) {
        poll_until(session, |e, _| *e == SessionEvent::FrameChanged);
    }

    fn slow_hook(ms: u64) -> Arc<dyn FrameTransform> {
        Arc::new(from_fn("slow", move |frame| {
            thread::sleep(Duration::from_millis(ms));
            Ok(frame)
        }))
    }

    #[test]
    fn test_initial_frame_is_blank_placeholder() {
        let (logger, _dir) = test_logger();
        let source =
            CaptureSource::open(SourceId::Index(0), FakeOpener::new(), logger.clone()).unwrap();
        let session = Session::new(source, SessionHooks::default(), BLANK, &logger).unwrap();

        assert_eq!(session.current_frame().size(), BLANK);
        assert!(session.current_frame().is_blank());
        assert_eq!(session.mode(), Mode::Live);
        assert!(session.input_enabled());
    }

    #[test]
    fn test_live_feed_updates_current_frame() {
        let mut fx = fixture();

        wait_for_live_frame(&mut fx.session);

        assert_eq!(fx.session.current_frame().pixel_at(0, 0), Some([3, 3, 3]));
        assert!(fx.session.frame_serial() > 0);
    }

    #[test]
    fn test_preview_hook_applies_to_feed() {
        let preview = from_fn("paint", |frame: VideoFrame| {
            VideoFrame::filled(frame.width(), frame.height(), [9, 8, 7])
        });
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(preview),
            capture: Arc::new(Identity),
        });

        wait_for_live_frame(&mut fx.session);

        assert_eq!(fx.session.current_frame().pixel_at(1, 1), Some([9, 8, 7]));
    }

    #[test]
    fn test_failing_preview_hook_reported_once() {
        let preview = from_fn("broken", |_| Err(CaptureError::Transform("no".to_string())));
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(preview),
            capture: Arc::new(Identity),
        });

        poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::PreviewHookFailed(_))
        });
        thread::sleep(Duration::from_millis(50));

        let again = fx.session.poll();
        assert!(!again.iter().any(|e| matches!(e, SessionEvent::PreviewHookFailed(_))));
        assert!(fx.session.current_frame().is_blank());
    }

    #[test]
    fn test_identity_capture_shows_frozen_frame() {
        let mut fx = fixture();
        wait_for_live_frame(&mut fx.session);
        let frozen = fx.session.current_frame().clone();

        fx.session.capture().unwrap();
        assert!(!fx.session.input_enabled());
        assert!(!fx.session.feed_active());

        poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::CaptureFinished { .. })
        });

        assert_eq!(fx.session.mode(), Mode::Frozen);
        assert!(fx.session.input_enabled());
        assert_eq!(fx.session.current_frame(), &frozen);
    }

    #[test]
    fn test_capture_shows_transformed_frame() {
        let capture_hook = from_fn("brighten", |frame: VideoFrame| {
            let v = frame.pixel_at(0, 0).map_or(0, |px| px[0]) + 100;
            VideoFrame::filled(frame.width(), frame.height(), [v, v, v])
        });
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(Identity),
            capture: Arc::new(capture_hook),
        });
        wait_for_live_frame(&mut fx.session);

        fx.session.capture().unwrap();
        poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::CaptureFinished { .. })
        });

        assert_eq!(fx.session.current_frame().pixel_at(0, 0), Some([103, 103, 103]));
    }

    #[test]
    fn test_no_feed_frames_after_capture() {
        let mut fx = fixture();
        wait_for_live_frame(&mut fx.session);
        fx.session.capture().unwrap();
        poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::CaptureFinished { .. })
        });
        let serial = fx.session.frame_serial();

        let deadline = Instant::now() + Duration::from_millis(100);
        while Instant::now() < deadline {
            assert!(fx.session.poll().is_empty());
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(fx.session.frame_serial(), serial);
    }

    #[test]
    fn test_second_capture_while_busy_is_ignored() {
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(Identity),
            capture: slow_hook(150),
        });
        wait_for_live_frame(&mut fx.session);

        fx.session.capture().unwrap();
        let mode = fx.session.mode();
        let serial = fx.session.frame_serial();
        fx.session.capture().unwrap();
        fx.session.reset().unwrap();

        assert_eq!(fx.session.mode(), mode);
        assert_eq!(fx.session.mode(), Mode::Capturing { task_id: 1 });
        assert_eq!(fx.session.frame_serial(), serial);

        let events = poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::CaptureFinished { .. })
        });
        assert!(events.contains(&SessionEvent::CaptureFinished { task_id: 1 }));

        thread::sleep(Duration::from_millis(200));
        assert!(fx.session.poll().is_empty());
    }

    #[test]
    fn test_failed_capture_keeps_frozen_frame() {
        let failing = from_fn("reject", |_| Err(CaptureError::Transform("rejected".to_string())));
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(Identity),
            capture: Arc::new(failing),
        });
        wait_for_live_frame(&mut fx.session);
        let frozen = fx.session.current_frame().clone();

        fx.session.capture().unwrap();
        let events = poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::CaptureFailed(_))
        });

        assert!(events.contains(&SessionEvent::CaptureFailed(
            "Processing error: rejected".to_string()
        )));
        assert_eq!(fx.session.mode(), Mode::Frozen);
        assert!(fx.session.input_enabled());
        assert_eq!(fx.session.current_frame(), &frozen);
    }

    #[test]
    fn test_reset_blanks_and_resumes_feed() {
        let mut fx = fixture();
        wait_for_live_frame(&mut fx.session);
        fx.session.capture().unwrap();
        poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::CaptureFinished { .. })
        });

        fx.session.reset().unwrap();

        assert_eq!(fx.session.mode(), Mode::Live);
        assert_eq!(fx.session.current_frame().size(), BLANK);
        assert!(fx.session.current_frame().is_blank());
        assert!(fx.session.feed_active());

        wait_for_live_frame(&mut fx.session);
        assert_eq!(fx.session.current_frame().pixel_at(0, 0), Some([3, 3, 3]));
    }

    #[test]
    fn test_reset_while_live_keeps_feed_running() {
        let mut fx = fixture();
        wait_for_live_frame(&mut fx.session);

        fx.session.reset().unwrap();

        assert!(fx.session.current_frame().is_blank());
        assert!(fx.session.feed_active());
        assert_eq!(fx.session.mode(), Mode::Live);
    }

    #[test]
    fn test_change_source() {
        let mut fx = fixture();
        wait_for_live_frame(&mut fx.session);

        let outcome = fx.session.change_source(" 5 ").unwrap();

        assert_eq!(outcome, SwitchOutcome::Switched);
        assert_eq!(fx.session.active_source(), &SourceId::Index(5));
        poll_until(&mut fx.session, |e, s| {
            *e == SessionEvent::FrameChanged && s.current_frame().pixel_at(0, 0) == Some([5, 5, 5])
        });
    }

    #[test]
    fn test_change_to_url_source() {
        let mut fx = fixture();
        let url = "http://192.168.0.7:4747/video";

        fx.session.change_source(url).unwrap();

        let v = fill_value(&SourceId::Url(url.to_string()));
        poll_until(&mut fx.session, |e, s| {
            *e == SessionEvent::FrameChanged && s.current_frame().pixel_at(0, 0) == Some([v, v, v])
        });
    }

    #[test]
    fn test_change_source_failure_leaves_state() {
        let mut fx = fixture();
        fx.opener.refuse(SourceId::Index(4));
        wait_for_live_frame(&mut fx.session);

        let err = fx.session.change_source("4").unwrap_err();

        assert_eq!(err.to_string(), "unable to open video source: 4");
        assert_eq!(fx.session.mode(), Mode::Live);
        assert_eq!(fx.session.active_source(), &SourceId::Index(3));
        assert!(fx.session.feed_active());
    }

    #[test]
    fn test_change_source_empty_text() {
        let mut fx = fixture();
        assert!(matches!(
            fx.session.change_source("  "),
            Err(CaptureError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_change_to_same_source_is_noop() {
        let mut fx = fixture();
        assert_eq!(fx.session.change_source("3").unwrap(), SwitchOutcome::Unchanged);
    }

    fn write_ppm(dir: &TempDir, name: &str, rgb: [u8; 3]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut bytes = b"P6\n3 2\n255\n".to_vec();
        for _ in 0..6 {
            bytes.extend_from_slice(&rgb);
        }
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_upload_follows_capture_path() {
        let mut fx = fixture();
        wait_for_live_frame(&mut fx.session);
        let path = write_ppm(&fx.dir, "upload.ppm", [10, 20, 30]);

        fx.session.upload(&path).unwrap();

        assert!(!fx.session.input_enabled());
        assert!(!fx.session.feed_active());
        assert_eq!(fx.session.current_frame().size(), (3, 2));

        poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::CaptureFinished { .. })
        });
        assert_eq!(fx.session.mode(), Mode::Frozen);
        assert_eq!(fx.session.current_frame().pixel_at(2, 1), Some([30, 20, 10]));
    }

    #[test]
    fn test_upload_bad_file_changes_nothing() {
        let mut fx = fixture();
        wait_for_live_frame(&mut fx.session);
        let path = fx.dir.path().join("broken.png");
        fs::write(&path, b"nope").unwrap();
        let serial = fx.session.frame_serial();

        let err = fx.session.upload(&path).unwrap_err();

        assert!(matches!(err, CaptureError::Decode { .. }));
        assert_eq!(fx.session.mode(), Mode::Live);
        assert!(fx.session.feed_active());
        assert_eq!(fx.session.frame_serial(), serial);
    }

    #[test]
    fn test_panicking_preview_hook_is_reported() {
        let preview = from_fn("exploding", |_| panic!("preview blew up"));
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(preview),
            capture: Arc::new(Identity),
        });

        let events = poll_until(&mut fx.session, |e, _| {
            matches!(e, SessionEvent::PreviewHookFailed(_))
        });

        let reported = events.iter().any(|e| {
            matches!(e, SessionEvent::PreviewHookFailed(msg) if msg.contains("preview blew up"))
        });
        assert!(reported);
        assert!(fx.session.current_frame().is_blank());
        assert_eq!(fx.session.mode(), Mode::Live);
        assert!(fx.session.feed_active());
    }

    #[test]
    fn test_upload_with_panicking_preview_changes_nothing() {
        let preview = from_fn("exploding", |_| panic!("preview blew up"));
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(preview),
            capture: Arc::new(Identity),
        });
        let path = write_ppm(&fx.dir, "upload.ppm", [10, 20, 30]);
        let serial = fx.session.frame_serial();

        let err = fx.session.upload(&path).unwrap_err();

        assert!(matches!(err, CaptureError::Transform(_)));
        assert_eq!(fx.session.mode(), Mode::Live);
        assert!(fx.session.feed_active());
        assert_eq!(fx.session.frame_serial(), serial);
    }

    #[test]
    fn test_reset_does_not_wait_for_blocked_read() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        opener.slow(SourceId::Index(1), Duration::from_millis(1500));
        let source = CaptureSource::open(SourceId::Index(1), opener, logger.clone()).unwrap();
        let mut session = Session::new(source, SessionHooks::default(), BLANK, &logger).unwrap();
        session.start().unwrap();
        // Let the feed block inside its first read
        thread::sleep(Duration::from_millis(100));

        session.capture().unwrap();
        poll_until(&mut session, |e, _| {
            matches!(e, SessionEvent::CaptureFinished { .. })
        });

        let started = Instant::now();
        session.reset().unwrap();

        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(session.mode(), Mode::Live);
        assert!(session.feed_active());
    }

    #[test]
    fn test_upload_ignored_while_capturing() {
        let mut fx = fixture_with(SessionHooks {
            preview: Arc::new(Identity),
            capture: slow_hook(150),
        });
        wait_for_live_frame(&mut fx.session);
        let path = write_ppm(&fx.dir, "late.ppm", [1, 2, 3]);

        fx.session.capture().unwrap();
        let serial = fx.session.frame_serial();
        fx.session.upload(&path).unwrap();

        assert_eq!(fx.session.frame_serial(), serial);
        assert_eq!(fx.session.mode(), Mode::Capturing { task_id: 1 });
    }

    #[test]
    fn test_disconnected_start_recovers_after_change_source() {
        let (logger, _dir) = test_logger();
        let opener = FakeOpener::new();
        let source = CaptureSource::disconnected(SourceId::Index(2), opener, logger.clone());
        let mut session = Session::new(source, SessionHooks::default(), BLANK, &logger).unwrap();
        session.start().unwrap();

        assert!(!session.source_connected());
        assert_eq!(session.change_source("2").unwrap(), SwitchOutcome::Switched);
        assert!(session.source_connected());
        poll_until(&mut session, |e, _| *e == SessionEvent::FrameChanged);
    }

    #[test]
    fn test_locate_click_maps_through_stretch() {
        let fx = fixture();
        // Blank placeholder is 64x48, shown in a 640x480 viewport
        assert_eq!(
            fx.session.locate_click((320.0, 240.0), (640.0, 480.0)),
            Some((32, 24))
        );
        assert_eq!(fx.session.locate_click((700.0, 10.0), (640.0, 480.0)), None);
    }
}
