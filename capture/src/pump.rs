//! Feed Pump
//!
//! Runs the blocking camera read loop on a dedicated `camera-feed` thread and
//! forwards every frame to a single subscriber over a channel.
//!
//! # Lifecycle
//!
//! - While idle the pump owns the [`CaptureSource`] directly.
//! - [`FeedPump::start`] moves the source into the loop thread.
//! - [`FeedPump::stop`] only asks the loop to exit. A read that is already
//!   blocked finishes first, so one more frame may still arrive.
//! - The next `start` never waits for that read. A loop that has not exited
//!   yet is re-armed; one that has exited is joined and replaced.
//!
//! Every run gets a new generation number. The loop tags each frame with the
//! generation current when its read began, and the subscriber asks
//! [`FeedPump::accepts`] before using a frame, which filters out frames that
//! were read before a stop or a restart.

use crate::constants::feed::{ERROR_BACKOFF, LOG_INTERVAL, MISS_BACKOFF, THREAD_NAME};
use crate::error::{CaptureError, Result};
use crate::frame::VideoFrame;
use crate::source::{CaptureSource, DeviceOpener, PendingSwitch, SourceId, SwitchOutcome};
use logging::Logger;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, SendError, Sender, channel};
use std::thread::{self, JoinHandle};

/// Loop states. Only the loop moves `STOPPING` to `EXITED`; only the pump
/// moves `STOPPING` back to `RUNNING`.
const RUNNING: u8 = 0;
const STOPPING: u8 = 1;
const EXITED: u8 = 2;

/// A frame read by the feed loop
#[derive(Debug)]
pub struct FeedFrame {
    /// Run that produced the frame
    pub generation: u64,
    /// Source the frame was read from
    pub source: SourceId,
    pub frame: VideoFrame,
}

/// What the loop thread hands back when it exits
struct LoopState {
    source: CaptureSource,
    switches: Receiver<PendingSwitch>,
}

/// Shared between the pump and one loop thread
struct FeedControl {
    state: AtomicU8,
    generation: AtomicU64,
}

impl FeedControl {
    fn new(generation: u64) -> Self {
        FeedControl {
            state: AtomicU8::new(RUNNING),
            generation: AtomicU64::new(generation),
        }
    }

    fn state(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }

    /// Loop checkpoint: false once a stop request has been acknowledged.
    fn keep_running(&self) -> bool {
        match self
            .state
            .compare_exchange(STOPPING, EXITED, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => false,
            Err(current) => current == RUNNING,
        }
    }
}

struct FeedWorker {
    handle: JoinHandle<LoopState>,
    switches: Sender<PendingSwitch>,
    control: Arc<FeedControl>,
}

/// Background frame producer with a cooperative stop flag.
pub struct FeedPump {
    opener: Arc<dyn DeviceOpener>,
    /// Mirrors the source that is, or will be once queued switches land, active
    active: SourceId,
    connected: bool,
    idle: Option<CaptureSource>,
    worker: Option<FeedWorker>,
    generation: u64,
    frames: Sender<FeedFrame>,
    logger: Logger,
    source_logger: Logger,
}

impl FeedPump {
    /// Creates a stopped pump that will deliver frames to `frames`.
    pub fn new(source: CaptureSource, frames: Sender<FeedFrame>, logger: &Logger) -> Self {
        FeedPump {
            opener: source.opener(),
            active: source.active().clone(),
            connected: source.is_connected(),
            idle: Some(source),
            worker: None,
            generation: 0,
            frames,
            logger: logger.for_component("FeedPump"),
            source_logger: logger.for_component("Source"),
        }
    }

    /// Creates a stopped pump together with the receiving end of its feed.
    pub fn with_channel(source: CaptureSource, logger: &Logger) -> (Self, Receiver<FeedFrame>) {
        let (tx, rx) = channel();
        (Self::new(source, tx, logger), rx)
    }

    /// Starts the feed loop. Does nothing if it is already running.
    ///
    /// Never waits on a read still blocked from the previous run.
    ///
    /// # Errors
    /// * `SourceUnavailable` - The previous loop died and its source could
    ///   not be reopened
    /// * `Thread` - The loop thread could not be spawned
    pub fn start(&mut self) -> Result<()> {
        if self.is_active() {
            self.logger.debug("[FEED] Start requested but feed already running");
            return Ok(());
        }

        if self.rearm() {
            self.logger.info(&format!(
                "[FEED] Feed resumed on source {} (generation {})",
                self.active, self.generation
            ));
            return Ok(());
        }

        let source = match self.reclaim() {
            Some(source) => source,
            None if !self.connected => CaptureSource::disconnected(
                self.active.clone(),
                Arc::clone(&self.opener),
                self.source_logger.clone(),
            ),
            None => {
                self.logger.warn(&format!(
                    "[FEED] Reopening source {} after feed loop failure",
                    self.active
                ));
                CaptureSource::open(
                    self.active.clone(),
                    Arc::clone(&self.opener),
                    self.source_logger.clone(),
                )?
            }
        };

        self.generation += 1;
        let control = Arc::new(FeedControl::new(self.generation));

        let (switch_tx, switch_rx) = channel();
        let state = LoopState {
            source,
            switches: switch_rx,
        };
        let loop_control = Arc::clone(&control);
        let frames = self.frames.clone();
        let logger = self.logger.clone();

        let spawned = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || feed_loop(state, loop_control, frames, logger));

        match spawned {
            Ok(handle) => {
                self.worker = Some(FeedWorker {
                    handle,
                    switches: switch_tx,
                    control,
                });
                self.logger.info(&format!(
                    "[FEED] Feed started on source {} (generation {})",
                    self.active, self.generation
                ));
                Ok(())
            }
            Err(e) => {
                self.logger
                    .error(&format!("[FEED] Failed to spawn feed thread: {}", e));
                Err(CaptureError::Thread(format!(
                    "failed to spawn {}: {}",
                    THREAD_NAME, e
                )))
            }
        }
    }

    /// Asks the loop to exit at its next checkpoint. Never blocks.
    pub fn stop(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        let stopped = worker
            .control
            .state
            .compare_exchange(RUNNING, STOPPING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if stopped {
            self.logger.info(&format!(
                "[FEED] Feed stop requested (generation {})",
                self.generation
            ));
        }
    }

    /// True while the loop is running and has not been asked to stop
    pub fn is_active(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| {
            worker.control.state() == RUNNING && !worker.handle.is_finished()
        })
    }

    /// Whether a frame tagged with `generation` may still be displayed.
    pub fn accepts(&self, generation: u64) -> bool {
        self.is_active() && generation == self.generation
    }

    /// Current run number; 0 before the first start.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_source(&self) -> &SourceId {
        &self.active
    }

    /// False while the source could not be opened
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Switches the feed to `source`.
    ///
    /// The device is opened on the calling thread. While running, the loop
    /// installs it before its next read; while idle it is installed at once.
    ///
    /// # Errors
    /// `SourceUnavailable` when the device cannot be opened. The previous
    /// source stays active.
    pub fn switch_to(&mut self, source: SourceId) -> Result<SwitchOutcome> {
        if source == self.active && self.connected {
            self.logger
                .debug(&format!("[SOURCE] {} already active, nothing to do", source));
            return Ok(SwitchOutcome::Unchanged);
        }

        let pending = match PendingSwitch::open(self.opener.as_ref(), source.clone()) {
            Ok(pending) => pending,
            Err(e) => {
                self.logger.warn(&format!(
                    "[SOURCE] Switch to {} failed, keeping {}: {}",
                    source, self.active, e
                ));
                return Err(e);
            }
        };

        let undelivered = match (&mut self.idle, &self.worker) {
            (Some(idle), _) => {
                idle.commit(pending);
                None
            }
            (None, Some(worker)) => match worker.switches.send(pending) {
                Ok(()) => None,
                Err(SendError(pending)) => Some(pending),
            },
            (None, None) => Some(pending),
        };

        if let Some(pending) = undelivered {
            // The receiver only goes away with a panicked loop thread
            self.logger
                .warn("[SOURCE] Feed loop is gone, installing source directly");
            let source = match self.reclaim() {
                Some(mut source) => {
                    source.commit(pending);
                    source
                }
                None => CaptureSource::from_pending(
                    pending,
                    Arc::clone(&self.opener),
                    self.source_logger.clone(),
                ),
            };
            self.idle = Some(source);
        }

        self.logger.info(&format!(
            "[SOURCE] Source switched from {} to {}",
            self.active, source
        ));
        self.active = source;
        self.connected = true;
        Ok(SwitchOutcome::Switched)
    }

    /// Puts a stopped loop that has not exited yet back to work under a new
    /// generation. False if there is no such loop.
    fn rearm(&mut self) -> bool {
        let Some(worker) = &self.worker else {
            return false;
        };
        if worker.handle.is_finished() {
            return false;
        }

        let next = self.generation + 1;
        worker.control.generation.store(next, Ordering::Release);
        let resumed = worker
            .control
            .state
            .compare_exchange(STOPPING, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if resumed {
            self.generation = next;
        }
        resumed
    }

    /// Takes the source back from an idle pump or an exited loop thread.
    ///
    /// Only joins a loop that has finished or acknowledged its stop, so the
    /// join never waits on a camera read. Returns `None` if the thread
    /// panicked and took the source with it.
    fn reclaim(&mut self) -> Option<CaptureSource> {
        if let Some(source) = self.idle.take() {
            return Some(source);
        }

        let worker = self.worker.take()?;
        match worker.handle.join() {
            Ok(LoopState {
                mut source,
                switches,
            }) => {
                for pending in switches.try_iter() {
                    source.commit(pending);
                }
                Some(source)
            }
            Err(_) => {
                self.logger.error("[FEED] Feed loop thread panicked");
                None
            }
        }
    }
}

impl Drop for FeedPump {
    fn drop(&mut self) {
        // The loop thread releases the device itself once it sees the request.
        self.stop();
    }
}

fn feed_loop(
    mut state: LoopState,
    control: Arc<FeedControl>,
    frames: Sender<FeedFrame>,
    logger: Logger,
) -> LoopState {
    let mut delivered: u64 = 0;

    while control.keep_running() {
        // Tag with the run the read started in; a re-arm during the read
        // makes this frame stale. Switches queued before a re-arm are visible
        // once its generation is.
        let generation = control.generation.load(Ordering::Acquire);
        apply_switches(&mut state);

        match state.source.read_frame() {
            Ok(Some(frame)) => {
                let message = FeedFrame {
                    generation,
                    source: state.source.active().clone(),
                    frame,
                };
                if frames.send(message).is_err() {
                    logger.info("[FEED] Subscriber disconnected, ending feed");
                    control.state.store(EXITED, Ordering::Release);
                    break;
                }
                delivered += 1;
                if delivered % LOG_INTERVAL == 0 {
                    logger.debug(&format!(
                        "[FEED] {} frames delivered (generation {})",
                        delivered, generation
                    ));
                }
            }
            Ok(None) => thread::sleep(MISS_BACKOFF),
            Err(e) => {
                logger.debug(&format!("[FEED] Read error: {}", e));
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }

    apply_switches(&mut state);
    logger.info(&format!("[FEED] Feed loop exited after {} frames", delivered));
    state
}

fn apply_switches(state: &mut LoopState) {
    for pending in state.switches.try_iter() {
        state.source.commit(pending);
    }
}
