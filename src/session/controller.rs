//! Session lifecycle: start/stop, the capture loop, and the render loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::ascii;
use crate::camera::{CameraError, FrameSize, FrameSource};
use crate::decode::decode_frame;

use super::display::{ControlLabel, DisplaySink};
use super::slot::FrameSlot;

/// Delay between capture iterations, keeping the loop off a busy spin when
/// the device has nothing new.
const CAPTURE_IDLE_DELAY: Duration = Duration::from_millis(10);

/// Render cadence (~30Hz ceiling).
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Lifecycle state of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Starting,
    Capturing,
    Stopping,
}

/// Controls one capture session: a capture thread feeding the shared slot
/// and a render thread draining it into the display sink.
///
/// The controller owns the stop flag and both join handles; the capture
/// thread owns the camera (it opens the source itself and drops it when its
/// loop exits), so by the time [`Session::stop`] returns the device is
/// released.
pub struct Session {
    slot: Arc<FrameSlot>,
    stop: Arc<AtomicBool>,
    capture_thread: Option<JoinHandle<()>>,
    render_thread: Option<JoinHandle<()>>,
    state: SessionState,
    frame_size: Option<FrameSize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(FrameSlot::new()),
            stop: Arc::new(AtomicBool::new(false)),
            capture_thread: None,
            render_thread: None,
            state: SessionState::Idle,
            frame_size: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Negotiated frame dimensions of the running session, if any.
    pub fn frame_size(&self) -> Option<FrameSize> {
        self.frame_size
    }

    /// Start capturing.
    ///
    /// `open_source` runs on the capture thread and performs the full
    /// device acquisition (open, format negotiation, dimension discovery).
    /// The thread reports the negotiated dimensions back over a channel
    /// before entering its loop, and `start` blocks on that handshake: on
    /// failure the thread is joined, no render loop is spawned, and the
    /// session is Idle again when the error is returned.
    ///
    /// On success both loops are running, the control label reads "Stop",
    /// and the session is Capturing.
    ///
    /// # Errors
    /// Whatever `open_source` reports, or [`CameraError::StreamFailed`]
    /// when the capture thread dies before reporting.
    pub fn start<F>(
        &mut self,
        open_source: F,
        display: Arc<dyn DisplaySink>,
        invert: bool,
    ) -> Result<(), CameraError>
    where
        F: FnOnce() -> Result<Box<dyn FrameSource>, CameraError> + Send + 'static,
    {
        if self.state != SessionState::Idle {
            return Ok(());
        }

        self.state = SessionState::Starting;
        self.stop.store(false, Ordering::SeqCst);

        let (ready_tx, ready_rx) = mpsc::channel::<Result<FrameSize, CameraError>>();
        let slot = Arc::clone(&self.slot);
        let stop = Arc::clone(&self.stop);

        let handle = thread::spawn(move || {
            let source = match open_source() {
                Ok(source) => {
                    let _ = ready_tx.send(Ok(source.frame_size()));
                    source
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            run_capture_loop(source, slot, stop);
        });
        self.capture_thread = Some(handle);

        let frame_size = match ready_rx.recv() {
            Ok(Ok(size)) => size,
            Ok(Err(e)) => {
                self.abort_start();
                return Err(e);
            }
            Err(_) => {
                self.abort_start();
                return Err(CameraError::StreamFailed(
                    "capture thread terminated unexpectedly".to_string(),
                ));
            }
        };

        let slot = Arc::clone(&self.slot);
        let stop = Arc::clone(&self.stop);
        let render_display = Arc::clone(&display);
        self.render_thread = Some(thread::spawn(move || {
            run_render_loop(slot, stop, frame_size, render_display, invert);
        }));

        self.frame_size = Some(frame_size);
        self.state = SessionState::Capturing;
        display.set_control_label(ControlLabel::Stop);
        log::info!("session capturing at {}", frame_size);
        Ok(())
    }

    /// Stop capturing: signal both loops, join them, release the camera,
    /// and clear the slot. Safe to call in any state; a no-op when Idle.
    /// The control label flips back to "Start" once the joins complete.
    pub fn stop(&mut self, display: &dyn DisplaySink) {
        if self.state == SessionState::Idle {
            return;
        }

        self.state = SessionState::Stopping;
        self.stop.store(true, Ordering::SeqCst);

        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.render_thread.take() {
            let _ = handle.join();
        }

        self.slot.clear();
        self.frame_size = None;
        self.state = SessionState::Idle;
        display.set_control_label(ControlLabel::Start);
        log::info!("session stopped");
    }

    /// Roll a failed start back to Idle: the capture thread has already
    /// bailed (or is about to), so join it and reset.
    fn abort_start(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
        self.state = SessionState::Idle;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Threads must not outlive the controller; join without touching
        // any display.
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.render_thread.take() {
            let _ = handle.join();
        }
    }
}

/// Pull frames from the source and publish the latest into the slot until
/// the stop flag is observed. Read failures skip the iteration; the loop
/// never surfaces them.
fn run_capture_loop(
    mut source: Box<dyn FrameSource>,
    slot: Arc<FrameSlot>,
    stop: Arc<AtomicBool>,
) {
    while !stop.load(Ordering::Relaxed) {
        match source.read_frame() {
            Ok(Some(frame)) => slot.publish(frame),
            Ok(None) => {}
            Err(e) => log::debug!("frame read failed, skipping: {}", e),
        }
        thread::sleep(CAPTURE_IDLE_DELAY);
    }
    // Source (and with it the camera) is dropped here, before stop()'s
    // join returns.
}

/// Every ~33ms: snapshot the slot, decode, render, publish to the display.
/// An empty slot or a failed decode skips the cycle and leaves whatever the
/// display currently shows untouched.
fn run_render_loop(
    slot: Arc<FrameSlot>,
    stop: Arc<AtomicBool>,
    frame_size: FrameSize,
    display: Arc<dyn DisplaySink>,
    invert: bool,
) {
    while !stop.load(Ordering::Relaxed) {
        if let Some(compressed) = slot.snapshot() {
            match decode_frame(&compressed, frame_size.width, frame_size.height) {
                Ok(raw) => display.set_frame(ascii::render(&raw, invert)),
                Err(e) => log::debug!("decode failed, keeping previous frame: {}", e),
            }
        }
        thread::sleep(RENDER_INTERVAL);
    }
}
