//! Integration tests for the session lifecycle.
//!
//! These drive a full session with a fake frame source and a recording
//! display sink, covering the start/stop transitions, fatal start
//! failures, and the decode-render path end to end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use asciicam::ascii::{AsciiFrame, RAMP};
use asciicam::camera::{CameraError, FrameSize, FrameSource};
use asciicam::session::{ControlLabel, DisplaySink, Session, SessionState};

/// Fake frame source fed from a fixed compressed frame.
struct FakeSource {
    size: FrameSize,
    frame: Option<Vec<u8>>,
    reads: Arc<AtomicUsize>,
}

impl FrameSource for FakeSource {
    fn frame_size(&self) -> FrameSize {
        self.size
    }

    fn read_frame(&mut self) -> Result<Option<Vec<u8>>, CameraError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.frame.clone())
    }
}

/// Display sink that records everything the session writes.
#[derive(Default)]
struct RecordingDisplay {
    frames: Mutex<Vec<AsciiFrame>>,
    labels: Mutex<Vec<ControlLabel>>,
}

impl RecordingDisplay {
    fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    fn last_frame(&self) -> Option<AsciiFrame> {
        self.frames.lock().unwrap().last().cloned()
    }

    fn labels(&self) -> Vec<ControlLabel> {
        self.labels.lock().unwrap().clone()
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_frame(&self, frame: AsciiFrame) {
        self.frames.lock().unwrap().push(frame);
    }

    fn set_control_label(&self, label: ControlLabel) {
        self.labels.lock().unwrap().push(label);
    }
}

/// Encode a uniform gray PNG in memory, the shape of one compressed
/// webcam frame.
fn encode_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([value, value, value]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("png encode");
    buf
}

/// Poll until `predicate` holds or the timeout elapses.
fn wait_for(predicate: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    predicate()
}

#[test]
fn test_failed_open_leaves_session_idle() {
    let display = Arc::new(RecordingDisplay::default());
    let mut session = Session::new();

    let result = session.start(
        || Err(CameraError::NoDevices),
        display.clone(),
        false,
    );

    assert!(matches!(result, Err(CameraError::NoDevices)));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.frame_size().is_none());
    // No loop ran: nothing was rendered and the label never flipped to Stop.
    assert_eq!(display.frame_count(), 0);
    assert!(display.labels().is_empty());
}

#[test]
fn test_stop_immediately_after_start_with_no_frames() {
    let display = Arc::new(RecordingDisplay::default());
    let mut session = Session::new();
    let reads = Arc::new(AtomicUsize::new(0));

    let reads_handle = reads.clone();
    session
        .start(
            move || {
                Ok(Box::new(FakeSource {
                    size: FrameSize::new(4, 4),
                    frame: None,
                    reads: reads_handle,
                }) as Box<dyn FrameSource>)
            },
            display.clone(),
            false,
        )
        .expect("start");

    assert_eq!(session.state(), SessionState::Capturing);
    session.stop(display.as_ref());

    assert_eq!(session.state(), SessionState::Idle);
    // The source never produced a frame, so nothing ever reached a decode
    // call or the display.
    assert_eq!(display.frame_count(), 0);
    assert_eq!(display.labels(), vec![ControlLabel::Stop, ControlLabel::Start]);
}

#[test]
fn test_frames_flow_from_source_to_display() {
    let display = Arc::new(RecordingDisplay::default());
    let mut session = Session::new();
    let png = encode_png(4, 4, 255);

    session
        .start(
            move || {
                Ok(Box::new(FakeSource {
                    size: FrameSize::new(4, 4),
                    frame: Some(png),
                    reads: Arc::new(AtomicUsize::new(0)),
                }) as Box<dyn FrameSource>)
            },
            display.clone(),
            false,
        )
        .expect("start");

    assert_eq!(session.frame_size(), Some(FrameSize::new(4, 4)));
    assert!(
        wait_for(|| display.frame_count() > 0, Duration::from_secs(2)),
        "no frame reached the display"
    );

    let frame = display.last_frame().unwrap();
    assert_eq!(frame.width, 4);
    assert_eq!(frame.height, 4);
    // All-white source: every cell maps to the sparsest ramp character.
    let sparsest = RAMP[RAMP.len() - 1] as char;
    assert!(frame.chars.iter().all(|&c| c == sparsest));

    session.stop(display.as_ref());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(display.labels().last(), Some(&ControlLabel::Start));
}

#[test]
fn test_undecodable_frames_never_reach_display() {
    let display = Arc::new(RecordingDisplay::default());
    let mut session = Session::new();
    let reads = Arc::new(AtomicUsize::new(0));

    let reads_handle = reads.clone();
    session
        .start(
            move || {
                Ok(Box::new(FakeSource {
                    size: FrameSize::new(4, 4),
                    frame: Some(vec![0xab; 32]),
                    reads: reads_handle,
                }) as Box<dyn FrameSource>)
            },
            display.clone(),
            false,
        )
        .expect("start");

    // Give both loops time to run several cycles over the garbage frame.
    assert!(
        wait_for(|| reads.load(Ordering::SeqCst) > 5, Duration::from_secs(2)),
        "capture loop never ran"
    );
    std::thread::sleep(Duration::from_millis(150));

    session.stop(display.as_ref());
    // Every decode failed, so the display was never updated and no panic
    // tore the loops down early.
    assert_eq!(display.frame_count(), 0);
    assert_eq!(display.labels(), vec![ControlLabel::Stop, ControlLabel::Start]);
}

#[test]
fn test_session_can_restart_after_stop() {
    let display = Arc::new(RecordingDisplay::default());
    let mut session = Session::new();

    for _ in 0..2 {
        let png = encode_png(2, 2, 0);
        session
            .start(
                move || {
                    Ok(Box::new(FakeSource {
                        size: FrameSize::new(2, 2),
                        frame: Some(png),
                        reads: Arc::new(AtomicUsize::new(0)),
                    }) as Box<dyn FrameSource>)
                },
                display.clone(),
                false,
            )
            .expect("start");

        assert!(
            wait_for(|| display.frame_count() > 0, Duration::from_secs(2)),
            "no frame reached the display"
        );
        session.stop(display.as_ref());
        assert_eq!(session.state(), SessionState::Idle);

        display.frames.lock().unwrap().clear();
    }

    assert_eq!(
        display.labels(),
        vec![
            ControlLabel::Stop,
            ControlLabel::Start,
            ControlLabel::Stop,
            ControlLabel::Start,
        ]
    );
}
