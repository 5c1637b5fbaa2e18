//! Frame source abstraction consumed by the capture loop.

use super::types::{CameraError, FrameSize};

/// A source of compressed video frames.
///
/// The capture loop only ever needs two operations from an open camera:
/// its negotiated dimensions and a blocking "next frame" read. Tests
/// substitute their own implementations for hardware.
pub trait FrameSource {
    /// Native frame dimensions negotiated with the device.
    fn frame_size(&self) -> FrameSize;

    /// Block until the next compressed frame is available.
    ///
    /// `Ok(None)` means nothing arrived this cycle; `Err` means the read
    /// failed. The caller skips the cycle in both cases and keeps looping.
    fn read_frame(&mut self) -> Result<Option<Vec<u8>>, CameraError>;
}
