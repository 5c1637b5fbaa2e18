//! Camera access module.
//!
//! This module provides the camera side of the pipeline:
//! - Device enumeration via [`list_devices`]
//! - An open MJPEG stream via [`CaptureSession`]
//! - The [`FrameSource`] trait the capture loop consumes

mod device;
mod session;
mod source;
mod types;

pub use device::list_devices;
pub use session::CaptureSession;
pub use source::FrameSource;
pub use types::{CameraError, CameraInfo, FrameSize};
