//! Capture session over a nokhwa camera negotiated to a compressed format.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use super::device::list_devices;
use super::source::FrameSource;
use super::types::{CameraError, FrameSize};

/// Resolution requested when negotiating the stream; the device may settle
/// on whatever it actually supports and the session reports that instead.
const REQUESTED_WIDTH: u32 = 640;
const REQUESTED_HEIGHT: u32 = 480;
const REQUESTED_FPS: u32 = 30;

/// An open camera delivering compressed (MJPEG) frames.
///
/// Owns the device handle for the lifetime of one capture session. The
/// stream is opened in [`CaptureSession::open`] and released on drop, so
/// every exit path gives the device back.
pub struct CaptureSession {
    camera: Camera,
    frame_size: FrameSize,
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("frame_size", &self.frame_size)
            .finish_non_exhaustive()
    }
}

impl CaptureSession {
    /// Open the camera at `device_index` and negotiate an MJPEG stream.
    ///
    /// Fails without opening a stream when the device does not exist, the
    /// camera cannot be opened, or it will not deliver MJPEG. The frames
    /// handed out by [`FrameSource::read_frame`] are the compressed bytes
    /// exactly as the device produced them.
    ///
    /// # Errors
    /// * [`CameraError::NoDevices`] when no camera is attached
    /// * [`CameraError::DeviceNotFound`] when the index is unknown
    /// * [`CameraError::PermissionDenied`] when access is denied
    /// * [`CameraError::NoCompressedFormat`] when MJPEG negotiation fails
    /// * [`CameraError::StreamFailed`] when the stream cannot start
    pub fn open(device_index: u32) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        if devices.is_empty() {
            return Err(CameraError::NoDevices);
        }
        if !devices.iter().any(|d| d.index == device_index) {
            return Err(CameraError::DeviceNotFound(device_index));
        }

        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(REQUESTED_WIDTH, REQUESTED_HEIGHT),
                FrameFormat::MJPEG,
                REQUESTED_FPS,
            ),
        ));

        let mut camera = Camera::new(CameraIndex::Index(device_index), requested)
            .map_err(map_open_error)?;

        // "Closest" may land on an uncompressed format; the decoder needs
        // compressed stills, so anything but MJPEG is a negotiation failure.
        let negotiated = camera.camera_format();
        if negotiated.format() != FrameFormat::MJPEG {
            return Err(CameraError::NoCompressedFormat(format!(
                "device negotiated {:?} instead",
                negotiated.format()
            )));
        }

        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        let resolution = camera.resolution();
        let frame_size = FrameSize::new(resolution.width(), resolution.height());

        log::info!(
            "camera {} open: {} MJPEG at {} fps",
            device_index,
            frame_size,
            camera.frame_rate()
        );

        Ok(Self { camera, frame_size })
    }
}

impl FrameSource for CaptureSession {
    fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    fn read_frame(&mut self) -> Result<Option<Vec<u8>>, CameraError> {
        match self.camera.frame() {
            Ok(buffer) => {
                let bytes = buffer.buffer();
                if bytes.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(bytes.to_vec()))
                }
            }
            Err(e) => Err(CameraError::ReadFailed(e.to_string())),
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        // Best-effort release; nothing to recover from here.
        let _ = self.camera.stop_stream();
    }
}

/// Classify a nokhwa open error, surfacing permission problems distinctly.
fn map_open_error(e: nokhwa::NokhwaError) -> CameraError {
    let msg = e.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
        CameraError::PermissionDenied
    } else {
        CameraError::OpenFailed(msg)
    }
}
