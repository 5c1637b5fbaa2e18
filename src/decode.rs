//! Compressed frame decoding.
//!
//! Webcam frames arrive as individually compressed still images (MJPEG
//! frames are plain JPEGs). This module turns one such buffer into an RGBA
//! pixel buffer, delegating format detection and decompression to the
//! `image` crate.

use image::ImageError;

/// A decoded RGBA pixel buffer.
///
/// Invariant: `data.len() == width * height * 4`. Only the first three
/// bytes of each pixel carry meaning downstream (their mean is used as the
/// pixel's brightness), so exact channel order is irrelevant.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// RGBA pixel data, 4 bytes per pixel, row-major order
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

/// Errors that can occur while decoding a compressed frame.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame buffer was empty.
    #[error("empty frame buffer")]
    EmptyInput,
    /// The buffer could not be decoded (unknown format or corrupt data).
    #[error("failed to decode frame: {0}")]
    Decode(#[from] ImageError),
    /// The frame decoded to different dimensions than the capture session
    /// negotiated. The decoder never resamples, so this is a configuration
    /// mismatch the caller must treat as a failed cycle.
    #[error("frame decoded to {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Decode one compressed frame into an RGBA buffer of the expected size.
///
/// The call is stateless; any failure leaves no partial output and the
/// caller should skip the current cycle.
///
/// # Arguments
/// * `data` - Compressed frame bytes (format auto-detected)
/// * `width` - Expected frame width in pixels
/// * `height` - Expected frame height in pixels
///
/// # Errors
/// * [`DecodeError::EmptyInput`] for an empty buffer
/// * [`DecodeError::Decode`] when decompression fails
/// * [`DecodeError::SizeMismatch`] when the decoded dimensions differ from
///   the expected ones
pub fn decode_frame(data: &[u8], width: u32, height: u32) -> Result<RawFrame, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let image = image::load_from_memory(data)?;
    let rgba = image.to_rgba8();
    let (actual_width, actual_height) = rgba.dimensions();

    if actual_width != width || actual_height != height {
        return Err(DecodeError::SizeMismatch {
            expected_width: width,
            expected_height: height,
            actual_width,
            actual_height,
        });
    }

    Ok(RawFrame {
        data: rgba.into_raw(),
        width,
        height,
    })
}
