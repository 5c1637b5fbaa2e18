//! ASCII renderer for converting raw frames to character grids.
//!
//! The pipeline has two steps:
//!
//! 1. **Downsampling** - average pixel brightness into a fixed-size grid
//! 2. **Character mapping** - map each cell's brightness onto the ramp
//!
//! Both steps are pure functions; the renderer touches no shared state and
//! does no I/O.

mod charset;
mod downsample;
mod frame;

pub use charset::{char_for_brightness, ramp_index, RAMP};
pub use downsample::{downsample, grid_dimensions, MAX_GRID_HEIGHT, MAX_GRID_WIDTH};
pub use frame::AsciiFrame;

use crate::decode::RawFrame;

/// Render a raw frame into an ASCII frame.
///
/// The output grid is at most [`MAX_GRID_WIDTH`] x [`MAX_GRID_HEIGHT`]
/// characters, smaller only when the source image is smaller than the grid.
/// Identical input always produces an identical frame.
pub fn render(raw: &RawFrame, invert: bool) -> AsciiFrame {
    if raw.width == 0 || raw.height == 0 {
        return AsciiFrame::from_chars(Vec::new(), 0, 0);
    }

    let (grid_w, grid_h) = grid_dimensions(raw.width, raw.height);
    let brightness = downsample(&raw.data, raw.width, raw.height, grid_w, grid_h);

    let chars = brightness
        .iter()
        .map(|&b| char_for_brightness(b, invert))
        .collect();

    AsciiFrame::from_chars(chars, grid_w, grid_h)
}
