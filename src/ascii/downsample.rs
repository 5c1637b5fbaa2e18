//! Downsampling of raw pixel data into a brightness grid.

/// Maximum output width in characters.
pub const MAX_GRID_WIDTH: u16 = 59;
/// Maximum output height in characters.
pub const MAX_GRID_HEIGHT: u16 = 48;

/// Bytes per pixel in raw frame data (RGBA).
const BYTES_PER_PIXEL: usize = 4;

/// Compute the output grid dimensions for a source image.
///
/// The grid is capped at [`MAX_GRID_WIDTH`] x [`MAX_GRID_HEIGHT`] and never
/// has more cells per axis than the source has pixels, so a 1x1 image
/// produces a 1x1 grid.
pub fn grid_dimensions(img_width: u32, img_height: u32) -> (u16, u16) {
    let w = img_width.min(MAX_GRID_WIDTH as u32).max(1) as u16;
    let h = img_height.min(MAX_GRID_HEIGHT as u32).max(1) as u16;
    (w, h)
}

/// Downsample an RGBA pixel buffer to a brightness grid.
///
/// Each output cell covers `max(1, img_dim / grid_dim)` source pixels per
/// axis and holds the mean brightness of the pixels inside it, where a
/// pixel's brightness is the mean of its first three channel bytes. Pixels
/// that fall outside the source bounds (or past the end of a short buffer)
/// are skipped rather than counted as black; a cell with no contributing
/// pixels comes out as 0.
///
/// # Arguments
/// * `data` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `img_width` - Width of the source image in pixels
/// * `img_height` - Height of the source image in pixels
/// * `grid_width` - Output width in cells
/// * `grid_height` - Output height in cells
///
/// # Returns
/// A vector of brightness values (0-255), one per cell, in row-major order.
pub fn downsample(
    data: &[u8],
    img_width: u32,
    img_height: u32,
    grid_width: u16,
    grid_height: u16,
) -> Vec<u8> {
    if grid_width == 0 || grid_height == 0 || img_width == 0 || img_height == 0 {
        return Vec::new();
    }

    let img_w = img_width as usize;
    let img_h = img_height as usize;
    let cell_w = (img_w / grid_width as usize).max(1);
    let cell_h = (img_h / grid_height as usize).max(1);

    let mut result = Vec::with_capacity(grid_width as usize * grid_height as usize);

    for cy in 0..grid_height as usize {
        for cx in 0..grid_width as usize {
            let mut sum = 0u32;
            let mut count = 0u32;

            for dy in 0..cell_h {
                let py = cy * cell_h + dy;
                if py >= img_h {
                    continue;
                }
                for dx in 0..cell_w {
                    let px = cx * cell_w + dx;
                    if px >= img_w {
                        continue;
                    }
                    let idx = (py * img_w + px) * BYTES_PER_PIXEL;
                    if idx + 2 >= data.len() {
                        continue;
                    }
                    let r = data[idx] as u32;
                    let g = data[idx + 1] as u32;
                    let b = data[idx + 2] as u32;
                    sum += (r + g + b) / 3;
                    count += 1;
                }
            }

            result.push(if count > 0 { (sum / count) as u8 } else { 0 });
        }
    }

    result
}
