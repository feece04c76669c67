//! Raster heatmap: a square RGB image with one solid block per cell.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use super::ramp::{heat_color, max_count, BLACK};
use crate::error::{GridError, Result};

/// Upper bound on the canvas side length in pixels.
pub const MAX_CANVAS_PX: u32 = 1024;

/// Pixel side length of one cell for an `n` x `n` grid.
///
/// Returns 0 when `n` is 0 or larger than [`MAX_CANVAS_PX`].
pub fn cell_px(n: usize) -> u32 {
    if n == 0 || n > MAX_CANVAS_PX as usize {
        return 0;
    }
    MAX_CANVAS_PX / n as u32
}

/// Render a square count matrix to an image.
///
/// The canvas is the largest multiple of `n` that fits in 1024 pixels.
/// Cells are filled on a white-to-red ramp relative to the largest count,
/// then 1-pixel black lines are drawn on every inner cell boundary.
pub fn render_image(counts: &[Vec<u64>]) -> Result<RgbImage> {
    let n = counts.len();
    let cell = cell_px(n);
    if cell == 0 {
        return Err(GridError::TooLargeToRender { size: n });
    }
    let side = n as u32 * cell;
    let max = max_count(counts);

    let mut img = RgbImage::new(side, side);
    for (row, values) in counts.iter().enumerate() {
        for (col, &value) in values.iter().enumerate().take(n) {
            fill_cell(&mut img, col as u32, row as u32, cell, Rgb(heat_color(value, max)));
        }
    }

    draw_grid_lines(&mut img, n as u32, cell);
    Ok(img)
}

/// Render a square count matrix to PNG bytes.
pub fn render_png(counts: &[Vec<u64>]) -> Result<Vec<u8>> {
    let img = render_image(counts)?;
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

fn fill_cell(img: &mut RgbImage, cx: u32, cy: u32, cell: u32, color: Rgb<u8>) {
    let x_start = cx * cell;
    let y_start = cy * cell;
    for dy in 0..cell {
        for dx in 0..cell {
            img.put_pixel(x_start + dx, y_start + dy, color);
        }
    }
}

fn draw_grid_lines(img: &mut RgbImage, n: u32, cell: u32) {
    let side = img.width();
    let black = Rgb(BLACK);
    for i in 1..n {
        let pos = i * cell;
        for t in 0..side {
            img.put_pixel(pos, t, black);
            img.put_pixel(t, pos, black);
        }
    }
}
