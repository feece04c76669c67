//! White-to-red heat ramp and its terminal palette quantization.

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];

pub const BLACK: Rgb = [0, 0, 0];

/// Number of levels per channel in the 256-color terminal color cube.
pub const CUBE_LEVELS: u8 = 6;

/// First palette index of the 6x6x6 color cube.
pub const CUBE_OFFSET: u8 = 16;

/// Largest value in a row-major count matrix, 0 when empty or all zero.
pub fn max_count(counts: &[Vec<u64>]) -> u64 {
    counts
        .iter()
        .flat_map(|row| row.iter().copied())
        .max()
        .unwrap_or(0)
}

/// Heat intensity (0-255) of `value` relative to `max`.
///
/// Rounds to nearest; `max == 0` yields 0.
pub fn intensity(value: u64, max: u64) -> u8 {
    if max == 0 {
        return 0;
    }
    let value = value.min(max) as u128;
    let max = max as u128;
    // round(255 * value / max) in integer math
    ((255 * value * 2 + max) / (2 * max)) as u8
}

/// Color of a cell: white at zero, pure red at the grid's maximum.
pub fn heat_color(value: u64, max: u64) -> Rgb {
    if max == 0 {
        return WHITE;
    }
    let i = intensity(value, max);
    [255, 255 - i, 255 - i]
}

/// Quantize one 0-255 channel to its 0-5 cube level.
pub fn cube_level(channel: u8) -> u8 {
    let c = channel as u16;
    // round(c * 5 / 255); c * 5 / 255 never lands exactly on .5
    ((c * 10 + 255) / 510) as u8
}

/// 256-color palette index for an RGB color: `16 + 36r + 6g + b`.
pub fn palette_index(rgb: Rgb) -> u8 {
    let [r, g, b] = rgb.map(cube_level);
    CUBE_OFFSET + 36 * r + 6 * g + b
}
