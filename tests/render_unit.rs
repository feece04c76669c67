//! Tests for the raster and ANSI heatmap renderers.

use image::GenericImageView;
use tempfile::TempDir;

use hitakort::render::{render_image, render_png, render_text, MAX_CANVAS_PX};
use hitakort::GridStore;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

fn zeros(n: usize) -> Vec<Vec<u64>> {
    vec![vec![0; n]; n]
}

/// Palette indices used in a rendered text block.
fn palette_indices(text: &str) -> Vec<u8> {
    text.split("\x1b[38;5;")
        .skip(1)
        .map(|chunk| chunk.split('m').next().unwrap().parse().unwrap())
        .collect()
}

// ==================== Raster ====================

#[test]
fn test_raster_is_square_and_divisible() {
    for n in [2, 3, 6, 7, 26, 100, 1024] {
        let img = render_image(&zeros(n)).unwrap();
        let (w, h) = img.dimensions();
        assert_eq!(w, h, "n = {}", n);
        assert!(w <= MAX_CANVAS_PX);
        assert_eq!(w % n as u32, 0);
        assert_eq!(w, n as u32 * (MAX_CANVAS_PX / n as u32));
    }
}

#[test]
fn test_all_zero_raster_is_white_with_grid_lines() {
    let n = 6;
    let img = render_image(&zeros(n)).unwrap();
    let cell = img.width() / n as u32;

    for (x, y, px) in img.enumerate_pixels() {
        let on_line = (x > 0 && x % cell == 0) || (y > 0 && y % cell == 0);
        if on_line {
            assert_eq!(px.0, BLACK, "({}, {}) should be a grid line", x, y);
        } else {
            assert_eq!(px.0, WHITE, "({}, {}) should be white", x, y);
        }
    }
}

#[test]
fn test_raster_has_inner_lines_only() {
    let img = render_image(&zeros(4)).unwrap();
    // Outer edges are not lines.
    assert_eq!(img.get_pixel(0, 10).0, WHITE);
    assert_eq!(img.get_pixel(10, 0).0, WHITE);
    assert_eq!(img.get_pixel(1023, 10).0, WHITE);
    assert_eq!(img.get_pixel(10, 1023).0, WHITE);
}

#[test]
fn test_raster_ramp_relative_to_max() {
    let mut counts = zeros(2);
    counts[0][0] = 4;
    counts[0][1] = 2;
    counts[1][0] = 1;
    let img = render_image(&counts).unwrap();

    // Sample cell centres, away from grid lines.
    assert_eq!(img.get_pixel(256, 256).0, [255, 0, 0]);
    assert_eq!(img.get_pixel(768, 256).0, [255, 127, 127]);
    // round(255 / 4) = 64
    assert_eq!(img.get_pixel(256, 768).0, [255, 191, 191]);
    assert_eq!(img.get_pixel(768, 768).0, WHITE);
}

#[test]
fn test_png_decodes_to_same_image() {
    let mut counts = zeros(3);
    counts[1][2] = 5;
    let expected = render_image(&counts).unwrap();

    let bytes = render_png(&counts).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), expected.dimensions());
    assert_eq!(decoded.to_rgb8(), expected);
}

#[test]
fn test_store_render_raster() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = GridStore::open(temp_dir.path(), 6, false).unwrap();
    store.record_hit("F6").unwrap();

    let bytes = store.render_raster().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (1020, 1020));
    // F6 is the bottom-right cell.
    assert_eq!(decoded.get_pixel(1000, 1000).0, [255, 0, 0]);
    assert_eq!(decoded.get_pixel(10, 10).0, WHITE);
}

// ==================== Text ====================

#[test]
fn test_all_zero_text_uses_only_white() {
    let text = render_text(&zeros(6));
    let indices = palette_indices(&text);
    assert_eq!(indices.len(), 36);
    assert!(indices.iter().all(|&i| i == 231));
}

#[test]
fn test_text_layout() {
    let text = render_text(&zeros(6));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "   A B C D E F ");
    for (i, line) in lines[1..].iter().enumerate() {
        assert!(line.starts_with(&format!("{:>2} ", i + 1)));
        assert_eq!(line.matches("██").count(), 6);
        assert_eq!(line.matches("\x1b[0m").count(), 6);
    }
}

#[test]
fn test_text_colors_follow_ramp() {
    let mut counts = zeros(2);
    counts[0][0] = 2;
    counts[1][1] = 1;
    let indices = palette_indices(&render_text(&counts));
    // red, white, white, half red (255,127,127) -> levels (5,2,2)
    assert_eq!(indices, vec![196, 231, 231, 16 + 180 + 12 + 2]);
}

#[test]
fn test_store_render_text() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = GridStore::open(temp_dir.path(), 3, false).unwrap();
    store.record_hit("b2").unwrap();

    let indices = palette_indices(&store.render_text());
    assert_eq!(indices[4], 196);
    assert_eq!(indices.iter().filter(|&&i| i == 231).count(), 8);
}
