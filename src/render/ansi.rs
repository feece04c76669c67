//! Colored text heatmap for 256-color terminals.

use super::ramp::{heat_color, max_count, palette_index};
use crate::coord::column_to_label;

/// Glyphs drawn for each cell.
pub const CELL_GLYPH: &str = "██";

/// SGR sequence resetting all attributes.
pub const RESET: &str = "\x1b[0m";

/// Foreground color escape for a 256-color palette index.
pub fn fg_escape(index: u8) -> String {
    format!("\x1b[38;5;{}m", index)
}

/// Render a square count matrix as labelled, colored block text.
///
/// The first line holds the column labels; each following line starts with
/// the 1-based row number and draws every cell as two colored full blocks.
pub fn render_text(counts: &[Vec<u64>]) -> String {
    let max = max_count(counts);
    let n = counts.len();

    let mut lines = Vec::with_capacity(n + 1);

    let mut header = String::from("   ");
    for col in 0..n {
        header.push_str(&format!("{:<2}", column_to_label(col)));
    }
    lines.push(header);

    for (row, values) in counts.iter().enumerate() {
        let mut line = format!("{:>2} ", row + 1);
        for &value in values {
            let index = palette_index(heat_color(value, max));
            line.push_str(&fg_escape(index));
            line.push_str(CELL_GLYPH);
            line.push_str(RESET);
        }
        lines.push(line);
    }

    lines.join("\n")
}
