//! Heatmap renderers for a grid's count matrix.
//!
//! Both renderers take the row-major matrix produced by
//! [`GridStore::raw_counts`](crate::store::GridStore::raw_counts) and color
//! each cell on the same white-to-red ramp, keyed on the fraction of the
//! grid's current maximum:
//!
//! 1. **Raster** - a PNG-encodable RGB image, at most 1024px square
//! 2. **ANSI** - block glyphs colored from the 6x6x6 terminal color cube

pub mod ansi;
pub mod ramp;
pub mod raster;

pub use ansi::render_text;
pub use ramp::{heat_color, palette_index, Rgb};
pub use raster::{render_image, render_png, MAX_CANVAS_PX};
