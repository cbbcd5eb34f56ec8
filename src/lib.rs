//! pxfill - Raster fill engine for a fixed-size pixel canvas
//!
//! This library provides:
//! - Scanline triangle rasterization
//! - Row parity filling of outlines already drawn on the canvas
//! - Seed (flood) filling of 4-connected regions
//! - Freehand stroke capture, JSONL scene replay and PNG output
//!
//! Every operation mutates an exclusively borrowed [`PixelCanvas`] in place
//! and returns a [`FillReport`] or an error raised before any pixel changed.

pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod flood;
pub mod output;
pub mod parity;
pub mod report;
pub mod scene;
pub mod shapes;
pub mod stroke;
pub mod triangle;

pub use canvas::{CanvasError, PixelCanvas};
pub use color::Color;
pub use flood::{flood_fill, FillError};
pub use parity::{fill_by_parity, BorderRule};
pub use report::{FillReport, Warning};
pub use shapes::{Point, Triangle};
pub use stroke::stroke_segment;
pub use triangle::draw_triangle;

/// Create a canvas of the given size filled with `background`.
pub fn create_canvas(width: u32, height: u32, background: Color) -> Result<PixelCanvas, CanvasError> {
    PixelCanvas::new(width, height, background)
}

/// Read one pixel, for display or inspection.
pub fn read_pixel(canvas: &PixelCanvas, x: i32, y: i32) -> Result<Color, CanvasError> {
    canvas.get(x, y)
}
