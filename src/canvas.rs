//! The fixed-size pixel buffer every fill operates on.
//!
//! Checked accessors (`get`, `set`) reject coordinates outside the canvas.
//! Clipped accessors (`put_clipped`, `fill_span`) silently skip them and are
//! what the rasterization loops use.

use crate::color::Color;
use crate::report::FillReport;
use crate::shapes::{brush_extent, LinePath, Point};
use image::RgbaImage;
use thiserror::Error;

/// Error type for canvas access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// Coordinate outside `[0, width) x [0, height)`
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} canvas")]
    OutOfBounds { x: i32, y: i32, width: u32, height: u32 },
    /// Canvas dimensions must both be positive
    #[error("canvas size {width}x{height} is empty, both dimensions must be positive")]
    EmptyCanvas { width: u32, height: u32 },
    /// Canvas dimensions too large to address or allocate
    #[error("canvas size {width}x{height} is too large")]
    TooLarge { width: u32, height: u32 },
    /// Strokes need a width of at least one pixel
    #[error("stroke thickness must be at least 1")]
    ZeroThickness,
}

/// A fixed-size RGBA pixel grid.
///
/// The size is set at construction and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    /// Create a canvas filled with `background`.
    ///
    /// Both dimensions must be positive and fit the signed coordinate space,
    /// and the RGBA buffer must be addressable.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptyCanvas { width, height });
        }
        let addressable = width <= i32::MAX as u32
            && height <= i32::MAX as u32
            && (width as usize)
                .checked_mul(height as usize)
                .and_then(|n| n.checked_mul(4))
                .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !addressable {
            return Err(CanvasError::TooLarge { width, height });
        }
        Ok(Self { image: RgbaImage::from_pixel(width, height, background) })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether (x, y) addresses a pixel of this canvas.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    fn check(&self, x: i32, y: i32) -> Result<(u32, u32), CanvasError> {
        if self.contains(x, y) {
            Ok((x as u32, y as u32))
        } else {
            Err(CanvasError::OutOfBounds { x, y, width: self.width(), height: self.height() })
        }
    }

    /// Read the pixel at (x, y).
    pub fn get(&self, x: i32, y: i32) -> Result<Color, CanvasError> {
        let (x, y) = self.check(x, y)?;
        Ok(*self.image.get_pixel(x, y))
    }

    /// Overwrite the pixel at (x, y). No blending.
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> Result<(), CanvasError> {
        let (x, y) = self.check(x, y)?;
        self.image.put_pixel(x, y, color);
        Ok(())
    }

    /// Write the pixel if it lies on the canvas. Returns whether it was written.
    pub fn put_clipped(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.image.put_pixel(x as u32, y as u32, color);
        true
    }

    /// Write the inclusive span `x0..=x1` on row `y`, clipped to the canvas.
    ///
    /// Returns the number of pixels written. An empty span (`x0 > x1`) writes
    /// nothing.
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Color) -> usize {
        if y < 0 || y as u32 >= self.height() {
            return 0;
        }
        let start = x0.max(0);
        let end = x1.min(self.width() as i32 - 1);
        if start > end {
            return 0;
        }
        for x in start..=end {
            self.image.put_pixel(x as u32, y as u32, color);
        }
        (end - start + 1) as usize
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Stroke a straight segment from `p0` to `p1` inclusive.
    ///
    /// Uses Bresenham's algorithm with a square brush `thickness` pixels wide.
    /// Only path steps whose brush reaches the canvas are visited, so distant
    /// endpoints cost nothing extra. The report counts distinct pixels written.
    pub fn draw_line(
        &mut self,
        p0: Point,
        p1: Point,
        color: Color,
        thickness: u32,
    ) -> Result<FillReport, CanvasError> {
        if thickness == 0 {
            return Err(CanvasError::ZeroThickness);
        }
        let (lo, hi) = brush_extent(thickness);
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));
        let path = LinePath::new(p0, p1);
        let steps = path.steps_within((-hi, w - 1 - lo), (-hi, h - 1 - lo));

        if thickness == 1 {
            let written = steps
                .filter(|&k| {
                    let p = path.point(k);
                    self.put_clipped(p.x, p.y, color)
                })
                .count();
            return Ok(FillReport::new(written));
        }

        // Neighbouring brush stamps overlap; count each pixel once
        let mut stamped = vec![false; self.width() as usize * self.height() as usize];
        let mut written = 0;
        for k in steps {
            let center = path.point(k);
            let (cx, cy) = (i64::from(center.x), i64::from(center.y));
            let (x0, x1) = ((cx + lo).max(0), (cx + hi).min(w - 1));
            let (y0, y1) = ((cy + lo).max(0), (cy + hi).min(h - 1));
            for y in y0..=y1 {
                for x in x0..=x1 {
                    let index = (y * w + x) as usize;
                    if !stamped[index] {
                        stamped[index] = true;
                        self.image.put_pixel(x as u32, y as u32, color);
                        written += 1;
                    }
                }
            }
            if written == stamped.len() {
                break;
            }
        }
        Ok(FillReport::new(written))
    }

    /// Count pixels that currently equal `color`.
    pub fn count_color(&self, color: Color) -> usize {
        self.image.pixels().filter(|p| **p == color).count()
    }

    /// Borrow the underlying image, e.g. for display.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// A copy of the current pixels, independent of later mutation.
    pub fn snapshot(&self) -> RgbaImage {
        self.image.clone()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
