//! Seed fill over 4-connected regions of a single color.
//!
//! Work is kept on an explicit LIFO stack, never the call stack, so a region
//! spanning the whole canvas costs heap memory rather than recursion depth.
//! Pending entries are not deduplicated; a pixel that was already recolored is
//! simply skipped when it is popped again.

use crate::canvas::{CanvasError, PixelCanvas};
use crate::color::{format_hex, Color};
use crate::report::FillReport;
use crate::shapes::Point;
use thiserror::Error;

/// Error type for fills that are rejected before touching the canvas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    /// The seed lies outside the canvas
    #[error(transparent)]
    OutOfBounds(#[from] CanvasError),
    /// The seed pixel has the boundary color, so there is no region to fill
    #[error("seed ({x}, {y}) is on a boundary, pick a point inside the shape")]
    SeedOnBoundary { x: i32, y: i32 },
}

/// Neighbor offsets in push order: left, right, up, down.
const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Recolor the 4-connected region around `seed` with `fill`.
///
/// The region is every pixel reachable from the seed through pixels that
/// originally had the seed's color. A seed whose color equals `border` is
/// rejected with [`FillError::SeedOnBoundary`]. Filling a region that already
/// has the fill color is a no-op and reported as a warning.
///
/// # Examples
///
/// ```
/// use pxfill::canvas::PixelCanvas;
/// use pxfill::color::{BLACK, BLUE, WHITE};
/// use pxfill::flood::flood_fill;
/// use pxfill::shapes::Point;
///
/// let mut canvas = PixelCanvas::new(3, 3, WHITE).unwrap();
/// let report = flood_fill(&mut canvas, Point::new(1, 1), BLUE, BLACK).unwrap();
/// assert_eq!(report.pixels, 9);
/// ```
pub fn flood_fill(
    canvas: &mut PixelCanvas,
    seed: Point,
    fill: Color,
    border: Color,
) -> Result<FillReport, FillError> {
    let target = canvas.get(seed.x, seed.y)?;

    if target == border {
        tracing::debug!(%seed, border = %format_hex(border), "flood seed on boundary");
        return Err(FillError::SeedOnBoundary { x: seed.x, y: seed.y });
    }

    if target == fill {
        return Ok(FillReport::noop(format!(
            "flood fill at {} with {} is a no-op (region already has that color)",
            seed,
            format_hex(fill)
        )));
    }

    let mut stack = vec![seed];
    let mut written = 0;
    let mut peak = 1;

    while let Some(p) = stack.pop() {
        // Out-of-bounds neighbors are discarded here, as are already filled pixels
        match canvas.get(p.x, p.y) {
            Ok(color) if color == target => {}
            _ => continue,
        }
        canvas.put_clipped(p.x, p.y, fill);
        written += 1;

        for (dx, dy) in NEIGHBORS {
            stack.push(Point::new(p.x + dx, p.y + dy));
        }
        peak = peak.max(stack.len());
    }

    tracing::debug!(%seed, pixels = written, peak_stack = peak, "flood fill");
    Ok(FillReport::new(written))
}
