//! Scanline rasterization of solid triangles with known vertices.
//!
//! The triangle is split at its middle vertex into an upper and a lower half.
//! Each row takes one boundary from the long edge (top to bottom vertex) and
//! the other from the short edge of its half, both by linear interpolation.
//! Interpolated x coordinates are truncated toward zero, never rounded, so the
//! rasterized pixel set is reproducible bit for bit.

use crate::canvas::{CanvasError, PixelCanvas};
use crate::color::Color;
use crate::report::FillReport;
use crate::shapes::{Point, Triangle};

/// Interpolate the x coordinate between `a` and `b`, truncating toward zero.
fn lerp_x(a: Point, b: Point, t: f32) -> i64 {
    (a.x as f32 + (i64::from(b.x) - i64::from(a.x)) as f32 * t) as i64
}

fn clamp_to_i32(x: i64) -> i32 {
    x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Fill the interior of the triangle `t0`, `t1`, `t2` with `color`.
///
/// Rows run from the topmost vertex down to, but not including, the bottommost
/// vertex's row. A triangle whose vertices share one row is degenerate and
/// produces no fill. Pixels off the canvas are skipped.
///
/// # Examples
///
/// ```
/// use pxfill::canvas::PixelCanvas;
/// use pxfill::color::{RED, WHITE};
/// use pxfill::shapes::Point;
/// use pxfill::triangle::fill_triangle;
///
/// let mut canvas = PixelCanvas::new(200, 200, WHITE).unwrap();
/// fill_triangle(&mut canvas, Point::new(10, 70), Point::new(50, 160), Point::new(70, 80), RED);
/// assert_eq!(canvas.get(40, 110), Ok(RED));
/// assert_eq!(canvas.get(5, 75), Ok(WHITE));
/// ```
pub fn fill_triangle(
    canvas: &mut PixelCanvas,
    t0: Point,
    t1: Point,
    t2: Point,
    color: Color,
) -> FillReport {
    let [t0, t1, t2] = Triangle::new(t0, t1, t2).sorted_by_y();

    let (y0, y1, y2) = (i64::from(t0.y), i64::from(t1.y), i64::from(t2.y));
    let total_height = y2 - y0;
    if total_height == 0 {
        tracing::debug!(y = t0.y, "degenerate triangle, nothing to fill");
        return FillReport::noop(format!(
            "triangle {} {} {} has zero height, nothing filled",
            t0, t1, t2
        ));
    }

    let upper_height = y1 - y0;
    // Rows above or below the canvas write nothing
    let rows = (-y0).max(0)..total_height.min(i64::from(canvas.height()) - y0);
    let mut written = 0;

    for i in rows {
        let second_half = i > upper_height || y1 == y0;
        let segment_height = if second_half { y2 - y1 } else { upper_height };

        let alpha = i as f32 / total_height as f32;
        let beta = if segment_height == 0 {
            0.0
        } else {
            (i - if second_half { upper_height } else { 0 }) as f32 / segment_height as f32
        };

        let mut a = lerp_x(t0, t2, alpha);
        let mut b = if second_half { lerp_x(t1, t2, beta) } else { lerp_x(t0, t1, beta) };
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }

        written += canvas.fill_span((y0 + i) as i32, clamp_to_i32(a), clamp_to_i32(b), color);
    }

    tracing::debug!(pixels = written, rows = total_height, "filled triangle");
    FillReport::new(written)
}

/// Stroke the closed outline of `triangle`, then fill its interior.
///
/// The fill is drawn over the outline, so outline pixels survive only where
/// the scanline spans do not reach them.
pub fn draw_triangle(
    canvas: &mut PixelCanvas,
    triangle: &Triangle,
    outline: Color,
    fill: Color,
    thickness: u32,
) -> Result<FillReport, CanvasError> {
    let [t0, t1, t2] = triangle.vertices;
    let mut report = FillReport::default();
    for (a, b) in [(t0, t1), (t1, t2), (t2, t0)] {
        report.merge(canvas.draw_line(a, b, outline, thickness)?);
    }
    report.merge(fill_triangle(canvas, t0, t1, t2, fill));
    Ok(report)
}
