//! Geometry primitives and their pixel rasterization.
//!
//! Coordinates are signed so that shapes may extend past the canvas edge.
//! Nothing here knows the canvas size; [`LinePath::steps_within`] lets a
//! writer skip the parts of a line that cannot land on it.

use std::fmt;
use std::ops::RangeInclusive;

/// An integer pixel position. (0,0) is top-left, x grows right, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Three vertices in caller order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    pub fn new(t0: impl Into<Point>, t1: impl Into<Point>, t2: impl Into<Point>) -> Self {
        Self { vertices: [t0.into(), t1.into(), t2.into()] }
    }

    /// Vertices ordered by ascending y. Ties keep their input order.
    pub fn sorted_by_y(&self) -> [Point; 3] {
        let mut sorted = self.vertices;
        sorted.sort_by_key(|p| p.y);
        sorted
    }

    /// Vertical extent of the triangle in rows.
    pub fn height(&self) -> i64 {
        let ys = self.vertices.map(|p| i64::from(p.y));
        ys.iter().max().copied().unwrap_or(0) - ys.iter().min().copied().unwrap_or(0)
    }
}

/// The Bresenham path of a segment, addressable by step index.
///
/// Step `k` advances `k` pixels along the major axis. The minor axis offset
/// at step `k` is `floor((2 * minor * k + major) / (2 * major))`, which is the
/// pixel the incremental error-term walk reaches. Computing it directly lets
/// callers visit only the steps that can land on a canvas, however far away
/// the endpoints are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePath {
    start: Point,
    sx: i64,
    sy: i64,
    major: i64,
    minor: i64,
    x_major: bool,
}

impl LinePath {
    pub fn new(p0: Point, p1: Point) -> Self {
        let dx = (i64::from(p1.x) - i64::from(p0.x)).abs();
        let dy = (i64::from(p1.y) - i64::from(p0.y)).abs();
        let x_major = dx >= dy;
        Self {
            start: p0,
            sx: if p0.x < p1.x { 1 } else { -1 },
            sy: if p0.y < p1.y { 1 } else { -1 },
            major: dx.max(dy),
            minor: dx.min(dy),
            x_major,
        }
    }

    /// Index of the last step; the path has `last_step() + 1` pixels.
    pub fn last_step(&self) -> i64 {
        self.major
    }

    /// Whether the path advances one column per step (otherwise one row).
    pub fn is_x_major(&self) -> bool {
        self.x_major
    }

    /// Minor-axis distance from the start at step `k`, never decreasing in `k`.
    fn minor_offset(&self, k: i64) -> i64 {
        if self.major == 0 {
            return 0;
        }
        let num = 2 * i128::from(self.minor) * i128::from(k) + i128::from(self.major);
        (num / (2 * i128::from(self.major))) as i64
    }

    /// Pixel reached at step `k`, for `k` in `0..=last_step()`.
    pub fn point(&self, k: i64) -> Point {
        let offset = self.minor_offset(k);
        let (dx, dy) = if self.x_major { (k, offset) } else { (offset, k) };
        // Every step lies between the endpoints, so it fits back into i32
        Point::new(
            (i64::from(self.start.x) + self.sx * dx) as i32,
            (i64::from(self.start.y) + self.sy * dy) as i32,
        )
    }

    /// Steps whose pixel lies in the inclusive box `xs` by `ys`.
    ///
    /// Both coordinates move monotonically along the path, so the steps
    /// inside any box form one contiguous range (possibly empty).
    pub fn steps_within(&self, xs: (i64, i64), ys: (i64, i64)) -> RangeInclusive<i64> {
        let x_offsets = offsets_within(i64::from(self.start.x), self.sx, xs);
        let y_offsets = offsets_within(i64::from(self.start.y), self.sy, ys);
        let (major, minor) = if self.x_major { (x_offsets, y_offsets) } else { (y_offsets, x_offsets) };

        let first = major.0.max(0);
        let last = major.1.min(self.major);
        let first = self.first_step_reaching(first, last, minor.0);
        let last = self.first_step_reaching(first, last, minor.1.saturating_add(1)) - 1;
        first..=last
    }

    /// First step in `lo..=hi` whose minor offset is at least `target`, or
    /// `hi + 1` when there is none.
    fn first_step_reaching(&self, mut lo: i64, hi: i64, target: i64) -> i64 {
        let mut end = hi + 1;
        while lo < end {
            let mid = lo + (end - lo) / 2;
            if self.minor_offset(mid) >= target {
                end = mid;
            } else {
                lo = mid + 1;
            }
        }
        lo
    }
}

/// Offsets from `origin` along direction `sign` that land in `lo..=hi`.
fn offsets_within(origin: i64, sign: i64, (lo, hi): (i64, i64)) -> (i64, i64) {
    if sign > 0 {
        (lo - origin, hi - origin)
    } else {
        (origin - hi, origin - lo)
    }
}

/// Rasterize a line using Bresenham's line algorithm.
///
/// Returns the pixels from `p0` to `p1` inclusive, in path order. The whole
/// path is materialized; [`LinePath`] visits part of it instead.
///
/// # Examples
///
/// ```
/// use pxfill::shapes::{rasterize_line, Point};
///
/// let pixels = rasterize_line(Point::new(0, 0), Point::new(3, 3));
/// assert_eq!(pixels.len(), 4);
/// assert_eq!(pixels[0], Point::new(0, 0));
/// assert_eq!(pixels[3], Point::new(3, 3));
/// ```
pub fn rasterize_line(p0: Point, p1: Point) -> Vec<Point> {
    let path = LinePath::new(p0, p1);
    (0..=path.last_step()).map(|k| path.point(k)).collect()
}

/// Extent of a square brush `thickness` pixels wide, as inclusive offsets
/// `(lo, hi)` from its center.
///
/// Even widths extend one pixel further right/down than left/up.
///
/// ```
/// use pxfill::shapes::brush_extent;
///
/// assert_eq!(brush_extent(1), (0, 0));
/// assert_eq!(brush_extent(4), (-1, 2));
/// ```
pub fn brush_extent(thickness: u32) -> (i64, i64) {
    let t = i64::from(thickness.max(1));
    (-((t - 1) / 2), t / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    /// The incremental error-term walk, for comparison with [`LinePath`]
    fn walk(p0: Point, p1: Point) -> Vec<Point> {
        let (mut x0, mut y0) = (p0.x, p0.y);
        let dx = (p1.x - x0).abs();
        let dy = -(p1.y - y0).abs();
        let sx = if x0 < p1.x { 1 } else { -1 };
        let sy = if y0 < p1.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut out = Vec::new();
        loop {
            out.push(Point::new(x0, y0));
            if x0 == p1.x && y0 == p1.y {
                return out;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    #[test]
    fn test_rasterize_line_horizontal() {
        let pixels = rasterize_line(Point::new(0, 0), Point::new(3, 0));
        assert_eq!(pixels, pts(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
    }

    #[test]
    fn test_rasterize_line_vertical() {
        let pixels = rasterize_line(Point::new(0, 0), Point::new(0, 3));
        assert_eq!(pixels, pts(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn test_rasterize_line_diagonal() {
        let pixels = rasterize_line(Point::new(0, 0), Point::new(3, 3));
        assert_eq!(pixels, pts(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn test_rasterize_line_reverse_direction() {
        let pixels = rasterize_line(Point::new(3, 0), Point::new(0, 0));
        assert_eq!(pixels, pts(&[(3, 0), (2, 0), (1, 0), (0, 0)]));
    }

    #[test]
    fn test_rasterize_line_single_pixel() {
        let pixels = rasterize_line(Point::new(5, 5), Point::new(5, 5));
        assert_eq!(pixels, pts(&[(5, 5)]));
    }

    #[test]
    fn test_rasterize_line_shallow() {
        let pixels = rasterize_line(Point::new(0, 0), Point::new(3, 1));
        assert_eq!(pixels, pts(&[(0, 0), (1, 0), (2, 1), (3, 1)]));
    }

    #[test]
    fn test_rasterize_line_shallow_is_gapless() {
        let pixels = rasterize_line(Point::new(0, 0), Point::new(10, 3));
        assert_eq!(pixels.len(), 11);
        for pair in pixels.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 1);
            assert!((pair[1].y - pair[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_rasterize_line_negative_coords() {
        let pixels = rasterize_line(Point::new(-2, -2), Point::new(2, 2));
        assert!(pixels.contains(&Point::new(-2, -2)));
        assert!(pixels.contains(&Point::new(0, 0)));
        assert!(pixels.contains(&Point::new(2, 2)));
    }

    #[test]
    fn test_line_path_matches_error_term_walk() {
        let ends = [(0, 0), (7, 2), (-5, 9), (3, -11), (12, 12), (-8, -3), (0, 6), (9, 0)];
        for a in ends {
            for b in ends {
                let (p0, p1) = (Point::from(a), Point::from(b));
                assert_eq!(rasterize_line(p0, p1), walk(p0, p1), "{} -> {}", p0, p1);
            }
        }
    }

    #[test]
    fn test_line_path_far_endpoints() {
        let path = LinePath::new(Point::new(-2_000_000_000, 0), Point::new(2_000_000_000, 0));
        assert!(path.is_x_major());
        assert_eq!(path.last_step(), 4_000_000_000);

        let steps = path.steps_within((0, 9), (0, 9));
        assert_eq!(steps, 2_000_000_000..=2_000_000_009);
        assert_eq!(path.point(*steps.start()), Point::new(0, 0));
        assert_eq!(path.point(*steps.end()), Point::new(9, 0));
    }

    #[test]
    fn test_line_path_extreme_corners() {
        let (p0, p1) = (Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX));
        let path = LinePath::new(p0, p1);
        assert_eq!(path.point(0), p0);
        assert_eq!(path.point(path.last_step()), p1);
        assert_eq!(path.steps_within((0, 3), (0, 3)).count(), 4);
    }

    #[test]
    fn test_steps_within_reversed_and_outside() {
        let path = LinePath::new(Point::new(20, 0), Point::new(0, 5));
        assert_eq!(path.steps_within((5, 8), (0, 100)), 12..=15);
        assert!(path.steps_within((30, 40), (0, 100)).is_empty());
        assert!(path.steps_within((0, 20), (6, 9)).is_empty());
    }

    #[test]
    fn test_steps_within_trims_minor_axis() {
        let path = LinePath::new(Point::new(0, 0), Point::new(20, 10));
        let steps = path.steps_within((0, 100), (3, 4));
        assert_eq!(steps, 5..=8);
        assert_eq!(path.point(5), Point::new(5, 3));
        assert_eq!(path.point(8), Point::new(8, 4));
    }

    #[test]
    fn test_brush_extent() {
        assert_eq!(brush_extent(1), (0, 0));
        assert_eq!(brush_extent(2), (0, 1));
        assert_eq!(brush_extent(3), (-1, 1));
        assert_eq!(brush_extent(u32::MAX), (-2_147_483_647, 2_147_483_647));
    }

    #[test]
    fn test_triangle_sorted_by_y_is_stable() {
        let t = Triangle::new((5, 2), (1, 0), (9, 2));
        assert_eq!(t.sorted_by_y(), [Point::new(1, 0), Point::new(5, 2), Point::new(9, 2)]);
    }

    #[test]
    fn test_triangle_height() {
        assert_eq!(Triangle::new((10, 70), (50, 160), (70, 80)).height(), 90);
        assert_eq!(Triangle::new((0, 0), (10, 0), (20, 0)).height(), 0);
        assert_eq!(Triangle::new((0, i32::MIN), (0, 0), (0, i32::MAX)).height(), u32::MAX as i64);
    }
}
