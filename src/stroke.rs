//! Freehand outlines: pointer-driven capture and polyline stroking.
//!
//! A host shell reports pointer down/move/up events; every move while the
//! pointer is down strokes one segment from the previous point, exactly as a
//! paint program draws while dragging. The captured points can be replayed
//! later with [`draw_polyline`].

use crate::canvas::{CanvasError, PixelCanvas};
use crate::color::Color;
use crate::report::FillReport;
use crate::shapes::Point;

/// An ordered freehand path: the pointer-down point, then one point per move.
pub type Polyline = Vec<Point>;

/// Stroke one segment of a freehand outline.
pub fn stroke_segment(
    canvas: &mut PixelCanvas,
    p0: Point,
    p1: Point,
    color: Color,
    thickness: u32,
) -> Result<FillReport, CanvasError> {
    canvas.draw_line(p0, p1, color, thickness)
}

/// Stroke consecutive pairs of `points`.
///
/// With `closed`, the last point is joined back to the first. A single point
/// stamps the brush once; an empty polyline draws nothing.
pub fn draw_polyline(
    canvas: &mut PixelCanvas,
    points: &[Point],
    color: Color,
    thickness: u32,
    closed: bool,
) -> Result<FillReport, CanvasError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            if thickness == 0 {
                return Err(CanvasError::ZeroThickness);
            }
            return Ok(FillReport::noop("empty stroke, nothing drawn"));
        }
    };

    if points.len() == 1 {
        return stroke_segment(canvas, first, first, color, thickness);
    }

    let mut report = FillReport::default();
    for pair in points.windows(2) {
        report.merge(stroke_segment(canvas, pair[0], pair[1], color, thickness)?);
    }
    if closed && first != last {
        report.merge(stroke_segment(canvas, last, first, color, thickness)?);
    }
    Ok(report)
}

/// Turns pointer events into strokes on a canvas.
#[derive(Debug, Clone)]
pub struct StrokeRecorder {
    color: Color,
    thickness: u32,
    /// Last pointer position while the pointer is down
    last: Option<Point>,
    points: Polyline,
}

impl StrokeRecorder {
    /// Create a recorder. Thickness is validated here so pointer moves cannot fail.
    pub fn new(color: Color, thickness: u32) -> Result<Self, CanvasError> {
        if thickness == 0 {
            return Err(CanvasError::ZeroThickness);
        }
        Ok(Self { color, thickness, last: None, points: Vec::new() })
    }

    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Start a stroke at `p`. Nothing is drawn until the pointer moves.
    pub fn pointer_down(&mut self, p: Point) {
        self.last = Some(p);
        self.points.push(p);
    }

    /// Stroke from the previous position to `p` if the pointer is down.
    ///
    /// Returns whether anything was drawn.
    pub fn pointer_move(&mut self, canvas: &mut PixelCanvas, p: Point) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        // Thickness is known to be non-zero, so stroking cannot fail
        let drawn = canvas.draw_line(last, p, self.color, self.thickness).is_ok();
        self.last = Some(p);
        self.points.push(p);
        drawn
    }

    /// End the current stroke. Later moves draw nothing until the next down.
    pub fn pointer_up(&mut self) {
        self.last = None;
    }

    /// Every point captured so far, across all strokes.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume the recorder and return the captured points.
    pub fn finish(self) -> Polyline {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};
    use crate::shapes::rasterize_line;

    fn blank() -> PixelCanvas {
        PixelCanvas::new(20, 20, WHITE).unwrap()
    }

    #[test]
    fn test_recorder_draws_only_while_down() {
        let mut canvas = blank();
        let mut recorder = StrokeRecorder::new(BLACK, 1).unwrap();

        assert!(!recorder.pointer_move(&mut canvas, Point::new(5, 5)));
        assert_eq!(canvas.count_color(BLACK), 0);

        recorder.pointer_down(Point::new(1, 1));
        assert!(recorder.is_drawing());
        assert!(recorder.pointer_move(&mut canvas, Point::new(6, 1)));
        assert_eq!(canvas.count_color(BLACK), 6);

        recorder.pointer_up();
        assert!(!recorder.is_drawing());
        assert!(!recorder.pointer_move(&mut canvas, Point::new(6, 10)));
        assert_eq!(canvas.count_color(BLACK), 6);

        assert_eq!(recorder.finish(), vec![Point::new(1, 1), Point::new(6, 1)]);
    }

    #[test]
    fn test_recorder_matches_polyline_replay() {
        let path = [(2, 2), (15, 3), (12, 16), (3, 12), (2, 2)].map(Point::from);

        let mut live = blank();
        let mut recorder = StrokeRecorder::new(BLACK, 1).unwrap();
        recorder.pointer_down(path[0]);
        for p in &path[1..] {
            recorder.pointer_move(&mut live, *p);
        }
        recorder.pointer_up();

        let mut replay = blank();
        draw_polyline(&mut replay, recorder.points(), BLACK, 1, false).unwrap();
        assert_eq!(live, replay);
    }

    #[test]
    fn test_recorder_rejects_zero_thickness() {
        assert!(matches!(StrokeRecorder::new(BLACK, 0), Err(CanvasError::ZeroThickness)));
    }

    #[test]
    fn test_draw_polyline_closed_adds_last_segment() {
        let points = [(2, 2), (10, 2), (10, 10)].map(Point::from);

        let mut open = blank();
        draw_polyline(&mut open, &points, BLACK, 1, false).unwrap();
        let mut closed = blank();
        draw_polyline(&mut closed, &points, BLACK, 1, true).unwrap();

        for p in rasterize_line(points[2], points[0]) {
            assert_eq!(closed.get(p.x, p.y), Ok(BLACK));
        }
        assert_eq!(open.get(6, 6), Ok(WHITE));
        assert_eq!(closed.get(6, 6), Ok(BLACK));
    }

    #[test]
    fn test_draw_polyline_empty() {
        let mut canvas = blank();
        let report = draw_polyline(&mut canvas, &[], BLACK, 1, true).unwrap();
        assert_eq!(report.pixels, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(canvas.count_color(WHITE), 400);
    }

    #[test]
    fn test_draw_polyline_single_point() {
        let mut canvas = blank();
        let report = draw_polyline(&mut canvas, &[Point::new(4, 4)], BLACK, 3, false).unwrap();
        assert_eq!(report.pixels, 9);
        assert_eq!(canvas.get(3, 3), Ok(BLACK));
        assert_eq!(canvas.get(5, 5), Ok(BLACK));
    }

    #[test]
    fn test_draw_polyline_zero_thickness() {
        let mut canvas = blank();
        let points = [Point::new(0, 0), Point::new(5, 5)];
        assert_eq!(
            draw_polyline(&mut canvas, &points, BLACK, 0, false),
            Err(CanvasError::ZeroThickness)
        );
        assert_eq!(
            draw_polyline(&mut canvas, &[], BLACK, 0, false),
            Err(CanvasError::ZeroThickness)
        );
    }
}
