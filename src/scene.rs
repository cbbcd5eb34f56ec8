//! JSONL scene files: parsing and replay onto a canvas
//!
//! A scene is one JSON object per line, tagged by `"type"`:
//!
//! ```text
//! {"type": "canvas", "width": 64, "height": 64, "background": "#FFFFFF"}
//! {"type": "stroke", "points": [[4, 4], [60, 4], [60, 60], [4, 60]], "closed": true}
//! {"type": "parity", "fill": "#0000FF"}
//! {"type": "triangle", "vertices": [[10, 10], [30, 50], [50, 20]]}
//! {"type": "flood", "seed": [2, 2], "fill": "#00FF00"}
//! ```
//!
//! Omitted colors and thicknesses come from the configuration.

use crate::canvas::{CanvasError, PixelCanvas};
use crate::color::{parse_color, Color, ColorError};
use crate::config::{Palette, PxfillConfig};
use crate::flood::{flood_fill, FillError};
use crate::parity::{fill_by_parity, BorderMode};
use crate::report::{FillReport, Warning};
use crate::shapes::{Point, Triangle};
use crate::stroke::draw_polyline;
use crate::triangle::draw_triangle;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read};
use thiserror::Error;

/// Error type for scene parsing and replay
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SceneError {
    #[error("Failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    /// A line that is not a valid scene operation
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    /// A drawing operation appeared before any canvas operation (strict mode)
    #[error("line {line}: drawing before a canvas operation")]
    MissingCanvas { line: usize },
    #[error("line {line}: {source}")]
    Canvas { line: usize, source: CanvasError },
    #[error("line {line}: {source}")]
    Fill { line: usize, source: FillError },
    #[error("line {line}: {source}")]
    Color { line: usize, source: ColorError },
    /// Configured colors that do not parse
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// One scene operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneOp {
    /// Create the canvas. Only valid as the first operation.
    Canvas {
        width: u32,
        height: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<String>,
    },
    /// Outline and fill a triangle
    Triangle {
        vertices: [[i32; 2]; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outline: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness: Option<u32>,
    },
    /// Freehand outline through `points`
    Stroke {
        points: Vec<[i32; 2]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness: Option<u32>,
        #[serde(default)]
        closed: bool,
    },
    /// Row parity fill of everything stroked so far
    Parity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        border: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rule: Option<BorderMode>,
    },
    /// Seed fill from `seed`
    Flood {
        seed: [i32; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        border: Option<String>,
    },
}

/// An operation together with the line it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLine {
    pub line: usize,
    pub op: SceneOp,
}

/// Result of parsing a scene stream.
#[derive(Debug, Clone, Default)]
pub struct ParsedScene {
    pub ops: Vec<SceneLine>,
    pub warnings: Vec<Warning>,
}

/// Parse a single line into a scene operation.
pub fn parse_line(line: &str, line_number: usize) -> Result<SceneOp, SceneError> {
    serde_json::from_str(line)
        .map_err(|e| SceneError::Parse { line: line_number, message: e.to_string() })
}

/// Parse a JSONL scene.
///
/// Blank lines are skipped. Malformed lines are collected as warnings and
/// skipped, unless `strict` is set, in which case the first one is returned
/// as an error.
pub fn parse_scene<R: Read>(reader: R, strict: bool) -> Result<ParsedScene, SceneError> {
    let mut result = ParsedScene::default();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line, line_number) {
            Ok(op) => result.ops.push(SceneLine { line: line_number, op }),
            Err(e) if strict => return Err(e),
            Err(e) => {
                tracing::warn!("{}", e);
                result.warnings.push(Warning::new(e.to_string()));
            }
        }
    }

    tracing::debug!(ops = result.ops.len(), warnings = result.warnings.len(), "parsed scene");
    Ok(result)
}

/// A replayed scene: the final canvas plus everything the operations reported
#[derive(Debug, Clone)]
pub struct RenderedScene {
    pub canvas: PixelCanvas,
    pub report: FillReport,
}

/// Replays parsed operations onto a canvas using configured defaults.
pub struct SceneRenderer<'a> {
    config: &'a PxfillConfig,
    palette: Palette,
    strict: bool,
}

impl<'a> SceneRenderer<'a> {
    pub fn new(config: &'a PxfillConfig) -> Result<Self, SceneError> {
        let palette = config.palette().map_err(|e| SceneError::Config(e.to_string()))?;
        Ok(Self { config, palette, strict: config.output.strict })
    }

    /// Override the configured strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Apply every operation in order.
    ///
    /// A scene that does not start with a canvas operation is drawn on the
    /// configured default canvas. Canvas operations after the first drawing
    /// are ignored with a warning. A flood seeded on a boundary is reported as
    /// a warning and replay continues; any other failure aborts.
    pub fn render(&self, scene: &ParsedScene) -> Result<RenderedScene, SceneError> {
        let mut report = FillReport::default();
        for warning in &scene.warnings {
            report.warnings.push(warning.clone());
        }

        let mut ops = scene.ops.iter().peekable();
        let (mut canvas, background) = match ops.peek() {
            Some(SceneLine { line, op: SceneOp::Canvas { width, height, background } }) => {
                let line = *line;
                let background = match background {
                    Some(s) => color_at(line, s)?,
                    None => self.palette.background,
                };
                let canvas = PixelCanvas::new(*width, *height, background)
                    .map_err(|source| SceneError::Canvas { line, source })?;
                ops.next();
                (canvas, background)
            }
            Some(SceneLine { line, .. }) if self.strict => {
                return Err(SceneError::MissingCanvas { line: *line });
            }
            _ => {
                let canvas = self.default_canvas()?;
                if !scene.ops.is_empty() {
                    report.warn(format!(
                        "no canvas operation, using the default {}x{} canvas",
                        canvas.width(),
                        canvas.height()
                    ));
                }
                (canvas, self.palette.background)
            }
        };

        for SceneLine { line, op } in ops {
            let line = *line;
            let op_report = self.apply(&mut canvas, background, line, op)?;
            report.pixels += op_report.pixels;
            for warning in op_report.warnings {
                report.warnings.push(Warning::new(format!("line {}: {}", line, warning)));
            }
        }

        tracing::debug!(
            ops = scene.ops.len(),
            pixels = report.pixels,
            warnings = report.warnings.len(),
            "rendered scene"
        );
        Ok(RenderedScene { canvas, report })
    }

    fn default_canvas(&self) -> Result<PixelCanvas, SceneError> {
        PixelCanvas::new(self.config.canvas.width, self.config.canvas.height, self.palette.background)
            .map_err(|source| SceneError::Canvas { line: 0, source })
    }

    fn apply(
        &self,
        canvas: &mut PixelCanvas,
        background: Color,
        line: usize,
        op: &SceneOp,
    ) -> Result<FillReport, SceneError> {
        let canvas_err = |source: CanvasError| SceneError::Canvas { line, source };
        let color = |value: &Option<String>, default: Color| match value {
            Some(s) => color_at(line, s),
            None => Ok(default),
        };
        let thickness = |value: &Option<u32>| value.unwrap_or(self.config.stroke.thickness);

        match op {
            SceneOp::Canvas { .. } => {
                Ok(FillReport::noop("canvas already created, operation ignored"))
            }
            SceneOp::Triangle { vertices, outline, fill, thickness: t } => {
                let [a, b, c] = *vertices;
                let triangle = Triangle::new(a, b, c);
                draw_triangle(
                    canvas,
                    &triangle,
                    color(outline, self.palette.stroke)?,
                    color(fill, self.palette.triangle)?,
                    thickness(t),
                )
                .map_err(canvas_err)
            }
            SceneOp::Stroke { points, color: c, thickness: t, closed } => {
                let points: Vec<Point> = points.iter().map(|p| Point::from(*p)).collect();
                draw_polyline(canvas, &points, color(c, self.palette.stroke)?, thickness(t), *closed)
                    .map_err(canvas_err)
            }
            SceneOp::Parity { fill, border, rule } => {
                let mode = rule.unwrap_or(self.config.fill.rule);
                let rule = mode.rule(color(border, self.palette.stroke)?, background);
                Ok(fill_by_parity(canvas, &rule, color(fill, self.palette.region)?))
            }
            SceneOp::Flood { seed, fill, border } => {
                let fill = color(fill, self.palette.region)?;
                let border = color(border, self.palette.stroke)?;
                match flood_fill(canvas, Point::from(*seed), fill, border) {
                    Ok(report) => Ok(report),
                    Err(e @ FillError::SeedOnBoundary { .. }) => {
                        Ok(FillReport::noop(format!("{}, flood skipped", e)))
                    }
                    Err(source) => Err(SceneError::Fill { line, source }),
                }
            }
        }
    }
}

fn color_at(line: usize, value: &str) -> Result<Color, SceneError> {
    parse_color(value).map_err(|source| SceneError::Color { line, source })
}

/// Parse and replay a scene in one step.
pub fn render_scene<R: Read>(
    reader: R,
    config: &PxfillConfig,
) -> Result<RenderedScene, SceneError> {
    let scene = parse_scene(reader, config.output.strict)?;
    SceneRenderer::new(config)?.render(&scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, BLUE, RED, WHITE};
    use image::Rgba;

    const GREEN: Color = Rgba([0, 255, 0, 255]);

    fn render(text: &str) -> RenderedScene {
        render_scene(text.as_bytes(), &PxfillConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_line_variants() {
        let op = parse_line(r#"{"type": "canvas", "width": 10, "height": 20}"#, 1).unwrap();
        assert_eq!(op, SceneOp::Canvas { width: 10, height: 20, background: None });

        let op = parse_line(r#"{"type": "flood", "seed": [3, 4], "fill": "red"}"#, 1).unwrap();
        assert_eq!(
            op,
            SceneOp::Flood { seed: [3, 4], fill: Some("red".to_string()), border: None }
        );

        let op = parse_line(r#"{"type": "parity", "rule": "opaque"}"#, 1).unwrap();
        assert_eq!(op, SceneOp::Parity { fill: None, border: None, rule: Some(BorderMode::Opaque) });
    }

    #[test]
    fn test_parse_line_unknown_type() {
        let err = parse_line(r#"{"type": "circle", "r": 4}"#, 7).unwrap_err();
        match err {
            SceneError::Parse { line, .. } => assert_eq!(line, 7),
            other => panic!("Expected parse error, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_scene_lenient_collects_warnings() {
        let text = "{\"type\": \"canvas\", \"width\": 4, \"height\": 4}\n\nnot json\n{\"type\": \"parity\"}\n";
        let scene = parse_scene(text.as_bytes(), false).unwrap();
        assert_eq!(scene.ops.len(), 2);
        assert_eq!(scene.ops[1].line, 4);
        assert_eq!(scene.warnings.len(), 1);
        assert!(scene.warnings[0].message.starts_with("line 3:"));
    }

    #[test]
    fn test_parse_scene_strict_fails() {
        let text = "{\"type\": \"canvas\", \"width\": 4, \"height\": 4}\n{\"type\": \"flood\"}\n";
        let result = parse_scene(text.as_bytes(), true);
        assert!(matches!(result, Err(SceneError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_render_outline_then_parity() {
        let rendered = render(
            r#"{"type": "canvas", "width": 12, "height": 12}
{"type": "stroke", "points": [[2, 2], [9, 2], [9, 9], [2, 9]], "closed": true}
{"type": "parity"}"#,
        );
        assert_eq!(rendered.canvas.count_color(BLUE), 36);
        assert_eq!(rendered.canvas.get(5, 5), Ok(BLUE));
        assert_eq!(rendered.canvas.get(2, 5), Ok(BLACK));
        assert!(rendered.report.warnings.is_empty());
    }

    #[test]
    fn test_render_flood_with_colors() {
        let rendered = render(
            r##"{"type": "canvas", "width": 8, "height": 8, "background": "#000000"}
{"type": "stroke", "points": [[4, 0], [4, 7]], "color": "#FFFFFF"}
{"type": "flood", "seed": [0, 0], "fill": "#00FF00", "border": "#FFFFFF"}"##,
        );
        assert_eq!(rendered.canvas.count_color(GREEN), 32);
        assert_eq!(rendered.canvas.count_color(WHITE), 8);
        assert_eq!(rendered.canvas.count_color(BLACK), 24);
    }

    #[test]
    fn test_render_triangle_defaults() {
        let rendered = render(
            r#"{"type": "canvas", "width": 200, "height": 200}
{"type": "triangle", "vertices": [[10, 70], [50, 160], [70, 80]]}"#,
        );
        assert_eq!(rendered.canvas.get(40, 110), Ok(RED));
        assert_eq!(rendered.canvas.get(5, 75), Ok(WHITE));
        assert_eq!(rendered.canvas.get(50, 160), Ok(BLACK));
    }

    #[test]
    fn test_render_seed_on_boundary_is_warning() {
        let rendered = render(
            r#"{"type": "canvas", "width": 6, "height": 6}
{"type": "stroke", "points": [[3, 0], [3, 5]]}
{"type": "flood", "seed": [3, 2]}
{"type": "flood", "seed": [0, 0]}"#,
        );
        assert_eq!(rendered.report.warnings.len(), 1);
        assert!(rendered.report.warnings[0].message.starts_with("line 3: seed (3, 2) is on a boundary"));
        assert_eq!(rendered.canvas.count_color(BLUE), 18);
    }

    #[test]
    fn test_render_flood_out_of_bounds_aborts() {
        let result = render_scene(
            r#"{"type": "canvas", "width": 4, "height": 4}
{"type": "flood", "seed": [9, 9]}"#
                .as_bytes(),
            &PxfillConfig::default(),
        );
        assert!(matches!(result, Err(SceneError::Fill { line: 2, .. })));
    }

    #[test]
    fn test_render_without_canvas_uses_config() {
        let mut config = PxfillConfig::default();
        config.canvas.width = 16;
        config.canvas.height = 8;
        let rendered =
            render_scene(r#"{"type": "parity"}"#.as_bytes(), &config).unwrap();
        assert_eq!(rendered.canvas.width(), 16);
        assert_eq!(rendered.canvas.height(), 8);
        // One for the missing canvas, one for the parity fill that found no border
        assert_eq!(rendered.report.warnings.len(), 2);
    }

    #[test]
    fn test_render_without_canvas_strict_fails() {
        let mut config = PxfillConfig::default();
        config.output.strict = true;
        let result = render_scene(r#"{"type": "parity"}"#.as_bytes(), &config);
        assert!(matches!(result, Err(SceneError::MissingCanvas { line: 1 })));
    }

    #[test]
    fn test_render_second_canvas_ignored() {
        let rendered = render(
            r#"{"type": "canvas", "width": 4, "height": 4}
{"type": "canvas", "width": 9, "height": 9}"#,
        );
        assert_eq!(rendered.canvas.width(), 4);
        assert_eq!(rendered.report.warnings.len(), 1);
        assert!(rendered.report.warnings[0].message.starts_with("line 2:"));
    }

    #[test]
    fn test_render_bad_color() {
        let result = render_scene(
            r##"{"type": "canvas", "width": 4, "height": 4}
{"type": "stroke", "points": [[0, 0]], "color": "#XYZ"}"##
                .as_bytes(),
            &PxfillConfig::default(),
        );
        assert!(matches!(result, Err(SceneError::Color { line: 2, .. })));
    }

    #[test]
    fn test_render_empty_canvas_rejected() {
        let result = render_scene(
            r#"{"type": "canvas", "width": 0, "height": 4}"#.as_bytes(),
            &PxfillConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SceneError::Canvas { line: 1, source: CanvasError::EmptyCanvas { .. } })
        ));
    }

    #[test]
    fn test_render_huge_canvas_rejected() {
        let result = render_scene(
            r#"{"type": "canvas", "width": 4294967295, "height": 4294967295}"#.as_bytes(),
            &PxfillConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SceneError::Canvas { line: 1, source: CanvasError::TooLarge { .. } })
        ));
    }

    #[test]
    fn test_render_empty_scene() {
        let rendered = render("");
        assert_eq!(rendered.canvas.width(), 200);
        assert!(rendered.report.warnings.is_empty());
        assert_eq!(rendered.canvas.count_color(WHITE), 200 * 200);
    }
}
