//! Configuration schema types for `pxfill.toml`
//!
//! Every section is optional; missing values fall back to the defaults the
//! command-line tool has always used (a 200x200 white canvas, black 1px
//! strokes, red triangles, blue region fills).

use crate::color::{parse_color, Color};
use crate::parity::BorderMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canvas created for scenes that do not declare one and for `pxfill triangle`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_size")]
    pub width: u32,
    #[serde(default = "default_canvas_size")]
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            background: default_background(),
        }
    }
}

fn default_canvas_size() -> u32 {
    200
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

/// Outline strokes (freehand strokes and triangle outlines)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeConfig {
    /// Stroke color, also the border color fills stop at
    #[serde(default = "default_stroke_color")]
    pub color: String,
    #[serde(default = "default_thickness")]
    pub thickness: u32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self { color: default_stroke_color(), thickness: default_thickness() }
    }
}

fn default_stroke_color() -> String {
    "#000000".to_string()
}

fn default_thickness() -> u32 {
    1
}

/// Fill colors and the border classification used by parity fills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Triangle interior color
    #[serde(default = "default_triangle_fill")]
    pub triangle: String,
    /// Parity and flood fill color
    #[serde(default = "default_region_fill")]
    pub region: String,
    #[serde(default)]
    pub rule: BorderMode,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            triangle: default_triangle_fill(),
            region: default_region_fill(),
            rule: BorderMode::default(),
        }
    }
}

fn default_triangle_fill() -> String {
    "#FF0000".to_string()
}

fn default_region_fill() -> String {
    "#0000FF".to_string()
}

/// PNG output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Integer upscale factor
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Treat scene warnings as errors
    #[serde(default)]
    pub strict: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { scale: default_scale(), strict: false }
    }
}

fn default_scale() -> u32 {
    1
}

/// Root of `pxfill.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PxfillConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub stroke: StrokeConfig,
    #[serde(default)]
    pub fill: FillConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// A single configuration problem
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Parsed colors of a configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub stroke: Color,
    pub triangle: Color,
    pub region: Color,
}

impl PxfillConfig {
    /// Collect every problem with this configuration.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let mut positive = |field: &str, value: u32| {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        };
        positive("canvas.width", self.canvas.width);
        positive("canvas.height", self.canvas.height);
        positive("stroke.thickness", self.stroke.thickness);
        positive("output.scale", self.output.scale);

        for (field, value) in self.color_fields() {
            if let Err(e) = parse_color(value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("invalid color '{}': {}", value, e),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Parse the configured colors.
    ///
    /// Returns the first field that fails to parse. Loaded configs have
    /// already been validated, so this only fails for hand-built ones.
    pub fn palette(&self) -> Result<Palette, ConfigValidationError> {
        let parse = |field: &str, value: &str| {
            parse_color(value).map_err(|e| ConfigValidationError {
                field: field.to_string(),
                message: format!("invalid color '{}': {}", value, e),
            })
        };
        Ok(Palette {
            background: parse("canvas.background", &self.canvas.background)?,
            stroke: parse("stroke.color", &self.stroke.color)?,
            triangle: parse("fill.triangle", &self.fill.triangle)?,
            region: parse("fill.region", &self.fill.region)?,
        })
    }

    fn color_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("canvas.background", self.canvas.background.as_str()),
            ("stroke.color", self.stroke.color.as_str()),
            ("fill.triangle", self.fill.triangle.as_str()),
            ("fill.region", self.fill.region.as_str()),
        ]
    }
}
