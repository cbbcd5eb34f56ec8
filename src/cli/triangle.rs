//! Triangle command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::canvas::PixelCanvas;
use crate::config::CliOverrides;
use crate::output::{save_png, scale_image};
use crate::shapes::{Point, Triangle};
use crate::triangle::draw_triangle;

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Triangle drawn when no vertices are given
pub const DEFAULT_TRIANGLE: [Point; 3] = [Point::new(10, 70), Point::new(50, 160), Point::new(70, 80)];

/// Parse an `x,y` vertex argument.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("invalid x in '{}': {}", s, e))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("invalid y in '{}': {}", s, e))?;
    Ok(Point::new(x, y))
}

/// Execute the triangle command
pub fn run_triangle(
    vertices: &[String],
    output: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let points = if vertices.is_empty() {
        DEFAULT_TRIANGLE
    } else {
        let parsed: Result<Vec<Point>, String> = vertices.iter().map(|v| parse_point(v)).collect();
        match parsed.as_deref() {
            Ok(&[a, b, c]) => [a, b, c],
            Ok(other) => {
                eprintln!("Error: expected 3 vertices, got {}", other.len());
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    };

    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let palette = match config.palette() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut canvas =
        match PixelCanvas::new(config.canvas.width, config.canvas.height, palette.background) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

    let [t0, t1, t2] = points;
    let triangle = Triangle::new(t0, t1, t2);
    let report = match draw_triangle(
        &mut canvas,
        &triangle,
        palette.stroke,
        palette.triangle,
        config.stroke.thickness,
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let image = match scale_image(canvas.into_image(), config.output.scale) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if let Err(e) = save_png(&image, output) {
        eprintln!("Error: Failed to save '{}': {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", output.display());

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    ExitCode::from(EXIT_SUCCESS)
}
