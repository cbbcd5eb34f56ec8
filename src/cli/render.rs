//! Render command implementation

use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::output::{output_path_for, save_png, scale_image};
use crate::scene::{parse_scene, SceneRenderer};

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let strict = config.output.strict;

    let file = match File::open(input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    // Malformed lines are collected here and judged below with the other warnings
    let scene = match parse_scene(file, false) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // In strict mode, parse warnings are fatal
    if strict && !scene.warnings.is_empty() {
        for warning in &scene.warnings {
            eprintln!("Error: {}", warning);
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let renderer = match SceneRenderer::new(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let rendered = match renderer.render(&scene) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // In strict mode, replay warnings are fatal
    if strict && !rendered.report.warnings.is_empty() {
        for warning in &rendered.report.warnings {
            eprintln!("Error: {}", warning);
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let image = match scale_image(rendered.canvas.into_image(), config.output.scale) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let output_path = output_path_for(input, output);
    if let Err(e) = save_png(&image, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", output_path.display());

    for warning in &rendered.report.warnings {
        eprintln!("Warning: {}", warning);
    }

    ExitCode::from(EXIT_SUCCESS)
}
