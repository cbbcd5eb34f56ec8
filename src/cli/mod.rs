//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod render;
mod triangle;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PxfillConfig};

pub use triangle::{parse_point, DEFAULT_TRIANGLE};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// pxfill - Rasterize triangles and fill outlines, written to PNG
#[derive(Parser)]
#[command(name = "pxfill")]
#[command(about = "pxfill - Rasterize triangles and fill outlines on a pixel canvas")]
#[command(version)]
pub struct Cli {
    /// Log engine activity to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSONL scene file and save the canvas as PNG
    Render {
        /// Scene file, one operation per line
        input: PathBuf,

        /// Output file or directory (default: {input_stem}.png next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor
        #[arg(long)]
        scale: Option<u32>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Stroke thickness in pixels for strokes without their own
        #[arg(long)]
        thickness: Option<u32>,

        /// Path to pxfill.toml (default: discovered from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Outline and fill a single triangle on a fresh canvas
    Triangle {
        /// Three vertices as x,y (default: 10,70 50,160 70,80).
        /// Put negative vertices after `--`, e.g. `-o out.png -- -5,3 10,10 0,20`
        #[arg(num_args = 3, value_name = "X,Y")]
        vertices: Vec<String>,

        /// Output PNG path
        #[arg(short, long, default_value = "triangle.png")]
        output: PathBuf,

        /// Scale output by integer factor
        #[arg(long)]
        scale: Option<u32>,

        /// Outline thickness in pixels
        #[arg(long)]
        thickness: Option<u32>,

        /// Path to pxfill.toml (default: discovered from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for pxfill itself with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,pxfill=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded; keep that one
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Load configuration and apply command-line overrides.
///
/// Prints the error and returns the exit code on failure.
pub(crate) fn resolve_config(
    path: Option<&std::path::Path>,
    overrides: &CliOverrides,
) -> Result<PxfillConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render { input, output, scale, strict, thickness, config } => {
            let overrides = CliOverrides { scale, strict: strict.then_some(true), thickness };
            render::run_render(&input, output.as_deref(), config.as_deref(), &overrides)
        }
        Commands::Triangle { vertices, output, scale, thickness, config } => {
            let overrides = CliOverrides { scale, thickness, ..Default::default() };
            triangle::run_triangle(&vertices, &output, config.as_deref(), &overrides)
        }
    }
}
