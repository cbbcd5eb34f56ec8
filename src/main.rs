//! pxfill - Command-line tool for rasterizing triangles and filling outlines

use std::process::ExitCode;

use pxfill::cli;

fn main() -> ExitCode {
    cli::run()
}
