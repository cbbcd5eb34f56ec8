//! PNG export of canvas snapshots

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Scaled size does not fit in memory
    #[error("scaling {width}x{height} by {factor} is too large")]
    ScaleTooLarge { width: u32, height: u32, factor: u32 },
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    tracing::debug!(path = %path.display(), "saved png");
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Pixel edges stay crisp, so every canvas pixel becomes a `factor x factor`
/// block. A factor of 0 or 1 returns the image unchanged. Fails when the
/// scaled dimensions or buffer size overflow.
pub fn scale_image(image: RgbaImage, factor: u32) -> Result<RgbaImage, OutputError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (w, h) = image.dimensions();
    let too_large = || OutputError::ScaleTooLarge { width: w, height: h, factor };
    let width = w.checked_mul(factor).ok_or_else(too_large)?;
    let height = h.checked_mul(factor).ok_or_else(too_large)?;
    let fits = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !fits {
        return Err(too_large());
    }
    Ok(image::imageops::resize(&image, width, height, FilterType::Nearest))
}

/// Output path for a rendered input file.
///
/// An explicit `-o` path wins; a path ending in `/` or naming an existing
/// directory receives `{input_stem}.png`. Without `-o`, the PNG is written
/// next to the input.
pub fn output_path_for(input: &Path, output_arg: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("canvas");
    let file_name = format!("{}.png", stem);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => input.with_file_name(file_name),
    }
}
