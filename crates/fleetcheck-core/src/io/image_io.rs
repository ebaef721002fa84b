use std::fs;
use std::path::Path;

use image::ImageFormat;

use crate::error::Result;
use crate::frame::{Capture, ChangeMask};

/// Load any still image the `image` crate can decode into an RGB capture.
///
/// The format is detected from the file contents, not the extension.
pub fn load_capture(path: &Path) -> Result<Capture> {
    let bytes = fs::read(path)?;
    Capture::decode(&bytes)
}

/// Save a capture as 8-bit RGB PNG, creating parent directories as needed.
pub fn save_capture(capture: &Capture, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    capture.pixels.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a change mask as 8-bit grayscale PNG (255 = changed).
pub fn save_mask(mask: &ChangeMask, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    mask.to_image().save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a capture, choosing the format from the file extension (PNG otherwise).
pub fn save_image(capture: &Capture, path: &Path) -> Result<()> {
    let format = path
        .extension()
        .and_then(|e| ImageFormat::from_extension(e))
        .unwrap_or(ImageFormat::Png);
    ensure_parent(path)?;
    capture.pixels.save_with_format(path, format)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
