use image::{imageops, GrayImage, Luma, RgbImage};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::{InspectError, Result};

/// A single 8-bit RGB still image or decoded video frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Capture {
    /// Pixel data, row-major RGB.
    pub pixels: RgbImage,
    /// Position in the source stream, for frames decoded from a video.
    pub frame_index: Option<usize>,
}

impl Capture {
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            pixels,
            frame_index: None,
        }
    }

    pub fn with_frame_index(mut self, index: usize) -> Self {
        self.frame_index = Some(index);
        self
    }

    /// Decode an encoded image (JPEG, PNG, ...) into a capture.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| InspectError::Decode(e.to_string()))?;
        Ok(Self::new(img.to_rgb8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Return a copy resized to `width`x`height` with bilinear filtering.
    ///
    /// Returns the capture unchanged (cloned) when it already has those dimensions.
    pub fn resized_to(&self, width: u32, height: u32) -> Result<Capture> {
        if self.is_empty() || width == 0 || height == 0 {
            return Err(InspectError::DimensionMismatch {
                reference_width: width,
                reference_height: height,
                width: self.width(),
                height: self.height(),
            });
        }
        if self.dimensions() == (width, height) {
            return Ok(self.clone());
        }
        let pixels = imageops::resize(&self.pixels, width, height, imageops::FilterType::Triangle);
        Ok(Capture {
            pixels,
            frame_index: self.frame_index,
        })
    }
}

/// A capture after illumination correction. Same dimensions as its source.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedFrame {
    pub pixels: RgbImage,
}

impl NormalizedFrame {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// 8-bit intensity plane using ITU-R BT.601 weights, shape = (height, width).
    pub fn intensity(&self) -> Array2<u8> {
        let (w, h) = self.pixels.dimensions();
        Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
            let p = self.pixels.get_pixel(col as u32, row as u32).0;
            let y = LUMINANCE_R * p[0] as f32 + LUMINANCE_G * p[1] as f32 + LUMINANCE_B * p[2] as f32;
            y.round().clamp(0.0, 255.0) as u8
        })
    }
}

/// Binary change raster. `true` marks a changed pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeMask {
    /// Shape = (height, width).
    pub data: Array2<bool>,
}

impl ChangeMask {
    pub fn new(data: Array2<bool>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Total number of changed pixels.
    pub fn changed_pixels(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn is_clear(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Render as an 8-bit grayscale image: 255 for changed, 0 otherwise.
    pub fn to_image(&self) -> GrayImage {
        let (h, w) = self.data.dim();
        GrayImage::from_fn(w as u32, h as u32, |x, y| {
            Luma([if self.data[[y as usize, x as usize]] { 255 } else { 0 }])
        })
    }
}

/// A connected, area-filtered cluster of changed pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Number of pixels enclosed by the region's outer boundary.
    pub area: usize,
}
