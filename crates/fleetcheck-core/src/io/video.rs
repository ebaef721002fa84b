use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, Frames, ImageDecoder, ImageFormat};

use crate::error::{InspectError, Result};
use crate::frame::Capture;

use super::image_io::load_capture;
use super::ser::SerReader;

/// Container kind behind a frame source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Ser,
    Gif,
    ImageSequence,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ser => write!(f, "SER"),
            Self::Gif => write!(f, "animated GIF"),
            Self::ImageSequence => write!(f, "image sequence"),
        }
    }
}

/// Metadata about an opened frame source.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub width: u32,
    pub height: u32,
    /// Known up front for SER files and image sequences, not for GIFs.
    pub frame_count: Option<usize>,
}

/// A finite, ordered stream of decoded frames.
pub trait FrameSource: Iterator<Item = Result<Capture>> {
    fn describe(&self) -> &SourceInfo;
}

/// Open a video-like source for sequential frame reading.
///
/// `.ser` files, animated `.gif` files and directories of still images are
/// supported. Failures to open are reported as `VideoOpen`, except for SER
/// color modes that cannot be decoded.
pub fn open_video(path: &Path) -> Result<Box<dyn FrameSource>> {
    if path.is_dir() {
        return Ok(Box::new(ImageSequenceSource::open(path)?));
    }
    if !path.exists() {
        return Err(InspectError::video_open(path, "no such file or directory"));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("ser") => Ok(Box::new(SerSource::open(path)?)),
        Some("gif") => Ok(Box::new(GifSource::open(path)?)),
        Some(other) => Err(InspectError::video_open(
            path,
            format!("unsupported video format '.{other}'"),
        )),
        None => Err(InspectError::video_open(path, "missing file extension")),
    }
}

fn open_failure(path: &Path, err: InspectError) -> InspectError {
    match err {
        InspectError::UnsupportedColorMode(_) | InspectError::VideoOpen { .. } => err,
        other => InspectError::video_open(path, other),
    }
}

/// Frames of a SER file, decoded lazily from the memory map.
pub struct SerSource {
    reader: SerReader,
    info: SourceInfo,
    next: usize,
}

impl SerSource {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = SerReader::open(path).map_err(|e| open_failure(path, e))?;
        let info = SourceInfo {
            path: path.to_path_buf(),
            format: SourceFormat::Ser,
            width: reader.header.width,
            height: reader.header.height,
            frame_count: Some(reader.frame_count()),
        };
        Ok(Self {
            reader,
            info,
            next: 0,
        })
    }
}

impl Iterator for SerSource {
    type Item = Result<Capture>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.reader.frame_count() {
            return None;
        }
        let frame = self.reader.read_frame(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.reader.frame_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl FrameSource for SerSource {
    fn describe(&self) -> &SourceInfo {
        &self.info
    }
}

/// Frames of an animated GIF, composited and converted to RGB.
pub struct GifSource {
    frames: Frames<'static>,
    info: SourceInfo,
    next: usize,
}

impl GifSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| InspectError::video_open(path, e))?;
        let decoder =
            GifDecoder::new(BufReader::new(file)).map_err(|e| InspectError::video_open(path, e))?;
        let (width, height) = decoder.dimensions();
        let info = SourceInfo {
            path: path.to_path_buf(),
            format: SourceFormat::Gif,
            width,
            height,
            frame_count: None,
        };
        Ok(Self {
            frames: decoder.into_frames(),
            info,
            next: 0,
        })
    }
}

impl Iterator for GifSource {
    type Item = Result<Capture>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.next()?;
        let index = self.next;
        self.next += 1;
        Some(
            frame
                .map(|f| {
                    let rgb = DynamicImage::ImageRgba8(f.into_buffer()).to_rgb8();
                    Capture::new(rgb).with_frame_index(index)
                })
                .map_err(InspectError::from),
        )
    }
}

impl FrameSource for GifSource {
    fn describe(&self) -> &SourceInfo {
        &self.info
    }
}

/// Still images in a directory, read in lexicographic file-name order.
pub struct ImageSequenceSource {
    files: Vec<PathBuf>,
    info: SourceInfo,
    next: usize,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|e| InspectError::video_open(dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| InspectError::video_open(dir, e))?.path();
            if path.is_file() && ImageFormat::from_path(&path).is_ok() {
                files.push(path);
            }
        }
        files.sort();

        let Some(first) = files.first() else {
            return Err(InspectError::video_open(dir, "directory contains no images"));
        };
        let (width, height) =
            image::image_dimensions(first).map_err(|e| InspectError::video_open(first, e))?;

        let info = SourceInfo {
            path: dir.to_path_buf(),
            format: SourceFormat::ImageSequence,
            width,
            height,
            frame_count: Some(files.len()),
        };
        Ok(Self {
            files,
            info,
            next: 0,
        })
    }
}

impl Iterator for ImageSequenceSource {
    type Item = Result<Capture>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.get(self.next)?;
        let index = self.next;
        self.next += 1;
        Some(load_capture(path).map(|c| c.with_frame_index(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.files.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl FrameSource for ImageSequenceSource {
    fn describe(&self) -> &SourceInfo {
        &self.info
    }
}
