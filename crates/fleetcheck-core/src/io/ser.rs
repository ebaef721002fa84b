use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use image::{Rgb, RgbImage};
use memmap2::Mmap;

use crate::error::{InspectError, Result};
use crate::frame::Capture;

pub const SER_HEADER_SIZE: usize = 178;
pub const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";

/// Pixel layout declared in a SER header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    BayerRGGB,
    BayerGRBG,
    BayerGBRG,
    BayerBGGR,
    RGB,
    BGR,
}

impl ColorMode {
    pub fn is_bayer(&self) -> bool {
        matches!(
            self,
            Self::BayerRGGB | Self::BayerGRBG | Self::BayerGBRG | Self::BayerBGGR
        )
    }
}

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
    pub observer: String,
    pub instrument: String,
    pub telescope: String,
    pub date_time: u64,
    pub date_time_utc: u64,
}

impl SerHeader {
    /// Bytes per pixel plane (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel_plane(&self) -> usize {
        if self.pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Number of planes per pixel (1 for mono/bayer, 3 for RGB/BGR).
    pub fn planes_per_pixel(&self) -> usize {
        match self.color_id {
            100 | 101 => 3,
            _ => 1,
        }
    }

    /// Total bytes per frame, or `None` if the size overflows.
    pub fn frame_byte_size(&self) -> Option<usize> {
        let pixels = (self.width as usize).checked_mul(self.height as usize)?;
        pixels.checked_mul(self.bytes_per_pixel_plane() * self.planes_per_pixel())
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.color_id {
            0 => ColorMode::Mono,
            8 => ColorMode::BayerRGGB,
            9 => ColorMode::BayerGRBG,
            10 => ColorMode::BayerGBRG,
            11 => ColorMode::BayerBGGR,
            100 => ColorMode::RGB,
            101 => ColorMode::BGR,
            _ => ColorMode::Mono,
        }
    }
}

/// Memory-mapped SER video reader.
///
/// The mapping is released when the reader is dropped.
pub struct SerReader {
    mmap: Mmap,
    pub header: SerHeader,
    frame_size: usize,
}

impl SerReader {
    /// Open a SER file and validate its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and owned by this reader; captures
        // copy the bytes out, so no reference outlives the map.
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(InspectError::Decode("file too small for SER header".into()));
        }
        if &mmap[0..14] != SER_MAGIC {
            return Err(InspectError::Decode("missing LUCAM-RECORDER magic".into()));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;
        if header.color_mode().is_bayer() {
            return Err(InspectError::UnsupportedColorMode(format!(
                "{:?} (raw Bayer frames are not supported)",
                header.color_mode()
            )));
        }
        if header.pixel_depth == 0 || header.pixel_depth > 16 {
            return Err(InspectError::Decode(format!(
                "unsupported pixel depth {}",
                header.pixel_depth
            )));
        }

        let frame_size = header
            .frame_byte_size()
            .ok_or_else(|| InspectError::Decode("frame size overflows".into()))?;
        let expected = frame_size
            .checked_mul(header.frame_count as usize)
            .and_then(|n| n.checked_add(SER_HEADER_SIZE))
            .ok_or_else(|| InspectError::Decode("file size overflows".into()))?;
        if mmap.len() < expected {
            return Err(InspectError::Decode(format!(
                "file truncated: expected at least {} bytes, got {}",
                expected,
                mmap.len()
            )));
        }

        Ok(Self {
            mmap,
            header,
            frame_size,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(InspectError::Decode(format!(
                "frame index {index} out of range (total: {count})"
            )));
        }
        let offset = SER_HEADER_SIZE + index * self.frame_size;
        Ok(&self.mmap[offset..offset + self.frame_size])
    }

    /// Decode a single frame into an 8-bit RGB capture.
    ///
    /// Mono frames are replicated to all three channels; samples deeper than
    /// 8 bits are scaled down to 8.
    pub fn read_frame(&self, index: usize) -> Result<Capture> {
        let raw = self.frame_raw(index)?;
        let w = self.header.width;
        let h = self.header.height;
        let bpp = self.header.bytes_per_pixel_plane();
        let planes = self.header.planes_per_pixel();
        let max_val = ((1u32 << self.header.pixel_depth) - 1) as f32;
        let little_endian = self.header.little_endian;

        let sample = |idx: usize| -> u8 {
            let val = if bpp == 1 {
                raw[idx] as f32
            } else {
                let pair = [raw[idx], raw[idx + 1]];
                if little_endian {
                    u16::from_le_bytes(pair) as f32
                } else {
                    u16::from_be_bytes(pair) as f32
                }
            };
            (val / max_val * 255.0).round().clamp(0.0, 255.0) as u8
        };

        let mode = self.header.color_mode();
        let pixels = RgbImage::from_fn(w, h, |x, y| {
            let base = (y as usize * w as usize + x as usize) * planes * bpp;
            match mode {
                ColorMode::RGB => Rgb([sample(base), sample(base + bpp), sample(base + 2 * bpp)]),
                ColorMode::BGR => Rgb([sample(base + 2 * bpp), sample(base + bpp), sample(base)]),
                _ => {
                    let v = sample(base);
                    Rgb([v, v, v])
                }
            }
        });

        Ok(Capture::new(pixels).with_frame_index(index))
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()?;
    let height = cursor.read_i32::<LittleEndian>()?;
    let pixel_depth = cursor.read_i32::<LittleEndian>()? as u32;
    let frame_count = cursor.read_i32::<LittleEndian>()?.max(0) as u32;

    let observer = read_fixed_string(&buf[42..82]);
    let instrument = read_fixed_string(&buf[82..122]);
    let telescope = read_fixed_string(&buf[122..162]);

    let mut cursor = std::io::Cursor::new(&buf[162..]);
    let date_time = cursor.read_u64::<LittleEndian>()?;
    let date_time_utc = cursor.read_u64::<LittleEndian>()?;

    if width <= 0 || height <= 0 {
        return Err(InspectError::Decode(format!(
            "invalid SER dimensions {width}x{height}"
        )));
    }

    // Many writers (FireCapture, Siril) use 0 for little-endian despite the
    // format description; only an explicit 1 means big-endian.
    let little_endian = le_flag != 1;

    Ok(SerHeader {
        color_id,
        little_endian,
        width: width as u32,
        height: height as u32,
        pixel_depth,
        frame_count,
        observer,
        instrument,
        telescope,
        date_time,
        date_time_utc,
    })
}

fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}
