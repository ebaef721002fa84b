/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Binomial 5-tap smoothing kernel: [1, 4, 6, 4, 1] / 16.
///
/// This is the exact 5x5 Gaussian used when no explicit sigma is given.
pub const BINOMIAL_KERNEL_5: [f32; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Chroma offset for 8-bit YCbCr.
pub const CHROMA_OFFSET: f32 = 128.0;

/// Number of intensity levels in an 8-bit channel.
pub const HISTOGRAM_BINS: usize = 256;

/// Default number of CLAHE tiles along each axis.
pub const DEFAULT_CLAHE_TILE_GRID: usize = 8;

/// Default CLAHE clip limit, relative to a flat histogram.
pub const DEFAULT_CLAHE_CLIP_LIMIT: f32 = 3.0;

/// Default smoothing kernel size applied before differencing.
pub const DEFAULT_BLUR_KERNEL: usize = 5;

/// Default intensity threshold for still-image pairs.
pub const DEFAULT_PAIR_SENSITIVITY: u8 = 35;

/// Default intensity threshold for video frame pairs.
pub const DEFAULT_VIDEO_SENSITIVITY: u8 = 40;

/// Regions must be strictly larger than this many pixels to be reported.
pub const DEFAULT_MIN_REGION_AREA: usize = 600;

/// Changed-pixel count a video pair must exceed to declare damage.
pub const DEFAULT_VIDEO_DAMAGE_THRESHOLD: usize = 15_000;

/// Stroke width of region boxes drawn on annotated captures.
pub const DEFAULT_BOX_THICKNESS: u32 = 3;

/// Stroke color of region boxes drawn on annotated captures (RGB).
pub const DEFAULT_BOX_COLOR: [u8; 3] = [255, 0, 0];

/// Number of most recent history records shown for a single vehicle.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;
