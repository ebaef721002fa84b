pub mod image_io;
pub mod ser;
pub mod video;

pub use image_io::{load_capture, save_capture, save_image, save_mask};
pub use ser::{ColorMode, SerHeader, SerReader};
pub use video::{open_video, FrameSource, SourceFormat, SourceInfo};
