/// Parking space rectangle size in frame pixels.
pub const SPACE_WIDTH: u32 = 107;
pub const SPACE_HEIGHT: u32 = 48;

/// Foreground pixel count at or above which a space is occupied.
///
/// Empirical value tuned for 107x48 spaces; not derived from the area.
pub const OCCUPIED_PIXEL_THRESHOLD: usize = 900;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov"];
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const DEFAULT_VIDEO_DIR: &str = "videos";
pub const DEFAULT_IMAGE_DIR: &str = "img";
pub const REFERENCE_IMAGE_EXTENSION: &str = "png";

/// Position files tried in order; the first non-empty one wins.
pub const DEFAULT_POSITION_CANDIDATES: &[&str] = &["polygons", "CarParkPos"];

/// Slider range and defaults for the threshold controls.
pub const TRACKBAR_MAX: u32 = 50;
pub const DEFAULT_BLOCK_SIZE: u32 = 25;
pub const DEFAULT_CONSTANT: u32 = 16;
pub const DEFAULT_BLUR_SIZE: u32 = 5;
