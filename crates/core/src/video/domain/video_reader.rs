use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Pull-based frame source over a video or image file.
///
/// End of stream and decode failures are kept apart: `Ok(None)` means the
/// source is exhausted, `Err` means a frame could not be produced.
pub trait VideoReader {
    /// Opens a video or image file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Decodes the next frame as RGB, or `None` at end of stream.
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Seeks back to the first frame; frame indices restart at 0.
    fn rewind(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
