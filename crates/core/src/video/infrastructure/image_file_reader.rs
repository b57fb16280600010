use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

/// Adapts a single image file to the [`VideoReader`] interface.
///
/// Treats the image as a one-frame video with `fps=0` and `total_frames=1`.
/// The frame is yielded once per pass; `rewind` makes it available again, so
/// a looping source shows the still indefinitely.
pub struct ImageFileReader {
    frame: Option<Frame>,
    consumed: bool,
}

impl ImageFileReader {
    pub fn new() -> Self {
        Self {
            frame: None,
            consumed: false,
        }
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for ImageFileReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        let img = image::open(path)?.into_rgb8();
        let frame = Frame::from_rgb_image(img, 0);

        let metadata = VideoMetadata {
            width: frame.width(),
            height: frame.height(),
            fps: 0.0,
            total_frames: 1,
            codec: String::new(),
            source_path: Some(path.to_path_buf()),
        };
        self.frame = Some(frame);
        self.consumed = false;
        Ok(metadata)
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(frame) = self.frame.as_ref() else {
            return Err("ImageFileReader: not opened".into());
        };
        if self.consumed {
            return Ok(None);
        }
        self.consumed = true;
        Ok(Some(frame.clone()))
    }

    fn rewind(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.frame.is_none() {
            return Err("ImageFileReader: not opened".into());
        }
        self.consumed = false;
        Ok(())
    }

    fn close(&mut self) {
        self.frame = None;
        self.consumed = false;
    }
}
