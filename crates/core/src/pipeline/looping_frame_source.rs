use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

/// Endless frame supply over an opened [`VideoReader`].
///
/// End of stream rewinds to the first frame; read and decode errors are
/// returned unchanged. A source that produces nothing right after a rewind
/// is reported as an error instead of spinning forever.
pub struct LoopingFrameSource {
    reader: Box<dyn VideoReader>,
    loops: usize,
}

impl LoopingFrameSource {
    /// Wraps a reader that has already been opened.
    pub fn new(reader: Box<dyn VideoReader>) -> Self {
        Self { reader, loops: 0 }
    }

    pub fn next_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        if let Some(frame) = self.reader.read_frame()? {
            return Ok(frame);
        }

        self.reader.rewind()?;
        self.loops += 1;
        log::debug!("End of stream, rewound (pass {})", self.loops + 1);

        self.reader
            .read_frame()?
            .ok_or_else(|| "video contains no decodable frames".into())
    }

    /// Number of times the source has wrapped back to the start.
    pub fn loops(&self) -> usize {
        self.loops
    }

    pub fn close(&mut self) {
        self.reader.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::video_metadata::VideoMetadata;
    use std::path::Path;

    /// In-memory reader; `fail_at` makes the read of that position fail.
    struct ScriptedReader {
        frames: Vec<Frame>,
        cursor: usize,
        fail_at: Option<usize>,
        rewinds: usize,
    }

    impl ScriptedReader {
        fn with_frames(count: usize) -> Self {
            Self {
                frames: (0..count)
                    .map(|i| Frame::new(vec![i as u8; 2 * 2 * 3], 2, 2, 3, i))
                    .collect(),
                cursor: 0,
                fail_at: None,
                rewinds: 0,
            }
        }
    }

    impl VideoReader for ScriptedReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            unreachable!("tests construct the reader already open")
        }

        fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            if self.fail_at == Some(self.cursor) {
                return Err("corrupt packet".into());
            }
            let frame = self.frames.get(self.cursor).cloned();
            if frame.is_some() {
                self.cursor += 1;
            }
            Ok(frame)
        }

        fn rewind(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            self.cursor = 0;
            self.rewinds += 1;
            Ok(())
        }

        fn close(&mut self) {}
    }

    #[test]
    fn test_rewinds_at_end_of_stream() {
        let mut source = LoopingFrameSource::new(Box::new(ScriptedReader::with_frames(3)));
        let indices: Vec<usize> = (0..7)
            .map(|_| source.next_frame().unwrap().index())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(source.loops(), 2);
    }

    #[test]
    fn test_single_frame_source_repeats() {
        let mut source = LoopingFrameSource::new(Box::new(ScriptedReader::with_frames(1)));
        for _ in 0..4 {
            assert_eq!(source.next_frame().unwrap().index(), 0);
        }
        assert_eq!(source.loops(), 3);
    }

    #[test]
    fn test_read_error_is_not_masked_by_rewind() {
        let mut reader = ScriptedReader::with_frames(3);
        reader.fail_at = Some(1);
        let mut source = LoopingFrameSource::new(Box::new(reader));

        assert_eq!(source.next_frame().unwrap().index(), 0);
        let err = source.next_frame().unwrap_err();
        assert_eq!(err.to_string(), "corrupt packet");
        assert_eq!(source.loops(), 0);
    }

    #[test]
    fn test_empty_video_is_an_error() {
        let mut source = LoopingFrameSource::new(Box::new(ScriptedReader::with_frames(0)));
        let err = source.next_frame().unwrap_err();
        assert_eq!(err.to_string(), "video contains no decodable frames");
    }
}
