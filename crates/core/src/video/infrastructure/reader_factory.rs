use std::path::Path;

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::video::domain::video_reader::VideoReader;

use super::ffmpeg_reader::FfmpegReader;
use super::image_file_reader::ImageFileReader;

/// Whether `path` names a still image, judged by extension (case-insensitive).
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Picks a reader for `path`: stills go through `image`, everything else
/// through ffmpeg. The reader is returned unopened.
pub fn create_reader(path: &Path) -> Box<dyn VideoReader> {
    if is_image(path) {
        log::debug!("Reading {} as a still image", path.display());
        Box::new(ImageFileReader::new())
    } else {
        Box::new(FfmpegReader::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;
    use crate::video::domain::image_writer::ImageWriter;
    use crate::video::infrastructure::image_file_writer::ImageFileWriter;
    use rstest::rstest;

    #[rstest]
    #[case("img/carPark.png", true)]
    #[case("lot.JPG", true)]
    #[case("lot.webp", true)]
    #[case("videos/carPark.mp4", false)]
    #[case("videos/carPark.MOV", false)]
    #[case("CarParkPos", false)]
    fn test_is_image(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_image(Path::new(path)), expected);
    }

    #[test]
    fn test_image_path_gets_still_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lot.png");
        ImageFileWriter::new()
            .write(&path, &Frame::filled(8, 6, [1, 2, 3]))
            .unwrap();

        let mut reader = create_reader(&path);
        let meta = reader.open(&path).unwrap();
        assert_eq!(meta.total_frames, 1);
        assert_eq!(meta.fps, 0.0);
    }
}
