use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Container-reported frame count; 0 when the container doesn't say.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Delay between frames for real-time playback, falling back to
    /// `fallback_ms` for stills and streams without a frame rate.
    pub fn frame_interval_ms(&self, fallback_ms: u64) -> u64 {
        if self.fps > 0.0 {
            (1000.0 / self.fps).round().max(1.0) as u64
        } else {
            fallback_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(fps: f64) -> VideoMetadata {
        VideoMetadata {
            width: 1100,
            height: 720,
            fps,
            total_frames: 900,
            codec: "h264".to_string(),
            source_path: Some(PathBuf::from("videos/carPark.mp4")),
        }
    }

    #[test]
    fn test_clone_is_equal() {
        let meta = metadata(24.0);
        assert_eq!(meta.clone(), meta);
    }

    #[test]
    fn test_frame_interval_from_fps() {
        assert_eq!(metadata(25.0).frame_interval_ms(33), 40);
        assert_eq!(metadata(30.0).frame_interval_ms(10), 33);
    }

    #[test]
    fn test_frame_interval_fallback_for_stills() {
        assert_eq!(metadata(0.0).frame_interval_ms(33), 33);
    }
}
