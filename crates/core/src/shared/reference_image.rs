use std::path::{Path, PathBuf};

use crate::shared::constants::REFERENCE_IMAGE_EXTENSION;

/// Locates the still image paired with a video by naming convention:
/// `<image_dir>/<video stem>.png`.
///
/// Returns `None` when the video has no file stem or the image doesn't exist.
pub fn find_reference_image(video: &Path, image_dir: &Path) -> Option<PathBuf> {
    let mut file_name = video.file_stem()?.to_os_string();
    file_name.push(".");
    file_name.push(REFERENCE_IMAGE_EXTENSION);
    let candidate = image_dir.join(file_name);
    candidate.is_file().then_some(candidate)
}
