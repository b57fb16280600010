use crate::preprocessing::domain::frame_preprocessor::{FramePreprocessor, PreprocessError};
use crate::preprocessing::domain::threshold_params::ThresholdParams;
use crate::shared::frame::Frame;
use crate::shared::mask::Mask;

use super::filters::{self, Border};

/// Fixed pre-threshold smoothing: 3x3 kernel, sigma 1.
const PRE_BLUR_SIZE: usize = 3;
const PRE_BLUR_SIGMA: f64 = 1.0;

/// CPU binarization pipeline:
/// grayscale → Gaussian blur → inverse adaptive threshold → median blur → dilate.
pub struct CpuPreprocessor {
    pre_blur_kernel: Vec<f32>,
}

impl CpuPreprocessor {
    pub fn new() -> Self {
        Self {
            pre_blur_kernel: filters::gaussian_kernel_1d(PRE_BLUR_SIZE, PRE_BLUR_SIGMA),
        }
    }
}

impl Default for CpuPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePreprocessor for CpuPreprocessor {
    fn preprocess(&self, frame: &Frame, params: &ThresholdParams) -> Result<Mask, PreprocessError> {
        if frame.is_empty() {
            return Err(PreprocessError::EmptyFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }
        let channels = frame.channels();
        if !matches!(channels, 1 | 3 | 4) {
            return Err(PreprocessError::UnsupportedChannels(channels));
        }

        let gray = filters::grayscale(
            frame.data(),
            frame.width() as usize,
            frame.height() as usize,
            channels as usize,
        );
        let blurred = filters::separable_blur(gray.view(), &self.pre_blur_kernel, Border::Reflect101);
        let thresholded = filters::adaptive_threshold_gaussian_inv(
            blurred.view(),
            params.block_size() as usize,
            params.constant(),
        );
        let denoised = filters::median_blur(thresholded.view(), params.blur_size() as usize);
        Ok(Mask::from_array(filters::dilate_3x3(denoised.view())))
    }
}
