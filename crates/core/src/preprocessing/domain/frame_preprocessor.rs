use thiserror::Error;

use crate::preprocessing::domain::threshold_params::ThresholdParams;
use crate::shared::frame::Frame;
use crate::shared::mask::Mask;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("{name} must be an odd integer >= 3, got {value}")]
    InvalidKernel { name: &'static str, value: u32 },
    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u8),
}

/// Turns a color frame into a binary occupancy mask.
///
/// Implementations must be pure: the same frame and parameters always
/// yield the same mask, with the frame's width and height.
pub trait FramePreprocessor {
    fn preprocess(&self, frame: &Frame, params: &ThresholdParams) -> Result<Mask, PreprocessError>;
}
