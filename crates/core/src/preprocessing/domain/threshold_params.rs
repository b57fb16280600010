use crate::preprocessing::domain::frame_preprocessor::PreprocessError;
use crate::shared::constants::{
    DEFAULT_BLOCK_SIZE, DEFAULT_BLUR_SIZE, DEFAULT_CONSTANT, TRACKBAR_MAX,
};

/// Smallest kernel the adaptive threshold and median blur accept.
pub const MIN_KERNEL_SIZE: u32 = 3;

/// Raw slider positions, before any coercion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackbarValues {
    pub block_size: u32,
    pub constant: u32,
    pub blur: u32,
}

impl Default for TrackbarValues {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            constant: DEFAULT_CONSTANT,
            blur: DEFAULT_BLUR_SIZE,
        }
    }
}

impl TrackbarValues {
    /// Clamps every value to the slider range `0..=TRACKBAR_MAX`.
    pub fn clamped(self) -> Self {
        Self {
            block_size: self.block_size.min(TRACKBAR_MAX),
            constant: self.constant.min(TRACKBAR_MAX),
            blur: self.blur.min(TRACKBAR_MAX),
        }
    }
}

/// Validated parameters for the binarization pipeline.
///
/// `block_size` and `blur_size` are always odd and at least 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdParams {
    block_size: u32,
    constant: i32,
    blur_size: u32,
}

impl ThresholdParams {
    /// Strict constructor: rejects even or too-small kernel sizes.
    pub fn new(block_size: u32, constant: i32, blur_size: u32) -> Result<Self, PreprocessError> {
        check_kernel("block size", block_size)?;
        check_kernel("blur size", blur_size)?;
        Ok(Self {
            block_size,
            constant,
            blur_size,
        })
    }

    /// Lenient constructor for live slider input.
    pub fn from_trackbars(values: TrackbarValues) -> Self {
        Self {
            block_size: coerce_odd(values.block_size),
            constant: values.constant as i32,
            blur_size: coerce_odd(values.blur),
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn constant(&self) -> i32 {
        self.constant
    }

    pub fn blur_size(&self) -> u32 {
        self.blur_size
    }
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self::from_trackbars(TrackbarValues::default())
    }
}

impl From<TrackbarValues> for ThresholdParams {
    fn from(values: TrackbarValues) -> Self {
        Self::from_trackbars(values)
    }
}

/// Bumps even values to the next odd one, with a floor of [`MIN_KERNEL_SIZE`].
pub fn coerce_odd(value: u32) -> u32 {
    let odd = if value % 2 == 1 {
        value
    } else {
        value.saturating_add(1)
    };
    odd.max(MIN_KERNEL_SIZE)
}

fn check_kernel(name: &'static str, value: u32) -> Result<(), PreprocessError> {
    if value < MIN_KERNEL_SIZE || value % 2 == 0 {
        return Err(PreprocessError::InvalidKernel { name, value });
    }
    Ok(())
}
