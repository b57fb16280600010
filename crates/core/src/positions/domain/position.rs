use crate::shared::constants::{SPACE_HEIGHT, SPACE_WIDTH};

/// Top-left corner of a parking space rectangle in frame pixels.
///
/// Every space has the same fixed size ([`SPACE_WIDTH`] x [`SPACE_HEIGHT`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the whole space rectangle lies inside a `width` x `height` frame.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x as i64 + SPACE_WIDTH as i64 <= width as i64
            && self.y as i64 + SPACE_HEIGHT as i64 <= height as i64
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Splits positions into those whose rectangle fits the frame and those that don't.
///
/// Order is preserved in both halves.
pub fn partition_by_frame(
    positions: &[Position],
    width: u32,
    height: u32,
) -> (Vec<Position>, Vec<Position>) {
    positions
        .iter()
        .copied()
        .partition(|p| p.fits_within(width, height))
}
