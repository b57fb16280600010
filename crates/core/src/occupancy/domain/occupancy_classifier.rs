use crate::positions::domain::position::Position;
use crate::shared::constants::{OCCUPIED_PIXEL_THRESHOLD, SPACE_HEIGHT, SPACE_WIDTH};
use crate::shared::mask::Mask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Free,
    Occupied,
}

impl Occupancy {
    pub fn is_free(self) -> bool {
        self == Occupancy::Free
    }
}

/// Classification result for one parking space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpaceStatus {
    pub position: Position,
    /// Foreground pixels inside the space rectangle.
    pub count: usize,
    pub occupancy: Occupancy,
}

/// Per-frame classification of every configured space, in position order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyReport {
    pub spaces: Vec<SpaceStatus>,
}

impl OccupancyReport {
    pub fn free(&self) -> usize {
        self.spaces.iter().filter(|s| s.occupancy.is_free()).count()
    }

    pub fn total(&self) -> usize {
        self.spaces.len()
    }

    /// `(free, total)`
    pub fn counts(&self) -> (usize, usize) {
        (self.free(), self.total())
    }

    /// Summary text, e.g. `"Free: 3/12"`.
    pub fn label(&self) -> String {
        format!("Free: {}/{}", self.free(), self.total())
    }
}

/// Counts foreground pixels per space and compares against a fixed threshold.
///
/// Spaces with fewer than `threshold` foreground pixels are free. The
/// crop is clipped to the mask, so out-of-frame positions never panic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccupancyClassifier {
    threshold: usize,
    space_width: u32,
    space_height: u32,
}

impl Default for OccupancyClassifier {
    fn default() -> Self {
        Self {
            threshold: OCCUPIED_PIXEL_THRESHOLD,
            space_width: SPACE_WIDTH,
            space_height: SPACE_HEIGHT,
        }
    }
}

impl OccupancyClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn classify_count(&self, count: usize) -> Occupancy {
        if count < self.threshold {
            Occupancy::Free
        } else {
            Occupancy::Occupied
        }
    }

    pub fn classify(&self, mask: &Mask, positions: &[Position]) -> OccupancyReport {
        let spaces = positions
            .iter()
            .map(|&position| {
                let count =
                    mask.count_nonzero(position.x, position.y, self.space_width, self.space_height);
                SpaceStatus {
                    position,
                    count,
                    occupancy: self.classify_count(count),
                }
            })
            .collect();
        OccupancyReport { spaces }
    }
}
