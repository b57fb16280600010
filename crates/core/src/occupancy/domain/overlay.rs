use crate::occupancy::domain::occupancy_classifier::{Occupancy, OccupancyReport};
use crate::shared::constants::{SPACE_HEIGHT, SPACE_WIDTH};

pub type Rgb = [u8; 3];

pub const FREE_COLOR: Rgb = [0, 200, 0];
pub const OCCUPIED_COLOR: Rgb = [200, 0, 0];
pub const FREE_THICKNESS: u32 = 5;
pub const OCCUPIED_THICKNESS: u32 = 2;

/// Count labels sit this far above the bottom edge of their space.
const COUNT_LABEL_LIFT: i32 = 6;
const COUNT_LABEL_SIZE: f32 = 14.0;

/// Summary banner text baseline origin, padding, and glyph metrics used to
/// size its background box.
pub const BANNER_ORIGIN: (i32, i32) = (50, 60);
const BANNER_PADDING: i32 = 20;
const BANNER_TEXT_SIZE: f32 = 36.0;
const BANNER_GLYPH_WIDTH: i32 = 20;
const BANNER_TEXT_HEIGHT: i32 = 28;

/// Rectangle outline centered on the edges of `[x, x+width] x [y, y+height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outline {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Rgb,
    pub thickness: u32,
}

/// Solid rectangle covering `[x, x+width) x [y, y+height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilledBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Rgb,
}

/// Text anchored at its bottom-left baseline point, in frame pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub background: FilledBox,
    pub label: TextLabel,
}

/// Everything drawn on top of a frame for one occupancy report.
///
/// Outlines are rasterized into the frame by a
/// [`FrameAnnotator`](crate::occupancy::domain::frame_annotator::FrameAnnotator).
/// Labels and the banner, box included, are left to the presentation layer,
/// which owns fonts.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub outlines: Vec<Outline>,
    pub labels: Vec<TextLabel>,
    pub banner: Banner,
}

impl Overlay {
    pub fn from_report(report: &OccupancyReport) -> Self {
        let mut outlines = Vec::with_capacity(report.spaces.len());
        let mut labels = Vec::with_capacity(report.spaces.len());

        for space in &report.spaces {
            let (color, thickness) = match space.occupancy {
                Occupancy::Free => (FREE_COLOR, FREE_THICKNESS),
                Occupancy::Occupied => (OCCUPIED_COLOR, OCCUPIED_THICKNESS),
            };
            outlines.push(Outline {
                x: space.position.x,
                y: space.position.y,
                width: SPACE_WIDTH as i32,
                height: SPACE_HEIGHT as i32,
                color,
                thickness,
            });
            labels.push(TextLabel {
                text: space.count.to_string(),
                x: space.position.x,
                y: space.position.y.saturating_add(SPACE_HEIGHT as i32 - COUNT_LABEL_LIFT),
                color,
                size: COUNT_LABEL_SIZE,
            });
        }

        Self {
            outlines,
            labels,
            banner: summary_banner(report.label()),
        }
    }

    /// Labels including the banner text, in draw order.
    pub fn all_labels(&self) -> impl Iterator<Item = &TextLabel> {
        self.labels.iter().chain(std::iter::once(&self.banner.label))
    }
}

fn summary_banner(text: String) -> Banner {
    let (x, y) = BANNER_ORIGIN;
    let text_width = text.chars().count() as i32 * BANNER_GLYPH_WIDTH;
    Banner {
        background: FilledBox {
            x: x - BANNER_PADDING,
            y: y - BANNER_TEXT_HEIGHT - BANNER_PADDING,
            width: text_width + 2 * BANNER_PADDING,
            height: BANNER_TEXT_HEIGHT + 2 * BANNER_PADDING,
            color: FREE_COLOR,
        },
        label: TextLabel {
            text,
            x,
            y,
            color: [255, 255, 255],
            size: BANNER_TEXT_SIZE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::domain::occupancy_classifier::SpaceStatus;
    use crate::positions::domain::position::Position;

    fn report(spaces: &[(i32, i32, usize, Occupancy)]) -> OccupancyReport {
        OccupancyReport {
            spaces: spaces
                .iter()
                .map(|&(x, y, count, occupancy)| SpaceStatus {
                    position: Position::new(x, y),
                    count,
                    occupancy,
                })
                .collect(),
        }
    }

    #[test]
    fn test_free_space_is_thick_green() {
        let overlay = Overlay::from_report(&report(&[(10, 20, 12, Occupancy::Free)]));
        assert_eq!(
            overlay.outlines[0],
            Outline {
                x: 10,
                y: 20,
                width: 107,
                height: 48,
                color: FREE_COLOR,
                thickness: 5,
            }
        );
    }

    #[test]
    fn test_occupied_space_is_thin_red() {
        let overlay = Overlay::from_report(&report(&[(0, 0, 2000, Occupancy::Occupied)]));
        assert_eq!(overlay.outlines[0].color, OCCUPIED_COLOR);
        assert_eq!(overlay.outlines[0].thickness, 2);
    }

    #[test]
    fn test_count_label_near_bottom_left() {
        let overlay = Overlay::from_report(&report(&[(10, 20, 345, Occupancy::Free)]));
        let label = &overlay.labels[0];
        assert_eq!(label.text, "345");
        assert_eq!((label.x, label.y), (10, 20 + 48 - 6));
        assert_eq!(label.color, FREE_COLOR);
    }

    #[test]
    fn test_banner_text_and_anchor() {
        let overlay = Overlay::from_report(&report(&[
            (0, 0, 0, Occupancy::Free),
            (200, 0, 1000, Occupancy::Occupied),
        ]));
        assert_eq!(overlay.banner.label.text, "Free: 1/2");
        assert_eq!((overlay.banner.label.x, overlay.banner.label.y), (50, 60));
    }

    #[test]
    fn test_banner_box_encloses_text_anchor() {
        let overlay = Overlay::from_report(&OccupancyReport::default());
        let bg = overlay.banner.background;
        let label = &overlay.banner.label;
        assert_eq!(label.text, "Free: 0/0");
        assert!(bg.x < label.x && label.x < bg.x + bg.width);
        assert!(bg.y < label.y && label.y < bg.y + bg.height);
        assert_eq!(bg.color, FREE_COLOR);
    }

    #[test]
    fn test_all_labels_ends_with_banner() {
        let overlay = Overlay::from_report(&report(&[(0, 0, 1, Occupancy::Free)]));
        let texts: Vec<_> = overlay.all_labels().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "Free: 1/1"]);
    }
}
