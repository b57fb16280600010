use ndarray::{s, Axis};

use crate::occupancy::domain::frame_annotator::FrameAnnotator;
use crate::occupancy::domain::overlay::{Outline, Overlay, Rgb};
use crate::shared::frame::Frame;

/// Rasterizes space outlines directly into frame pixels.
///
/// The banner box is left to whatever draws the banner text, so a box is
/// never shown without its label.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterAnnotator;

impl RasterAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl FrameAnnotator for RasterAnnotator {
    fn annotate(&self, frame: &mut Frame, overlay: &Overlay) {
        for outline in &overlay.outlines {
            draw_outline(frame, outline);
        }
    }
}

fn draw_outline(frame: &mut Frame, outline: &Outline) {
    let t = outline.thickness.max(1) as i64;
    // Stroke is centered on the edge line, biased inward for even widths.
    let lo = -(t / 2);
    let hi = lo + t;
    let x0 = outline.x as i64;
    let y0 = outline.y as i64;
    let x1 = x0 + outline.width as i64;
    let y1 = y0 + outline.height as i64;
    let c = outline.color;

    fill(frame, x0 + lo, y0 + lo, x1 + hi, y0 + hi, c); // top
    fill(frame, x0 + lo, y1 + lo, x1 + hi, y1 + hi, c); // bottom
    fill(frame, x0 + lo, y0 + lo, x0 + hi, y1 + hi, c); // left
    fill(frame, x1 + lo, y0 + lo, x1 + hi, y1 + hi, c); // right
}

/// Fills `[x0, x1) x [y0, y1)` clipped to the frame.
fn fill(frame: &mut Frame, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb) {
    let fw = frame.width() as i64;
    let fh = frame.height() as i64;
    let x0 = x0.clamp(0, fw) as usize;
    let x1 = x1.clamp(0, fw) as usize;
    let y0 = y0.clamp(0, fh) as usize;
    let y1 = y1.clamp(0, fh) as usize;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let color_frame = frame.channels() >= 3;
    let mut pixels = frame.as_ndarray_mut();
    let mut region = pixels.slice_mut(s![y0..y1, x0..x1, ..]);
    if color_frame {
        for (c, &value) in color.iter().enumerate() {
            region.index_axis_mut(Axis(2), c).fill(value);
        }
    } else {
        region.fill(luma(color));
    }
}

fn luma(c: Rgb) -> u8 {
    ((c[0] as u32 * 4899 + c[1] as u32 * 9617 + c[2] as u32 * 1868 + (1 << 13)) >> 14) as u8
}
