use crate::occupancy::domain::overlay::Overlay;
use crate::shared::frame::Frame;

/// Draws the space outlines of an [`Overlay`] onto a frame.
///
/// Implementations modify the frame in-place and clip to its bounds.
pub trait FrameAnnotator {
    fn annotate(&self, frame: &mut Frame, overlay: &Overlay);
}
