use iced::mouse;
use iced::widget::canvas;
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use parking_monitor_core::occupancy::domain::overlay::{FilledBox, TextLabel};

/// Maps frame pixels onto a widget area the way `ContentFit::Contain` does:
/// uniform scale, centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainFit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ContainFit {
    pub fn new(frame: Size, bounds: Size) -> Self {
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return Self {
                scale: 1.0,
                offset_x: 0.0,
                offset_y: 0.0,
            };
        }
        let scale = (bounds.width / frame.width).min(bounds.height / frame.height);
        Self {
            scale,
            offset_x: (bounds.width - frame.width * scale) / 2.0,
            offset_y: (bounds.height - frame.height * scale) / 2.0,
        }
    }

    pub fn to_screen(&self, x: f32, y: f32) -> Point {
        Point::new(self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    pub fn box_to_screen(&self, b: &FilledBox) -> Rectangle {
        Rectangle::new(
            self.to_screen(b.x as f32, b.y as f32),
            Size::new(b.width as f32 * self.scale, b.height as f32 * self.scale),
        )
    }
}

/// Draws count labels and the summary banner over a displayed frame.
///
/// Outlines are already in the frame pixels; the banner box is filled here
/// right before its text.
pub struct LabelOverlay<'a> {
    labels: &'a [TextLabel],
    banner_box: FilledBox,
    frame_size: Size,
}

impl<'a> LabelOverlay<'a> {
    pub fn new(labels: &'a [TextLabel], banner_box: FilledBox, width: u32, height: u32) -> Self {
        Self {
            labels,
            banner_box,
            frame_size: Size::new(width as f32, height as f32),
        }
    }
}

impl<Message> canvas::Program<Message> for LabelOverlay<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let fit = ContainFit::new(self.frame_size, bounds.size());

        let area = fit.box_to_screen(&self.banner_box);
        let [r, g, b] = self.banner_box.color;
        frame.fill_rectangle(area.position(), area.size(), Color::from_rgb8(r, g, b));

        for label in self.labels {
            // Labels are anchored at the baseline; canvas text at the top.
            let position = fit.to_screen(label.x as f32, label.y as f32 - label.size);
            let [r, g, b] = label.color;
            frame.fill_text(canvas::Text {
                content: label.text.clone(),
                position,
                color: Color::from_rgb8(r, g, b),
                size: (label.size * fit.scale).into(),
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
