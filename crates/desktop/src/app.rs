use std::path::PathBuf;

use iced::event::{self, Event};
use iced::keyboard;
use iced::widget::{canvas, column, container, image, row, slider, stack, text};
use iced::{ContentFit, Element, Length, Subscription, Task};

use parking_monitor_core::preprocessing::domain::threshold_params::{
    ThresholdParams, TrackbarValues,
};
use parking_monitor_core::shared::constants::{TRACKBAR_MAX, VIDEO_EXTENSIONS};

use crate::session::Session;
use crate::settings::Settings;
use crate::widgets::label_overlay::LabelOverlay;

#[derive(Debug, Clone)]
pub enum Message {
    VideoSelected(Option<PathBuf>),
    Tick,
    BlockSizeChanged(u32),
    ConstantChanged(u32),
    BlurChanged(u32),
    Quit,
}

enum Status {
    Choosing,
    Playing(Box<Session>),
    Failed(String),
}

pub struct App {
    settings: Settings,
    trackbars: TrackbarValues,
    status: Status,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let start_dir = settings.video_dir.clone();
        (
            Self {
                settings,
                trackbars: TrackbarValues::default(),
                status: Status::Choosing,
            },
            Task::perform(pick_video(start_dir), Message::VideoSelected),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::VideoSelected(None) => {
                log::info!("No video file selected. Exiting.");
                return iced::exit();
            }
            Message::VideoSelected(Some(path)) => match Session::open(&path, &self.settings) {
                Ok(session) => {
                    log::info!("Monitoring {}", path.display());
                    self.status = Status::Playing(Box::new(session));
                }
                Err(e) => {
                    log::error!("Could not open {}: {e}", path.display());
                    self.status = Status::Failed(format!("Could not open {}: {e}", path.display()));
                }
            },
            Message::Tick => {
                let params = self.params();
                if let Status::Playing(session) = &mut self.status {
                    if let Err(e) = session.advance(&params) {
                        log::error!("Playback stopped: {e}");
                        self.status = Status::Failed(format!("Playback stopped: {e}"));
                    }
                }
            }
            Message::BlockSizeChanged(v) => self.trackbars.block_size = v,
            Message::ConstantChanged(v) => self.trackbars.constant = v,
            Message::BlurChanged(v) => self.trackbars.blur = v,
            Message::Quit => return iced::exit(),
        }
        Task::none()
    }

    /// Slider values as sampled for the next frame.
    fn params(&self) -> ThresholdParams {
        ThresholdParams::from_trackbars(self.trackbars.clamped())
    }

    pub fn view(&self) -> Element<'_, Message> {
        let params = self.params();
        let controls = column![
            text("Threshold").size(18),
            labeled_slider(
                format!("Block size: {} (uses {})", self.trackbars.block_size, params.block_size()),
                self.trackbars.block_size,
                Message::BlockSizeChanged,
            ),
            labeled_slider(
                format!("Constant: {}", self.trackbars.constant),
                self.trackbars.constant,
                Message::ConstantChanged,
            ),
            labeled_slider(
                format!("Blur: {} (uses {})", self.trackbars.blur, params.blur_size()),
                self.trackbars.blur,
                Message::BlurChanged,
            ),
            text("Esc to quit").size(12),
        ]
        .spacing(12)
        .width(260);

        let (video, reference): (Element<'_, Message>, Element<'_, Message>) = match &self.status {
            Status::Choosing => (placeholder("Choose a video to start"), placeholder("")),
            Status::Failed(message) => (placeholder(message), placeholder("")),
            Status::Playing(session) => (video_panel(session), reference_panel(session)),
        };

        row![
            container(controls).padding(16),
            container(video).width(Length::FillPortion(3)).height(Length::Fill),
            container(reference).width(Length::FillPortion(2)).height(Length::Fill),
        ]
        .spacing(8)
        .height(Length::Fill)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keys = event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::Quit),
            _ => None,
        });

        match &self.status {
            Status::Playing(session) => Subscription::batch([
                keys,
                iced::time::every(session.interval()).map(|_| Message::Tick),
            ]),
            _ => keys,
        }
    }
}

async fn pick_video(start_dir: PathBuf) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select a parking lot video")
        .set_directory(start_dir)
        .add_filter("Video files", VIDEO_EXTENSIONS)
        .pick_file()
        .await
        .map(|h| h.path().to_path_buf())
}

fn labeled_slider<'a>(
    label: String,
    value: u32,
    on_change: fn(u32) -> Message,
) -> Element<'a, Message> {
    column![text(label).size(13), slider(0..=TRACKBAR_MAX, value, on_change)]
        .spacing(4)
        .into()
}

fn placeholder<'a>(message: &str) -> Element<'a, Message> {
    container(text(message.to_string()))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn video_panel(session: &Session) -> Element<'_, Message> {
    let Some(shown) = session.latest() else {
        return placeholder("Loading…");
    };
    let frame = image(shown.handle.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);
    let labels = canvas(LabelOverlay::new(
        &shown.labels,
        shown.banner_box,
        shown.width,
        shown.height,
    ))
    .width(Length::Fill)
    .height(Length::Fill);
    column![
        stack![frame, labels],
        text(format!("{}  {}", session.video_path().display(), shown.summary)).size(13),
    ]
    .spacing(4)
    .into()
}

fn reference_panel(session: &Session) -> Element<'_, Message> {
    match session.reference_image() {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => placeholder("No reference image"),
    }
}
