mod app;
mod session;
mod settings;
mod widgets;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("Parking Monitor")
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(1600.0, 820.0),
            ..Default::default()
        })
        .run()
}
