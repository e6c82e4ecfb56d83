// SPDX-License-Identifier: MPL-2.0
//! Application shell: screen routing, store client ownership, sensor
//! polling, and the Iced run loop.

pub mod message;
pub mod subscription;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::gesture::TransformOverrides;
use crate::i18n::fluent::I18n;
use crate::sensors::{SensorHub, UnavailableProvider};
use crate::store::{NewPose, Overlay, StoreClient};
use crate::ui::{capture, library, navbar, overlays};
use iced::{window, Element, Size, Subscription, Task, Theme};

const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
const WINDOW_DEFAULT_HEIGHT: f32 = 680.0;
const MIN_WINDOW_WIDTH: f32 = 480.0;
const MIN_WINDOW_HEIGHT: f32 = 360.0;

/// Which screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overlays,
    Capture,
    Library,
}

/// Top-level application state.
pub struct App {
    i18n: I18n,
    config: Config,
    client: StoreClient,
    screen: Screen,
    overlays: overlays::State,
    capture: Option<capture::State>,
    library: Option<library::State>,
    sensors: SensorHub,
    window_size: Size,
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and kicks off the initial store loads
    /// based on `Flags` received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_else(|error| {
            eprintln!("[WARN] Could not load the configuration: {error}");
            Config::default()
        });
        let i18n = I18n::new(flags.lang.clone(), &config);

        let server_url = flags
            .server
            .clone()
            .unwrap_or_else(|| config.server_url().to_string());
        let client = match StoreClient::new(server_url, config.anon_key.clone()) {
            Ok(client) => client,
            Err(error) => {
                eprintln!("[ERROR] Could not initialize the HTTP client: {error}");
                std::process::exit(1);
            }
        };

        let mut app = App {
            i18n,
            config,
            overlays: overlays::State::new(client.clone()),
            client,
            screen: Screen::Overlays,
            capture: None,
            library: None,
            sensors: SensorHub::new(Box::new(UnavailableProvider)),
            window_size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        };
        app.sensors.refresh();

        let mut tasks = vec![app.overlays.refresh_task().map(Message::Overlays)];
        if let Some(overlay_id) = flags.overlay_id {
            let client = app.client.clone();
            tasks.push(Task::perform(
                async move { client.get_overlay(&overlay_id).await },
                Message::OverlayResolved,
            ));
        }

        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.screen),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Overlays(msg) => {
                let (effect, task) = self.overlays.update(msg);
                let follow_up = match effect {
                    overlays::Effect::None => Task::none(),
                    overlays::Effect::OpenCapture(overlay) => {
                        self.open_capture(overlay, TransformOverrides::default())
                    }
                    overlays::Effect::OpenLibrary(overlay) => self.open_library(overlay),
                };
                Task::batch([task.map(Message::Overlays), follow_up])
            }
            Message::Capture(msg) => {
                let Some(capture) = self.capture.as_mut() else {
                    return Task::none();
                };
                match capture.update(msg) {
                    capture::Effect::None => Task::none(),
                    capture::Effect::RecordRequested(transform) => {
                        let overlay_id = capture.overlay().id.clone();
                        let pose = self.build_pose(overlay_id, transform);
                        let client = self.client.clone();
                        Task::perform(
                            async move { client.create_pose(&pose).await },
                            |result| Message::Capture(capture::Message::PoseRecorded(result)),
                        )
                    }
                    capture::Effect::OrientationPermissionRequested => {
                        self.sensors.request_orientation_permission();
                        self.sensors.refresh();
                        Task::none()
                    }
                }
            }
            Message::Library(msg) => {
                let Some(library) = self.library.as_mut() else {
                    return Task::none();
                };
                match library.update(msg) {
                    library::Effect::None => Task::none(),
                    library::Effect::OpenCapture { overlay, overrides } => {
                        self.open_capture(overlay, overrides)
                    }
                }
            }
            Message::Navbar(msg) => match msg {
                navbar::Message::OpenOverlays => {
                    self.screen = Screen::Overlays;
                    self.overlays.refresh_task().map(Message::Overlays)
                }
                navbar::Message::OpenLibrary => match self.open_overlay() {
                    Some(overlay) => self.open_library(overlay),
                    None => Task::none(),
                },
            },
            Message::OverlayResolved(Ok(overlay)) => {
                self.open_capture(overlay, TransformOverrides::default())
            }
            Message::OverlayResolved(Err(error)) => {
                eprintln!("[WARN] Could not open the requested overlay: {error}");
                Task::none()
            }
            Message::SensorTick => {
                self.sensors.refresh();
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let navbar = navbar::view(navbar::ViewContext {
            i18n: &self.i18n,
            overlay_title: self.open_overlay_title(),
            can_go_overlays: self.screen != Screen::Overlays,
            can_open_library: self.screen == Screen::Capture,
        })
        .map(Message::Navbar);

        let content: Element<'_, Message> = match self.screen {
            Screen::Overlays => self
                .overlays
                .view(overlays::ViewContext { i18n: &self.i18n })
                .map(Message::Overlays),
            Screen::Capture => match &self.capture {
                Some(capture) => capture
                    .view(capture::ViewContext {
                        i18n: &self.i18n,
                        reading: self.sensors.latest(),
                        permission: self.sensors.orientation_permission(),
                    })
                    .map(Message::Capture),
                None => iced::widget::Space::new().into(),
            },
            Screen::Library => match &self.library {
                Some(library) => library
                    .view(library::ViewContext { i18n: &self.i18n })
                    .map(Message::Library),
                None => iced::widget::Space::new().into(),
            },
        };

        iced::widget::Column::new()
            .push(navbar)
            .push(content)
            .into()
    }

    fn open_capture(
        &mut self,
        overlay: Overlay,
        mut overrides: TransformOverrides,
    ) -> Task<Message> {
        if overrides.opacity.is_none() {
            overrides.opacity = self.config.default_opacity;
        }
        let state = capture::State::new(overlay, overrides, self.config.angle_wrap());
        let task = state.load_task(self.client.clone()).map(Message::Capture);
        self.capture = Some(state);
        self.screen = Screen::Capture;
        task
    }

    fn open_library(&mut self, overlay: Overlay) -> Task<Message> {
        let state = library::State::new(overlay);
        let task = state.load_task(self.client.clone()).map(Message::Library);
        self.library = Some(state);
        self.screen = Screen::Library;
        task
    }

    /// The overlay behind the current capture or library screen, if any.
    fn open_overlay(&self) -> Option<Overlay> {
        match self.screen {
            Screen::Capture => self.capture.as_ref().map(|c| c.overlay().clone()),
            Screen::Library => self.library.as_ref().map(|l| l.overlay().clone()),
            Screen::Overlays => None,
        }
    }

    fn open_overlay_title(&self) -> Option<&str> {
        match self.screen {
            Screen::Capture => self.capture.as_ref().map(|c| c.overlay().title.as_str()),
            Screen::Library => self.library.as_ref().map(|l| l.overlay().title.as_str()),
            Screen::Overlays => None,
        }
    }

    /// Combines the recorded transform with the latest sensor reading and
    /// viewport metadata into one insert.
    fn build_pose(
        &self,
        overlay_id: String,
        transform: crate::gesture::OverlayTransform,
    ) -> NewPose {
        let mut pose = NewPose::from_transform(overlay_id, transform);

        let reading = self.sensors.latest();
        if let Some(fix) = reading.geo {
            pose.lat = Some(fix.lat);
            pose.lon = Some(fix.lon);
            pose.alt = fix.alt;
            pose.accuracy_m = fix.accuracy_m;
            pose.heading_deg = fix.heading_deg;
            pose.speed_mps = fix.speed_mps;
        }
        if let Some(orientation) = reading.orientation {
            pose.alpha_yaw_deg = orientation.alpha_yaw_deg;
            pose.beta_pitch_deg = orientation.beta_pitch_deg;
            pose.gamma_roll_deg = orientation.gamma_roll_deg;
        }

        pose.device_model = Some(format!(
            "{} ({})",
            std::env::consts::OS,
            std::env::consts::ARCH
        ));
        pose.viewport_w = Some(self.window_size.width as u32);
        pose.viewport_h = Some(self.window_size.height as u32);

        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{GeoFix, SensorProvider, SensorReading};
    use crate::gesture::OverlayTransform;

    #[derive(Debug)]
    struct FixedProvider(SensorReading);

    impl SensorProvider for FixedProvider {
        fn poll(&mut self) -> SensorReading {
            self.0.clone()
        }
    }

    fn app() -> App {
        let client = StoreClient::new("https://store.example", None).expect("client builds");
        App {
            i18n: I18n::new(None, &Config::default()),
            config: Config::default(),
            overlays: overlays::State::new(client.clone()),
            client,
            screen: Screen::Overlays,
            capture: None,
            library: None,
            sensors: SensorHub::new(Box::new(UnavailableProvider)),
            window_size: Size::new(800.0, 600.0),
        }
    }

    #[test]
    fn recorded_pose_carries_sensor_and_viewport_metadata() {
        let mut app = app();
        app.sensors = SensorHub::new(Box::new(FixedProvider(SensorReading {
            geo: Some(GeoFix {
                lat: 46.2044,
                lon: 6.1432,
                accuracy_m: Some(8.0),
                ..GeoFix::default()
            }),
            ..SensorReading::default()
        })));
        app.sensors.refresh();

        let pose = app.build_pose("ovl-1".to_string(), OverlayTransform::default());
        assert_eq!(pose.lat, Some(46.2044));
        assert_eq!(pose.accuracy_m, Some(8.0));
        assert_eq!(pose.viewport_w, Some(800));
        assert_eq!(pose.viewport_h, Some(600));
        assert!(pose.device_model.is_some());
    }

    #[test]
    fn library_navigation_tracks_the_open_overlay() {
        let mut app = app();
        let overlay = Overlay {
            id: "ovl-1".to_string(),
            title: "North face".to_string(),
            overlay_url: "https://store.example/o.png".to_string(),
            place_name: None,
            lat: None,
            lon: None,
            created_at: None,
        };

        let _task = app.open_capture(overlay.clone(), TransformOverrides::default());
        assert_eq!(app.screen, Screen::Capture);
        assert_eq!(app.open_overlay().map(|o| o.id), Some("ovl-1".to_string()));

        let _task = app.open_library(overlay);
        assert_eq!(app.screen, Screen::Library);
        assert_eq!(app.open_overlay().map(|o| o.id), Some("ovl-1".to_string()));
    }
}
