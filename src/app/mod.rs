// SPDX-License-Identifier: MPL-2.0
//! Application root state and wiring between the detector flow and the UI.
//!
//! The `App` struct owns the detector state, the upload box, the classifier
//! client and the notification manager, and translates messages into side
//! effects (file reads, preview decoding, the classification request).

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::classifier::{ClassifyError, RemoteClassifier};
use crate::config::{self, Config};
use crate::detector::Detector;
use crate::i18n::fluent::I18n;
use crate::ui::components::upload_box;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    detector: Detector,
    upload: upload_box::State,
    classifier: Result<RemoteClassifier, ClassifyError>,
    theme_mode: ThemeMode,
    /// Spinner angle in radians, advanced on each tick while loading.
    spinner_rotation: f32,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("phase", &self.detector.phase())
            .field("endpoint", &self.classifier.as_ref().map(RemoteClassifier::endpoint))
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 420;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// i18n key of the warning shown when `--endpoint` is not a usable URL.
pub const ENDPOINT_WARNING_KEY: &str = "notification-endpoint-invalid";

/// Picks the endpoint for this run: a valid CLI override, else the config.
///
/// Returns a warning when the override had to be dropped.
fn resolve_endpoint(cli: Option<&str>, config: &Config) -> (String, Option<Notification>) {
    let configured = config.classifier.endpoint().to_string();
    match cli {
        None => (configured, None),
        Some(raw) => match config::validate_endpoint(raw) {
            Ok(url) => (url.to_string(), None),
            Err(err) => {
                tracing::warn!("{err}, using {configured}");
                let warning = Notification::warning(ENDPOINT_WARNING_KEY).with_arg("endpoint", raw);
                (configured, Some(warning))
            }
        },
    }
}

fn build_classifier(endpoint: &str, user_agent: &str) -> Result<RemoteClassifier, ClassifyError> {
    let url = config::validate_endpoint(endpoint).map_err(|e| ClassifyError::Transport(e.to_string()))?;
    RemoteClassifier::new(url, user_agent)
}

impl App {
    /// Loads the configuration and initializes the application state.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        Self::with_config(flags, &config, config_warning)
    }

    /// Initializes the application from an already-loaded configuration and
    /// optionally kicks off reading the image named on the command line.
    pub fn with_config(
        flags: Flags,
        config: &Config,
        config_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang.clone(), config);
        let mut notifications = notifications::Manager::new();

        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }

        let (endpoint, endpoint_warning) = resolve_endpoint(flags.endpoint.as_deref(), config);
        if let Some(warning) = endpoint_warning {
            notifications.push(warning);
        }

        let classifier = build_classifier(&endpoint, config.classifier.user_agent());
        match &classifier {
            Ok(client) => tracing::info!(endpoint = %client.endpoint(), "classifier ready"),
            Err(err) => tracing::error!("classifier unavailable: {err}"),
        }

        let mut app = App {
            i18n,
            detector: Detector::new(),
            upload: upload_box::State::new(),
            classifier,
            theme_mode: config.general.theme_mode,
            spinner_rotation: 0.0,
            notifications,
        };

        let task = match flags.file_path {
            Some(path) => update::load_image(app.detector.begin_intake(), PathBuf::from(path)),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.detector.selected() {
            Some(image) => format!("{} - {app_name}", image.file_name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.resolve()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(
            self.detector.is_loading(),
            self.notifications.has_notifications(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            detector: &mut self.detector,
            upload: &mut self.upload,
            classifier: &self.classifier,
            notifications: &mut self.notifications,
            spinner_rotation: &mut self.spinner_rotation,
        };

        match message {
            Message::Upload(upload_message) => update::handle_upload_message(&mut ctx, upload_message),
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::AnalyzePressed => update::handle_analyze_pressed(&mut ctx),
            Message::ImageLoaded { ticket, result } => {
                update::handle_image_loaded(&mut ctx, ticket, result)
            }
            Message::PreviewDecoded { generation, result } => {
                update::handle_preview_decoded(&mut ctx, generation, result)
            }
            Message::AnalysisFinished(outcome) => update::handle_analysis_finished(&mut ctx, outcome),
            Message::Tick(_instant) => update::handle_tick(&mut ctx),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            detector: &self.detector,
            upload: &self.upload,
            notifications: &self.notifications,
            spinner_rotation: self.spinner_rotation,
        })
    }

    #[must_use]
    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::EmotionResult;
    use crate::detector::{Phase, NO_IMAGE_KEY};
    use crate::media::SelectedImage;
    use crate::ui::notifications::Severity;
    use std::time::Instant;

    fn app() -> App {
        let flags = Flags {
            lang: Some("en-US".into()),
            ..Flags::default()
        };
        App::with_config(flags, &Config::default(), None).0
    }

    fn image(name: &str) -> SelectedImage {
        SelectedImage::new(format!("/photos/{name}"), b"not-a-real-image".to_vec())
    }

    fn select(app: &mut App, name: &str) {
        let ticket = app.detector.begin_intake();
        let _ = app.update(Message::ImageLoaded {
            ticket,
            result: Ok(image(name)),
        });
    }

    fn severities(app: &App) -> Vec<Severity> {
        app.notifications().all().map(Notification::severity).collect()
    }

    #[test]
    fn starts_idle_with_default_endpoint() {
        let app = app();
        assert_eq!(app.detector().phase(), Phase::Idle);
        assert!(!app.notifications().has_notifications());
        let endpoint = app.classifier.as_ref().map(|c| c.endpoint().to_string());
        assert_eq!(endpoint.as_deref(), Ok(config::DEFAULT_ENDPOINT));
    }

    #[test]
    fn analyze_without_file_shows_exactly_one_warning() {
        let mut app = app();
        let _ = app.update(Message::AnalyzePressed);

        assert_eq!(severities(&app), [Severity::Warning]);
        let key = app.notifications().visible().next().map(Notification::message_key);
        assert_eq!(key, Some(NO_IMAGE_KEY));
        assert_eq!(app.detector().phase(), Phase::Idle);
    }

    #[test]
    fn loaded_image_is_selected_with_info_toast() {
        let mut app = app();
        select(&mut app, "face.png");

        assert_eq!(app.detector().phase(), Phase::FileSelected);
        assert_eq!(severities(&app), [Severity::Info]);
        assert_eq!(app.title(), "face.png - Facial Emotion Detector");
    }

    #[test]
    fn unreadable_image_shows_error_toast() {
        let mut app = app();
        let ticket = app.detector.begin_intake();
        let _ = app.update(Message::ImageLoaded {
            ticket,
            result: Err(crate::error::Error::Io("/photos/gone.png: not found".into())),
        });

        assert_eq!(app.detector().phase(), Phase::Idle);
        assert_eq!(severities(&app), [Severity::Error]);
        let toast = app.notifications().visible().next().expect("toast");
        assert_eq!(toast.message_key(), update::OPEN_FAILED_KEY);
        assert!(toast.arg("message").is_some_and(|m| m.contains("gone.png")));
    }

    #[test]
    fn analysis_round_trip_updates_state_and_toasts() {
        let mut app = app();
        select(&mut app, "face.png");

        let _ = app.update(Message::AnalyzePressed);
        assert_eq!(app.detector().phase(), Phase::Analyzing);

        let _ = app.update(Message::AnalysisFinished(Ok(EmotionResult::new("sad", 0.5))));
        assert_eq!(app.detector().phase(), Phase::Succeeded);
        assert_eq!(severities(&app), [Severity::Success, Severity::Info]);
    }

    #[test]
    fn failed_analysis_keeps_error_toast_after_ticks() {
        let mut app = app();
        select(&mut app, "face.png");
        let _ = app.update(Message::AnalyzePressed);
        let _ = app.update(Message::AnalysisFinished(Err(ClassifyError::Status(500))));

        assert_eq!(app.detector().phase(), Phase::Failed);
        assert!(app.detector().error().is_some_and(|e| e.contains("500")));

        let _ = app.update(Message::Tick(Instant::now()));
        assert!(severities(&app).contains(&Severity::Error));
    }

    #[test]
    fn drops_are_ignored_while_analyzing() {
        let mut app = app();
        select(&mut app, "face.png");
        let _ = app.update(Message::AnalyzePressed);

        let _ = app.update(Message::Upload(upload_box::Message::FileHovered));
        let _ = app.update(Message::Upload(upload_box::Message::FileDropped(PathBuf::from(
            "/photos/other.png",
        ))));
        assert_eq!(app.detector().selected().map(SelectedImage::file_name), Some("face.png"));
        assert!(!app.upload.is_drag_over());
    }

    #[test]
    fn latest_requested_file_wins_when_reads_finish_out_of_order() {
        let mut app = app();
        let first = app.detector.begin_intake();
        let second = app.detector.begin_intake();

        let _ = app.update(Message::ImageLoaded {
            ticket: second,
            result: Ok(image("b.png")),
        });
        let _ = app.update(Message::ImageLoaded {
            ticket: first,
            result: Ok(image("a.png")),
        });

        assert_eq!(app.detector().selected().map(SelectedImage::file_name), Some("b.png"));
        assert_eq!(severities(&app), [Severity::Info]);
    }

    #[test]
    fn superseded_read_failure_is_not_reported() {
        let mut app = app();
        let first = app.detector.begin_intake();
        let second = app.detector.begin_intake();

        let _ = app.update(Message::ImageLoaded {
            ticket: second,
            result: Ok(image("b.png")),
        });
        let _ = app.update(Message::ImageLoaded {
            ticket: first,
            result: Err(crate::error::Error::Io("/photos/a.png: denied".into())),
        });

        assert_eq!(severities(&app), [Severity::Info]);
        assert_eq!(app.detector().phase(), Phase::FileSelected);
    }

    #[test]
    fn multi_file_drop_requests_a_single_read() {
        let mut app = app();
        for _ in 0..2 {
            let _ = app.update(Message::Upload(upload_box::Message::FileHovered));
        }
        for name in ["a.png", "b.png"] {
            let path = PathBuf::from("/photos").join(name);
            let _ = app.update(Message::Upload(upload_box::Message::FileDropped(path)));
        }

        // One ticket went to the accepted drop, so the next one is the second.
        assert_eq!(app.detector.begin_intake(), 2);
    }

    #[test]
    fn tick_advances_spinner_only_while_loading() {
        let mut app = app();
        let _ = app.update(Message::Tick(Instant::now()));
        assert_eq!(app.spinner_rotation, 0.0);

        select(&mut app, "face.png");
        let _ = app.update(Message::AnalyzePressed);
        let _ = app.update(Message::Tick(Instant::now()));
        assert!(app.spinner_rotation > 0.0);
    }

    #[test]
    fn stale_preview_from_previous_selection_is_dropped() {
        let mut app = app();
        select(&mut app, "a.png");
        let stale = app.detector().generation();
        select(&mut app, "b.png");

        let preview = crate::media::Preview {
            handle: iced::widget::image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
            width: 1,
            height: 1,
        };
        let _ = app.update(Message::PreviewDecoded {
            generation: stale,
            result: Ok(preview),
        });
        assert!(app.detector().preview().is_none());
    }

    #[test]
    fn config_warning_is_surfaced_on_startup() {
        let (app, _) = App::with_config(
            Flags::default(),
            &Config::default(),
            Some(config::LOAD_WARNING_KEY.to_string()),
        );
        assert_eq!(severities(&app), [Severity::Warning]);
    }

    #[test]
    fn invalid_cli_endpoint_falls_back_to_config() {
        let (endpoint, warning) = resolve_endpoint(Some("ftp://nope"), &Config::default());
        assert_eq!(endpoint, config::DEFAULT_ENDPOINT);
        let warning = warning.expect("warning");
        assert_eq!(warning.message_key(), ENDPOINT_WARNING_KEY);
        assert_eq!(warning.arg("endpoint"), Some("ftp://nope"));

        let (endpoint, warning) =
            resolve_endpoint(Some("http://127.0.0.1:8000/predict"), &Config::default());
        assert_eq!(endpoint, "http://127.0.0.1:8000/predict");
        assert!(warning.is_none());
    }
}
