// SPDX-License-Identifier: MPL-2.0
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use emotion_lens::classifier::{ClassifyError, EmotionResult, RemoteClassifier};
use emotion_lens::config::{self, Config, DEFAULT_USER_AGENT};
use emotion_lens::detector::{AnalysisStart, Detector, Phase};
use emotion_lens::i18n::fluent::I18n;
use emotion_lens::media::{self, decode_preview};
use emotion_lens::ui::components::result_display::{self, Panel};
use serde_json::json;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

fn write_png(path: &Path) {
    let img = image_rs::RgbaImage::from_pixel(8, 6, image_rs::Rgba([30, 144, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    image_rs::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image_rs::ImageFormat::Png)
        .expect("encode png");
    std::fs::write(path, out.into_inner()).expect("write png");
}

async fn serve(router: Router) -> reqwest::Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    reqwest::Url::parse(&format!("http://{addr}/predict")).expect("test url")
}

/// Fake classifier answering with the legacy field names once it saw a PNG.
fn legacy_classifier() -> Router {
    Router::new().route(
        "/predict",
        post(|mut multipart: Multipart| async move {
            let Ok(Some(field)) = multipart.next_field().await else {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": "no file" })));
            };
            if field.name() != Some("file") || field.content_type() != Some("image/png") {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad field" })));
            }
            (
                StatusCode::OK,
                Json(json!({ "predicted_emotion": "happy", "score": 0.873 })),
            )
        }),
    )
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.language = Some("en-US".to_string());
    config::save_to_path(&config, &config_path).expect("Failed to write initial config file");

    let loaded = config::load_from_path(&config_path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    config.general.language = Some("fr".to_string());
    config::save_to_path(&config, &config_path).expect("Failed to write french config file");

    let loaded = config::load_from_path(&config_path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
}

#[test]
fn test_cli_language_overrides_config() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());

    let i18n = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[tokio::test]
async fn test_full_analysis_flow_against_fake_classifier() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("portrait.png");
    write_png(&path);

    let image = media::load_selected_image(path).await.expect("read image");
    let preview = decode_preview(image.bytes()).expect("decode preview");
    assert_eq!((preview.width, preview.height), (8, 6));

    let mut detector = Detector::new();
    detector.select(image).expect("selection accepted");
    assert!(detector.apply_preview(detector.generation(), Ok(preview)));

    let AnalysisStart::Ready(image) = detector.begin_analysis() else {
        panic!("analysis should start");
    };
    assert_eq!(detector.phase(), Phase::Analyzing);

    let classifier =
        RemoteClassifier::new(serve(legacy_classifier()).await, DEFAULT_USER_AGENT).expect("client");
    let outcome = classifier.classify(&image).await;
    assert_eq!(outcome, Ok(EmotionResult::new("happy", 0.873)));

    let notification = detector.finish_analysis(outcome);
    assert_eq!(notification.arg("emotion"), Some("happy"));
    assert_eq!(detector.phase(), Phase::Succeeded);

    match result_display::panel(detector.result(), detector.preview(), detector.error()) {
        Panel::Success {
            emotion,
            confidence,
            preview,
        } => {
            assert_eq!(emotion, "happy");
            assert_eq!(confidence, "87.3%");
            assert!(preview.is_some());
        }
        other => panic!("expected success panel, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_surfaces_in_error_panel() {
    let router = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
    );
    let classifier = RemoteClassifier::new(serve(router).await, DEFAULT_USER_AGENT).expect("client");

    let mut detector = Detector::new();
    detector.select(media::SelectedImage::new("/photos/face.jpg", b"jpeg".to_vec()));
    let AnalysisStart::Ready(image) = detector.begin_analysis() else {
        panic!("analysis should start");
    };

    let outcome = classifier.classify(&image).await;
    assert_eq!(outcome, Err(ClassifyError::Status(500)));
    detector.finish_analysis(outcome);

    assert_eq!(detector.phase(), Phase::Failed);
    assert!(!detector.is_loading());
    assert_eq!(
        result_display::panel(detector.result(), detector.preview(), detector.error()),
        Panel::Error {
            message: "HTTP error! status: 500"
        }
    );
}
