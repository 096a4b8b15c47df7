// SPDX-License-Identifier: MPL-2.0
//! HTTP client posting the selected image to the remote classifier.

use super::response::{normalize, EmotionResult};
use super::ClassifyError;
use crate::config::UPLOAD_FIELD_NAME;
use crate::media::SelectedImage;
use reqwest::multipart::{Form, Part};
use reqwest::Url;

/// Client for the remote emotion classification endpoint.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl RemoteClassifier {
    /// Creates a client for `endpoint`, identifying itself with `user_agent`.
    pub fn new(endpoint: Url, user_agent: &str) -> Result<Self, ClassifyError> {
        // No timeout: the request runs until the transport gives up.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Uploads `image` and normalizes the answer.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::Transport`] if the request fails or the body cannot be read
    /// - [`ClassifyError::Status`] for any non-2xx status
    /// - [`ClassifyError::InvalidResponse`] if the body is not JSON
    pub async fn classify(&self, image: &SelectedImage) -> Result<EmotionResult, ClassifyError> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime())
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        tracing::info!(
            endpoint = %self.endpoint,
            file = image.file_name(),
            len = image.bytes().len(),
            "sending classification request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "classifier answered with an error status");
            return Err(ClassifyError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        let json: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;

        let result = normalize(&json);
        tracing::debug!(emotion = %result.emotion, confidence = result.confidence, "classification done");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use axum::extract::Multipart;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Debug, Default, Clone)]
    struct Upload {
        field: String,
        file_name: Option<String>,
        content_type: Option<String>,
        data: Vec<u8>,
        user_agent: Option<String>,
    }

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        Url::parse(&format!("http://{addr}/predict")).expect("test url")
    }

    fn classifier(endpoint: Url) -> RemoteClassifier {
        RemoteClassifier::new(endpoint, DEFAULT_USER_AGENT).expect("client")
    }

    fn image() -> SelectedImage {
        SelectedImage::new("/photos/face.png", b"png-bytes".to_vec())
    }

    #[tokio::test]
    async fn posts_multipart_file_field_and_normalizes_answer() {
        let seen: Arc<Mutex<Vec<Upload>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let router = Router::new().route(
            "/predict",
            post(move |headers: HeaderMap, mut multipart: Multipart| {
                let recorder = Arc::clone(&recorder);
                async move {
                    while let Some(field) = multipart.next_field().await.expect("field") {
                        let mut upload = Upload {
                            field: field.name().unwrap_or_default().to_string(),
                            file_name: field.file_name().map(str::to_string),
                            content_type: field.content_type().map(str::to_string),
                            user_agent: headers
                                .get("user-agent")
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string),
                            ..Upload::default()
                        };
                        upload.data = field.bytes().await.expect("bytes").to_vec();
                        recorder.lock().await.push(upload);
                    }
                    Json(json!({ "emotion": "happy", "confidence": 0.873 }))
                }
            }),
        );

        let result = classifier(serve(router).await)
            .classify(&image())
            .await
            .expect("classification succeeds");
        assert_eq!(result, EmotionResult::new("happy", 0.873));
        assert_eq!(result.confidence_percent(), "87.3%");

        let uploads = seen.lock().await;
        assert_eq!(uploads.len(), 1, "exactly one multipart field");
        let upload = &uploads[0];
        assert_eq!(upload.field, "file");
        assert_eq!(upload.file_name.as_deref(), Some("face.png"));
        assert_eq!(upload.content_type.as_deref(), Some("image/png"));
        assert_eq!(upload.data, b"png-bytes");
        assert_eq!(upload.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
    }

    #[tokio::test]
    async fn alternate_field_names_are_accepted() {
        let router = Router::new().route(
            "/predict",
            post(|| async { Json(json!({ "predicted_emotion": "sad", "score": 0.5 })) }),
        );

        let result = classifier(serve(router).await).classify(&image()).await;
        assert_eq!(result, Ok(EmotionResult::new("sad", 0.5)));
    }

    #[tokio::test]
    async fn server_error_status_is_reported_with_code() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );

        let err = classifier(serve(router).await)
            .classify(&image())
            .await
            .expect_err("500 must fail");
        assert_eq!(err, ClassifyError::Status(500));
        assert!(err.user_message().contains("500"));
    }

    #[tokio::test]
    async fn malformed_json_is_an_invalid_response() {
        let router = Router::new().route("/predict", post(|| async { "<html>oops</html>" }));

        let err = classifier(serve(router).await)
            .classify(&image())
            .await
            .expect_err("non-JSON must fail");
        assert!(matches!(err, ClassifyError::InvalidResponse(_)));
        assert!(!err.user_message().is_empty());
    }

    #[tokio::test]
    async fn json_without_known_fields_is_unknown() {
        let router = Router::new().route(
            "/predict",
            post(|| async { Json(Value::Array(vec![json!("happy")])) }),
        );

        let result = classifier(serve(router).await).classify(&image()).await;
        assert_eq!(result, Ok(EmotionResult::unknown()));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let endpoint = Url::parse(&format!("http://{addr}/predict")).expect("url");

        let err = classifier(endpoint)
            .classify(&image())
            .await
            .expect_err("closed port must fail");
        assert!(matches!(err, ClassifyError::Transport(_)));
    }
}
