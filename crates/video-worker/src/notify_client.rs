//! HTTP client for the notification service's ingress. The only bridge
//! between the video worker and the notification service.

use std::time::Duration;

use serde::Serialize;
use tracing::warn;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct NotificationRequest<'a> {
    subject: &'a str,
    to: Vec<&'a str>,
    html: String,
}

#[derive(Clone)]
pub struct NotifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl NotifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Best-effort notify. Non-2xx and network errors are logged and
    /// swallowed — the caller's pipeline step must not fail because of this.
    pub async fn notify(&self, subject: &str, to_email: &str, html: String) {
        let url = format!("{}/notification", self.base_url);
        let body = NotificationRequest {
            subject,
            to: vec![to_email],
            html,
        };

        match self.http.post(&url).json(&body).send().await {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "notification service rejected request");
            }
            Err(e) => warn!("failed to reach notification service: {e}"),
            Ok(_) => {}
        }
    }

    pub async fn notify_completed(&self, to_email: &str, original_name: &str) {
        self.notify(
            "Your video is ready",
            to_email,
            format!("<p>Your video <strong>{original_name}</strong> has finished processing and is ready to download.</p>"),
        )
        .await;
    }

    pub async fn notify_failed(&self, to_email: &str, original_name: &str, error_message: &str) {
        self.notify(
            "Video processing failed",
            to_email,
            format!(
                "<p>Processing of <strong>{original_name}</strong> failed: {error_message}</p>"
            ),
        )
        .await;
    }
}
