//! Email relay client.
//!
//! The concrete relay is an external collaborator the design leaves
//! unspecified (any transactional-email HTTP API fits behind this). The
//! client's shape — a pooled [`reqwest::Client`], a fixed sender, one
//! `send` call per outbound message — follows the credential/video
//! services' HTTP-bridge clients; a relay failure is reported back to the
//! caller rather than retried here, since the worker itself decides what a
//! failed delivery means for the outcome row.

use std::time::Duration;

use serde::Serialize;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

/// A relay capable of sending one rendered email.
#[async_trait::async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send(&self, from: &str, to: &[String], subject: &str, html: &str) -> bool;
}

/// HTTP-backed relay: POSTs the rendered message to a configured endpoint
/// and treats any non-2xx or transport error as delivery failure.
pub struct HttpEmailRelay {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEmailRelay {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl EmailRelay for HttpEmailRelay {
    async fn send(&self, from: &str, to: &[String], subject: &str, html: &str) -> bool {
        let url = format!("{}/send", self.base_url);
        let body = SendRequest { from, to, subject, html };

        match self.http.post(&url).json(&body).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("email relay call failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn success_response_is_reported_as_delivered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let relay = HttpEmailRelay::new(server.uri());
        let delivered = relay.send("from@x.io", &["to@x.io".to_string()], "subject", "<p>hi</p>").await;
        assert!(delivered);
    }

    #[tokio::test]
    async fn server_error_is_reported_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let relay = HttpEmailRelay::new(server.uri());
        let delivered = relay.send("from@x.io", &["to@x.io".to_string()], "subject", "<p>hi</p>").await;
        assert!(!delivered);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_reported_as_failure() {
        let relay = HttpEmailRelay::new("http://127.0.0.1:1");
        let delivered = relay.send("from@x.io", &["to@x.io".to_string()], "subject", "<p>hi</p>").await;
        assert!(!delivered);
    }
}
