//! HTTP client for the credential service's token validator.
//!
//! The video service never holds the signing secret; every bearer token is
//! validated by calling the credential service's `/auth/validate` endpoint.
//! This is the only bridge between the two services on the request path.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    valid: bool,
    user_id: Option<String>,
    email: Option<String>,
}

/// Identity asserted by a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

#[derive(Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    base_url: String,
}

impl TokenClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(VALIDATE_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Validate a bearer token. Returns `None` for any failure mode
    /// (malformed token, expired, bad signature, or the credential
    /// service being unreachable) — callers must treat all of these as
    /// an undifferentiated 401, per the spec's auth-failure contract.
    pub async fn validate(&self, token: &str) -> Option<AuthenticatedUser> {
        let url = format!("{}/auth/validate", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&ValidateRequest { token })
            .send()
            .await
            .inspect_err(|e| tracing::warn!("token validation call failed: {e}"))
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        let body: ValidateResponse = response.json().await.ok()?;
        if !body.valid {
            return None;
        }

        Some(AuthenticatedUser {
            user_id: body.user_id?,
            email: body.email?,
        })
    }
}
