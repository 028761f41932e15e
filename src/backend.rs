use reqwest::header;
use serde_json::Value;
use tracing::instrument;

use crate::models::short_url::CreateShortUrl;

/// Status and JSON body exactly as the backend sent them.
#[derive(Debug)]
pub struct BackendReply {
    pub status: u16,
    pub body: Value,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the external shortening service.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Forward a create request. A `BackendReply` comes back for every HTTP
    /// status the backend answers with; `Err` means the call itself failed
    /// (connect error, reset, body that is not JSON). Single attempt, no
    /// retries.
    #[instrument(name = "Backend: Create short URL", skip(self))]
    pub async fn create_short_url(&self, url: &str) -> Result<BackendReply, reqwest::Error> {
        let response = self
            .http
            .post(format!("{}/api/short-urls", self.base_url))
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-CSRF-TOKEN", "")
            .json(&CreateShortUrl { url: url.into() })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.json::<Value>().await?;
        Ok(BackendReply { status, body })
    }

    /// Where the backend resolves a short code.
    pub fn redirect_url(&self, code: &str) -> String {
        format!("{}/s/{code}", self.base_url)
    }
}
