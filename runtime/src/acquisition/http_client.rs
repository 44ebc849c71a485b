//! Async HTTP client wrapping reqwest.
//!
//! Not a browser, just one GET with a desktop Chrome user-agent and a fixed
//! timeout. Non-2xx responses are errors. There is no retry.

use std::time::Duration;

use crate::error::{ImportError, ImportResult};

/// Desktop Chrome identity; the statistics site rejects default clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/91.0.4472.124 Safari/537.36";

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header, if any.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

/// HTTP client for fetching the statistics page.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client with the browser user-agent and the given timeout.
    pub fn new(timeout: Duration) -> ImportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a single GET. Any status outside 2xx is an error.
    pub async fn get(&self, url: &str) -> ImportResult<HttpResponse> {
        let r = self.client.get(url).send().await?;

        let status = r.status();
        let final_url = r.url().to_string();
        if !status.is_success() {
            return Err(ImportError::HttpStatus {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let content_type = r
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = r.text().await?;

        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
