// HTTP client for the catalog APIs.
// Handles default headers and converts non-2xx responses into typed errors.

use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;

use crate::error::{DuffError, Result};

/// Plain JSON-over-HTTP client. No auth; the upstream APIs are public.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("duff-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(DuffError::Transport)?;

        Ok(Self { client })
    }

    /// Issue a GET and parse the body as JSON.
    ///
    /// A non-2xx status becomes `DuffError::Request` carrying the status code;
    /// connection and body-decode failures become `DuffError::Transport`.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(DuffError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DuffError::Request {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let value = response.json().await.map_err(DuffError::Transport)?;
        Ok(value)
    }
}
