use reactor_game::{CommandEndpoint, EndpointConfig, ExecResponse};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum HttpEndpointError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `exec.lua` over real HTTP, for checks against a running server.
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &EndpointConfig) -> Result<Self, HttpEndpointError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: config.exec_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CommandEndpoint for HttpEndpoint {
    type Error = HttpEndpointError;

    async fn exec(&self, script: &str) -> Result<ExecResponse, HttpEndpointError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain")
            .body(script.to_string())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpEndpointError::Status(status));
        }
        let body = response.text().await?;
        Ok(ExecResponse::from_json_text(&body)?)
    }
}
