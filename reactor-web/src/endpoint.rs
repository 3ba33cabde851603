//! `exec.lua` endpoint over the browser's fetch API.
use gloo_net::http::Request;
use reactor_game::{CommandEndpoint, EndpointConfig, ExecResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebEndpointError {
    #[error("Request failed: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebEndpoint {
    url: String,
}

impl WebEndpoint {
    #[must_use]
    pub fn new(config: &EndpointConfig) -> Self {
        Self {
            url: config.exec_url(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CommandEndpoint for WebEndpoint {
    type Error = WebEndpointError;

    async fn exec(&self, script: &str) -> Result<ExecResponse, Self::Error> {
        let response = Request::post(&self.url)
            .header("Content-Type", "text/plain")
            .body(script)?
            .send()
            .await?;
        if !response.ok() {
            return Err(WebEndpointError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }
        let body = response.text().await?;
        Ok(ExecResponse::from_json_text(&body)?)
    }
}
