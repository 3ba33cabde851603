//! Contract with the remote `exec.lua` scripting endpoint.
use num_traits::cast::cast;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::script::RemoteCommand;

/// JSON returned by the scripting console.
///
/// Only `success`, `message` and `ERROR` are shared by every script; any
/// other field lands in `extra` and is read by name by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExecResponse {
    /// Decode a response body. Valid JSON that is not an object is kept
    /// under `extra["result"]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn from_json_text(body: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(body)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => {
                let mut extra = Map::new();
                extra.insert(String::from("result"), other);
                Ok(Self {
                    extra,
                    ..Self::default()
                })
            }
        }
    }

    /// Whether the script reported success without an interpreter error.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.success == Some(true) && self.error.is_none()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Positive integer field; zero and non-numeric values read as absent.
    #[must_use]
    pub fn positive_u32(&self, name: &str) -> Option<u32> {
        self.field(name)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite() && *value >= 1.0)
            .and_then(|value| cast::<f64, u32>(value.min(f64::from(u32::MAX)).floor()))
    }

    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstraction over whatever carries scripts to the game server.
/// Platform-specific crates provide the implementation.
#[allow(async_fn_in_trait)]
pub trait CommandEndpoint {
    type Error: std::error::Error + 'static;

    /// POST a script body and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable body.
    async fn exec(&self, script: &str) -> Result<ExecResponse, Self::Error>;
}

/// Build `<base>/exec.lua`, tolerating trailing slashes on the base.
#[must_use]
pub fn exec_url(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    format!("{base}/exec.lua")
}

/// Render and send a command, folding every failure into `None`.
///
/// Transport and decode errors are logged and never reach the game loop.
pub async fn exec_quietly<E: CommandEndpoint>(
    endpoint: &E,
    command: RemoteCommand,
    callsign: &str,
) -> Option<ExecResponse> {
    let script = command.render(callsign);
    log::debug!("exec {} for {callsign}", command.label());
    match endpoint.exec(&script).await {
        Ok(response) => {
            if let Some(err) = response.error.as_deref() {
                log::warn!("{} script reported ERROR: {err}", command.label());
            }
            Some(response)
        }
        Err(err) => {
            log::warn!("{} failed: {err}", command.label());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct Canned {
        reply: RefCell<Vec<Result<ExecResponse, EndpointError>>>,
        seen: RefCell<Vec<String>>,
    }

    impl CommandEndpoint for Canned {
        type Error = EndpointError;

        async fn exec(&self, script: &str) -> Result<ExecResponse, Self::Error> {
            self.seen.borrow_mut().push(script.to_string());
            self.reply
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(EndpointError::Transport("empty".into())))
        }
    }

    #[test]
    fn decodes_known_and_extra_fields() {
        let response = ExecResponse::from_json_text(
            r#"{"success":true,"message":"ok","difficulty":"Hard","rounds":8}"#,
        )
        .unwrap();
        assert!(response.accepted());
        assert_eq!(response.message.as_deref(), Some("ok"));
        assert_eq!(response.text("difficulty"), Some("Hard"));
        assert_eq!(response.positive_u32("rounds"), Some(8));
        assert_eq!(response.positive_u32("missing"), None);
    }

    #[test]
    fn error_field_blocks_acceptance() {
        let response =
            ExecResponse::from_json_text(r#"{"success":true,"ERROR":"attempt to call nil"}"#)
                .unwrap();
        assert!(!response.accepted());
        assert_eq!(response.error.as_deref(), Some("attempt to call nil"));
    }

    #[test]
    fn non_object_json_is_kept_as_result() {
        let response = ExecResponse::from_json_text("42").unwrap();
        assert_eq!(response.field("result"), Some(&Value::from(42)));
        assert!(!response.accepted());
        assert!(ExecResponse::from_json_text("<html>").is_err());
    }

    #[test]
    fn positive_u32_treats_zero_as_absent() {
        let response =
            ExecResponse::from_json_text(r#"{"timeLimit":0,"rounds":2.7,"speed":"fast"}"#)
                .unwrap();
        assert_eq!(response.positive_u32("timeLimit"), None);
        assert_eq!(response.positive_u32("rounds"), Some(2));
        assert_eq!(response.positive_u32("speed"), None);
    }

    #[test]
    fn exec_url_trims_trailing_slashes() {
        assert_eq!(exec_url("/api"), "/api/exec.lua");
        assert_eq!(exec_url("http://ee.local:8080//"), "http://ee.local:8080/exec.lua");
        assert_eq!(exec_url(""), "/exec.lua");
    }

    #[test]
    fn exec_quietly_swallows_transport_errors() {
        let endpoint = Canned {
            reply: RefCell::new(vec![Err(EndpointError::Status {
                status: 502,
                status_text: String::from("Bad Gateway"),
            })]),
            seen: RefCell::new(Vec::new()),
        };
        let result = block_on(exec_quietly(
            &endpoint,
            RemoteCommand::SpawnPlanet,
            "Audacity",
        ));
        assert!(result.is_none());
        assert_eq!(endpoint.seen.borrow().len(), 1);
    }

    #[test]
    fn exec_quietly_passes_responses_through() {
        let endpoint = Canned {
            reply: RefCell::new(vec![Ok(ExecResponse {
                success: Some(true),
                ..ExecResponse::default()
            })]),
            seen: RefCell::new(Vec::new()),
        };
        let result = block_on(exec_quietly(
            &endpoint,
            RemoteCommand::ReadDifficulty,
            "Audacity",
        ))
        .expect("response");
        assert!(result.accepted());
        assert!(endpoint.seen.borrow()[0].contains("gameSettings"));
    }
}
