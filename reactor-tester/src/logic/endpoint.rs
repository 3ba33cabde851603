use reactor_game::{CommandEndpoint, DifficultySettings, ExecResponse};
use serde_json::json;
use std::cell::RefCell;
use std::convert::Infallible;

/// How the simulated ship answers the lookup scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipScript {
    /// The callsign exists; every script succeeds.
    Accepting,
    /// No ship with that callsign; lookups report "Ship not found".
    Missing,
}

/// In-process scripting console. Keeps every script it was sent and
/// answers the way the game server's Lua would.
pub struct RecordingEndpoint {
    ship: ShipScript,
    settings: DifficultySettings,
    scripts: RefCell<Vec<String>>,
}

impl RecordingEndpoint {
    pub const fn new(ship: ShipScript, settings: DifficultySettings) -> Self {
        Self {
            ship,
            settings,
            scripts: RefCell::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }

    fn answer(&self, script: &str) -> ExecResponse {
        let value = if script.contains("_G.gameSettings") {
            serde_json::to_value(&self.settings).unwrap_or_else(|_| json!({}))
        } else if script.contains("getAllObjects") && self.ship == ShipScript::Missing {
            json!({ "success": false, "message": "Ship not found" })
        } else {
            json!({ "success": true })
        };
        serde_json::from_value(value).unwrap_or_default()
    }
}

impl CommandEndpoint for RecordingEndpoint {
    type Error = Infallible;

    async fn exec(&self, script: &str) -> Result<ExecResponse, Infallible> {
        self.scripts.borrow_mut().push(script.to_string());
        Ok(self.answer(script))
    }
}
