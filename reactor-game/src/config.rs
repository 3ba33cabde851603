//! Connection settings edited on the setup panel. Never persisted.
use serde::{Deserialize, Serialize};

use crate::endpoint::exec_url;
use crate::script::GameKind;

pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    pub callsign: String,
}

impl EndpointConfig {
    #[must_use]
    pub fn for_game(game: GameKind) -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            callsign: String::from(game.default_callsign()),
        }
    }

    #[must_use]
    pub fn exec_url(&self) -> String {
        exec_url(&self.base_url)
    }

    /// Callsign as typed, trimmed of surrounding whitespace.
    #[must_use]
    pub fn callsign(&self) -> &str {
        self.callsign.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_game_defaults() {
        let reactor = EndpointConfig::for_game(GameKind::ReactorRealignment);
        assert_eq!(reactor.callsign(), "Audacity");
        assert_eq!(reactor.exec_url(), "/api/exec.lua");
        let warp = EndpointConfig::for_game(GameKind::WarpCoreBalancing);
        assert_eq!(warp.callsign(), "PL197");
    }
}
