//! Reactor Ops Game Engine
//!
//! Platform-agnostic core for the Reactor Ops bridge mini-games. Both state
//! machines, the Lua templates they send to Empty Epsilon, and the contract
//! for the scripting endpoint live here, without UI or platform-specific
//! dependencies.

pub mod config;
pub mod constants;
pub mod countdown;
pub mod difficulty;
pub mod effects;
pub mod endpoint;
pub mod notice;
pub mod numbers;
pub mod power;
pub mod script;
pub mod sequence;
pub mod session;
pub mod symbol;

// Re-export commonly used types
pub use config::{DEFAULT_BASE_URL, EndpointConfig};
pub use countdown::{Countdown, CountdownTick};
pub use difficulty::DifficultySettings;
pub use effects::{Effects, Scheduled};
pub use endpoint::{CommandEndpoint, EndpointError, ExecResponse, exec_quietly, exec_url};
pub use notice::{Notice, Tone};
pub use power::{
    NodeLevel, PowerConfig, PowerEffects, PowerGame, PowerGameState, PowerNode, PowerStep,
    SelectionOutcome, compute_stability,
};
pub use script::{GameKind, RemoteCommand, lua_string};
pub use sequence::{
    PressOutcome, SequenceEffects, SequenceGame, SequenceGameState, SequencePhase, SequenceStep,
};
pub use session::{StartPlan, fire, negotiate_start};
pub use symbol::Symbol;

/// A configured connection to one ship on the game server.
///
/// Owns the endpoint implementation and the user-entered settings so
/// callers only deal in commands.
pub struct ShipLink<E>
where
    E: CommandEndpoint,
{
    endpoint: E,
    config: EndpointConfig,
}

impl<E> ShipLink<E>
where
    E: CommandEndpoint,
{
    pub const fn new(endpoint: E, config: EndpointConfig) -> Self {
        Self { endpoint, config }
    }

    pub const fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub const fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Read settings (if the game uses them) and initialize the ship.
    pub async fn negotiate(&self, game: GameKind) -> StartPlan {
        negotiate_start(&self.endpoint, game, self.config.callsign()).await
    }

    /// Send a command, returning the answer if one arrived.
    pub async fn dispatch(&self, command: RemoteCommand) -> Option<ExecResponse> {
        exec_quietly(&self.endpoint, command, self.config.callsign()).await
    }

    /// Spawn the test planet and hand back whatever the server said.
    ///
    /// # Errors
    ///
    /// Returns the endpoint error so the probe page can show it verbatim.
    pub async fn probe(&self) -> Result<ExecResponse, E::Error> {
        let script = RemoteCommand::SpawnPlanet.render(self.config.callsign());
        self.endpoint.exec(&script).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryEndpoint {
        scripts: Rc<RefCell<Vec<String>>>,
    }

    impl CommandEndpoint for MemoryEndpoint {
        type Error = Infallible;

        async fn exec(&self, script: &str) -> Result<ExecResponse, Self::Error> {
            self.scripts.borrow_mut().push(script.to_string());
            Ok(ExecResponse::from_json_text(r#"{"success":true}"#).unwrap_or_default())
        }
    }

    #[test]
    fn link_negotiates_and_dispatches_with_configured_callsign() {
        let endpoint = MemoryEndpoint::default();
        let link = ShipLink::new(
            endpoint.clone(),
            EndpointConfig {
                base_url: String::from("/api"),
                callsign: String::from("  Rocinante "),
            },
        );
        let plan = block_on(link.negotiate(GameKind::WarpCoreBalancing));
        assert!(plan.connected);

        let breach = block_on(link.dispatch(RemoteCommand::Breach {
            game: GameKind::WarpCoreBalancing,
        }));
        assert!(breach.is_some());
        let scripts = endpoint.scripts.borrow();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[1].ends_with("warpCoreBreach(\"Rocinante\")"));
    }

    #[test]
    fn probe_sends_spawn_planet() {
        let endpoint = MemoryEndpoint::default();
        let link = ShipLink::new(
            endpoint.clone(),
            EndpointConfig::for_game(GameKind::ReactorRealignment),
        );
        let response = block_on(link.probe()).unwrap();
        assert!(response.accepted());
        assert!(endpoint.scripts.borrow()[0].contains("Planet Alpha"));
    }
}
