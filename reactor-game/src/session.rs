//! Start negotiation with the remote console.
//!
//! Both games announce themselves before going live: the reactor game first
//! reads the scenario's difficulty, then each game sends its initialization
//! script. Only an accepted initialization lets the machine start.
use crate::difficulty::DifficultySettings;
use crate::endpoint::{CommandEndpoint, exec_quietly};
use crate::script::{GameKind, RemoteCommand};

/// Outcome of [`negotiate_start`], handed to a machine's `start_with`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartPlan {
    pub settings: Option<DifficultySettings>,
    pub connected: bool,
}

impl StartPlan {
    #[must_use]
    pub const fn connected(settings: Option<DifficultySettings>) -> Self {
        Self {
            settings,
            connected: true,
        }
    }
}

/// Read difficulty (reactor game only) and send the initialization script.
///
/// Transport failures surface as `connected == false`; a difficulty read
/// that gets no answer keeps the current settings.
pub async fn negotiate_start<E: CommandEndpoint>(
    endpoint: &E,
    game: GameKind,
    callsign: &str,
) -> StartPlan {
    let settings = if game == GameKind::ReactorRealignment {
        exec_quietly(endpoint, RemoteCommand::ReadDifficulty, callsign)
            .await
            .map(|response| DifficultySettings::from_response(&response))
    } else {
        None
    };

    let connected = exec_quietly(endpoint, RemoteCommand::Initialize { game }, callsign)
        .await
        .is_some_and(|response| response.accepted());
    if !connected {
        log::warn!("{game}: ship {callsign} did not accept initialization");
    }
    StartPlan {
        settings,
        connected,
    }
}

/// Send a terminal or forfeit command and forget about it.
pub async fn fire<E: CommandEndpoint>(endpoint: &E, command: RemoteCommand, callsign: &str) {
    let _ = exec_quietly(endpoint, command, callsign).await;
}
