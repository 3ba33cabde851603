use reactor_game::{EndpointConfig, GameKind};
use yew::prelude::*;

/// UI state shared across routes. Connection settings live for the page
/// session only.
#[derive(Clone)]
pub struct AppState {
    pub high_contrast: UseStateHandle<bool>,
    pub reactor_config: UseStateHandle<EndpointConfig>,
    pub warp_config: UseStateHandle<EndpointConfig>,
    pub console_config: UseStateHandle<EndpointConfig>,
}

impl AppState {
    /// Settings handle for a route's page.
    #[must_use]
    pub const fn config_for(&self, game: Option<GameKind>) -> &UseStateHandle<EndpointConfig> {
        match game {
            Some(GameKind::ReactorRealignment) => &self.reactor_config,
            Some(GameKind::WarpCoreBalancing) => &self.warp_config,
            None => &self.console_config,
        }
    }
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        high_contrast: use_state(crate::a11y::high_contrast_enabled),
        reactor_config: use_state(|| EndpointConfig::for_game(GameKind::ReactorRealignment)),
        warp_config: use_state(|| EndpointConfig::for_game(GameKind::WarpCoreBalancing)),
        console_config: use_state(|| EndpointConfig::for_game(GameKind::ReactorRealignment)),
    }
}
