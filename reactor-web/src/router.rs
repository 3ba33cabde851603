use reactor_game::GameKind;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/reactor")]
    Reactor,
    #[at("/warp")]
    Warp,
    #[at("/console")]
    Console,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_game(game: GameKind) -> Self {
        match game {
            GameKind::ReactorRealignment => Self::Reactor,
            GameKind::WarpCoreBalancing => Self::Warp,
        }
    }

    /// Mini-game hosted on this route, if any.
    #[must_use]
    pub const fn game(&self) -> Option<GameKind> {
        match self {
            Self::Reactor => Some(GameKind::ReactorRealignment),
            Self::Warp => Some(GameKind::WarpCoreBalancing),
            Self::Home | Self::Console | Self::NotFound => None,
        }
    }

    #[must_use]
    pub const fn nav_key(&self) -> &'static str {
        match self {
            Self::Home | Self::NotFound => "nav.home",
            Self::Reactor => "nav.reactor",
            Self::Warp => "nav.warp",
            Self::Console => "nav.console",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_routes_round_trip() {
        for game in GameKind::ALL {
            assert_eq!(Route::from_game(game).game(), Some(game));
        }
        assert_eq!(Route::Console.game(), None);
    }

    #[test]
    fn paths_are_stable() {
        assert_eq!(Route::Reactor.to_path(), "/reactor");
        assert_eq!(Route::recognize("/warp"), Some(Route::Warp));
        assert_eq!(Route::recognize("/nowhere"), Some(Route::NotFound));
    }
}
