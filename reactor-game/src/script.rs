//! Lua templates sent to the Empty Epsilon scripting console.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    ReactorRealignment,
    WarpCoreBalancing,
}

impl GameKind {
    pub const ALL: [Self; 2] = [Self::ReactorRealignment, Self::WarpCoreBalancing];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ReactorRealignment => "reactor",
            Self::WarpCoreBalancing => "warp",
        }
    }

    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::ReactorRealignment => "game.reactor.title",
            Self::WarpCoreBalancing => "game.warp.title",
        }
    }

    #[must_use]
    pub const fn default_callsign(self) -> &'static str {
        match self {
            Self::ReactorRealignment => "Audacity",
            Self::WarpCoreBalancing => "PL197",
        }
    }

    const fn warning_line(self) -> &'static str {
        match self {
            Self::ReactorRealignment => {
                "WARNING: Warp core instability detected! Follow the stabilization sequence!"
            }
            Self::WarpCoreBalancing => {
                "WARNING: Warp core instability detected! Balance power nodes!"
            }
        }
    }

    const fn stabilized_line(self) -> &'static str {
        match self {
            Self::ReactorRealignment => "Reactor core successfully stabilized!",
            Self::WarpCoreBalancing => "Warp core successfully stabilized!",
        }
    }

    const fn breach_api(self) -> &'static str {
        match self {
            Self::ReactorRealignment => "reactorCoreBreach",
            Self::WarpCoreBalancing => "warpCoreBreach",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A command the front-end sends to the remote console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RemoteCommand {
    ReadDifficulty,
    Initialize { game: GameKind },
    Stabilize { game: GameKind },
    Breach { game: GameKind },
    SpawnPlanet,
}

impl RemoteCommand {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReadDifficulty => "read-difficulty",
            Self::Initialize { .. } => "initialize",
            Self::Stabilize { .. } => "stabilize",
            Self::Breach { .. } => "breach",
            Self::SpawnPlanet => "spawn-planet",
        }
    }

    #[must_use]
    pub const fn is_breach(self) -> bool {
        matches!(self, Self::Breach { .. })
    }

    /// Render the Lua body for the given ship callsign.
    #[must_use]
    pub fn render(self, callsign: &str) -> String {
        let ship = lua_string(callsign);
        match self {
            Self::ReadDifficulty => READ_DIFFICULTY.to_string(),
            Self::Initialize { game } => find_ship(
                &ship,
                &format!(
                    "all[i]:setSystemHealth(\"reactor\", 0.3)\n      all[i]:addToShipLog({}, \"Red\")\n      return {{success = true}}",
                    lua_string(game.warning_line())
                ),
            ),
            Self::Stabilize { game } => find_ship(
                &ship,
                &format!(
                    "all[i]:setSystemHealth(\"reactor\", 1.0)\n      all[i]:addToShipLog({}, \"Green\")\n      return {{success = true, message = \"Core stabilized\"}}",
                    lua_string(game.stabilized_line())
                ),
            ),
            Self::Breach { game } => {
                format!("return _G.scenarioApi.{}({ship})", game.breach_api())
            }
            Self::SpawnPlanet => SPAWN_PLANET.to_string(),
        }
    }
}

const READ_DIFFICULTY: &str = r#"
if _G.gameSettings and _G.gameSettings.difficulty then
  return {
    difficulty = _G.gameSettings.difficulty,
    timeLimit = _G.gameSettings.timeLimit,
    rounds = _G.gameSettings.rounds,
    sequenceSpeed = _G.gameSettings.sequenceSpeed
  }
else
  return {difficulty = "Easy", timeLimit = 60, rounds = 5, sequenceSpeed = 500}
end
"#;

const SPAWN_PLANET: &str = r#"
local planet = Planet():setPosition(0, 0)
planet:setPlanetRadius(3000)
planet:setDistanceFromMovementPlane(-2000)
planet:setPlanetSurfaceTexture("planets/planet-1.png")
planet:setPlanetAtmosphereTexture("planets/atmosphere.png")
planet:setPlanetAtmosphereColor(0.2, 0.2, 1.0)
planet:setDescription("A habitable planet with breathable atmosphere")
planet:setCallSign("Planet Alpha")
return {success = true, message = "planet created"}
"#;

fn find_ship(ship: &str, body: &str) -> String {
    format!(
        r#"
local all = getAllObjects()
for i = 1, #all do
  if all[i].typeName == "PlayerSpaceship" and all[i]:getCallSign() == {ship} then
      {body}
  end
end
return {{success = false, message = "Ship not found"}}
"#
    )
}

/// Quote a value as a Lua string literal.
#[must_use]
pub fn lua_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            // Fixed-width escapes so a following digit is never absorbed.
            c if c.is_control() => {
                let mut buf = [0; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "\\{byte:03}");
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breach_targets_game_specific_api() {
        let reactor = RemoteCommand::Breach {
            game: GameKind::ReactorRealignment,
        }
        .render("Audacity");
        assert_eq!(
            reactor,
            "return _G.scenarioApi.reactorCoreBreach(\"Audacity\")"
        );
        let warp = RemoteCommand::Breach {
            game: GameKind::WarpCoreBalancing,
        }
        .render("PL197");
        assert!(warp.contains("warpCoreBreach(\"PL197\")"));
    }

    #[test]
    fn initialize_and_stabilize_set_reactor_health() {
        let init = RemoteCommand::Initialize {
            game: GameKind::WarpCoreBalancing,
        }
        .render("PL197");
        assert!(init.contains("getCallSign() == \"PL197\""));
        assert!(init.contains("setSystemHealth(\"reactor\", 0.3)"));
        assert!(init.contains("Balance power nodes!"));
        assert!(init.contains("Ship not found"));

        let done = RemoteCommand::Stabilize {
            game: GameKind::ReactorRealignment,
        }
        .render("Audacity");
        assert!(done.contains("setSystemHealth(\"reactor\", 1.0)"));
        assert!(done.contains("Reactor core successfully stabilized!"));
        assert!(done.contains("\"Green\""));
    }

    #[test]
    fn callsigns_are_escaped() {
        let script = RemoteCommand::Breach {
            game: GameKind::ReactorRealignment,
        }
        .render("Bad\") os.exit(\"");
        assert!(script.contains(r#"reactorCoreBreach("Bad\") os.exit(\"")"#));
        assert_eq!(lua_string("a\\b\nc"), r#""a\\b\nc""#);
    }

    #[test]
    fn control_escapes_keep_following_digits_literal() {
        assert_eq!(lua_string("A\u{1}2"), r#""A\0012""#);
        assert_eq!(lua_string("\0"), r#""\000""#);
        assert_eq!(lua_string("x\u{85}"), r#""x\194\133""#);
    }

    #[test]
    fn fixed_scripts_ignore_callsign() {
        assert!(
            RemoteCommand::ReadDifficulty
                .render("x")
                .contains("_G.gameSettings.sequenceSpeed")
        );
        assert!(
            RemoteCommand::SpawnPlanet
                .render("x")
                .contains("Planet Alpha")
        );
    }
}
