use reactor_game::{
    Effects, PowerEffects, PowerGame, PressOutcome, SelectionOutcome, SequenceEffects,
    SequenceGame, SequencePhase, Symbol,
};
use serde::Serialize;

use super::simulation::{Player, RunLog};

const SEQUENCE_THINK_MS: u32 = 250;
const POWER_THINK_MS: u32 = 400;
/// Round on which the forgetful player makes their one mistake.
const SLIP_ROUND: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequencePolicy {
    /// Repeats every sequence correctly.
    Perfect,
    /// Misses one symbol once, then plays correctly.
    Forgetful,
    /// Never touches the pad.
    Idle,
}

impl SequencePolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Forgetful => "forgetful",
            Self::Idle => "idle",
        }
    }
}

pub struct SequencePlayer {
    policy: SequencePolicy,
    slipped: bool,
}

impl SequencePlayer {
    pub const fn new(policy: SequencePolicy) -> Self {
        Self {
            policy,
            slipped: false,
        }
    }

    fn choose(&mut self, expected: Symbol, round: u32) -> Symbol {
        if self.policy == SequencePolicy::Forgetful && !self.slipped && round >= SLIP_ROUND {
            self.slipped = true;
            return neighbour(expected);
        }
        expected
    }
}

fn neighbour(symbol: Symbol) -> Symbol {
    let index = Symbol::ALL.iter().position(|s| *s == symbol).unwrap_or(0);
    Symbol::ALL[(index + 1) % Symbol::ALL.len()]
}

impl Player<SequenceGame> for SequencePlayer {
    fn think_ms(&self) -> u32 {
        SEQUENCE_THINK_MS
    }

    fn act(&mut self, game: &mut SequenceGame, log: &mut RunLog) -> SequenceEffects {
        if self.policy == SequencePolicy::Idle {
            return Effects::none();
        }
        let state = game.state();
        if state.phase != SequencePhase::Input {
            return Effects::none();
        }
        let Some(&expected) = state.sequence.get(state.player_input.len()) else {
            return Effects::none();
        };
        let symbol = self.choose(expected, state.round);
        let (outcome, effects) = game.press(symbol);
        log.presses += 1;
        if outcome == PressOutcome::Mismatch {
            log.mismatches += 1;
        }
        effects
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPolicy {
    /// Cools hot nodes and moves power from the fullest node to the emptiest.
    Balancer,
    /// Watches the core drift.
    Idle,
}

impl PowerPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Balancer => "balancer",
            Self::Idle => "idle",
        }
    }
}

pub struct PowerPlayer {
    policy: PowerPolicy,
}

impl PowerPlayer {
    pub const fn new(policy: PowerPolicy) -> Self {
        Self { policy }
    }
}

impl Player<PowerGame> for PowerPlayer {
    fn think_ms(&self) -> u32 {
        POWER_THINK_MS
    }

    fn act(&mut self, game: &mut PowerGame, log: &mut RunLog) -> PowerEffects {
        if self.policy == PowerPolicy::Balancer {
            balance(game, log);
        }
        Effects::none()
    }
}

/// (node, power minus target, overheating)
type Reading = (usize, i32, bool);

fn balance(game: &mut PowerGame, log: &mut RunLog) {
    let (target, tolerance) = (game.config().target, game.config().tolerance);
    let readings: Vec<Reading> = game
        .state()
        .nodes()
        .iter()
        .map(|n| (n.id, n.power_centi() - target, n.overheating))
        .collect();

    if game.can_cool()
        && let Some(&(hot, ..)) = readings.iter().find(|(_, _, overheating)| *overheating)
    {
        cool(game, hot, log);
        return;
    }

    let over = readings
        .iter()
        .filter(|(_, dev, _)| *dev >= tolerance)
        .max_by_key(|(_, dev, _)| *dev);
    let under = readings
        .iter()
        .filter(|(_, dev, _)| *dev <= -tolerance)
        .min_by_key(|(_, dev, _)| *dev);

    match (over, under) {
        (Some(&(from, ..)), Some(&(to, ..))) => transfer(game, from, to, log),
        (Some(&(hot, ..)), None) => {
            if game.can_cool() {
                cool(game, hot, log);
            }
        }
        (None, Some(&(to, ..))) => {
            if let Some(&(from, ..)) = readings
                .iter()
                .filter(|(id, ..)| *id != to)
                .max_by_key(|(_, dev, _)| *dev)
            {
                transfer(game, from, to, log);
            }
        }
        (None, None) => {}
    }
}

fn cool(game: &mut PowerGame, node: usize, log: &mut RunLog) {
    if game.cooldown(node) {
        log.cooldowns += 1;
    }
}

/// Two clicks: arm the source, then pick the destination.
fn transfer(game: &mut PowerGame, from: usize, to: usize, log: &mut RunLog) {
    let before = game.state().total_power();
    let armed = game.select_node(from);
    let done = game.select_node(to);
    if armed != SelectionOutcome::Armed {
        log.violations
            .push(format!("click on node {from} did not arm it: {armed:?}"));
    }
    if done == (SelectionOutcome::Transferred { moved: true }) {
        log.transfers += 1;
    }
    let after = game.state().total_power();
    if before != after {
        log.violations.push(format!(
            "transfer {from}->{to} changed total power {before} -> {after}"
        ));
    }
}
