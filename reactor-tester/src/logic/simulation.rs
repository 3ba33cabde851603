//! Runs a state machine against a virtual clock.
//!
//! The host side of the scheduling contract: periodic drivers, delayed
//! follow-ups and player input all become events on one queue, and every
//! command a transition asks for is sent through the configured ship link.
use reactor_game::constants::COUNTDOWN_PERIOD_MS;
use reactor_game::constants::COOLANT_MAX;
use reactor_game::{
    CommandEndpoint, Effects, GameKind, PowerGame, PowerStep, RemoteCommand, Scheduled,
    SequenceGame, SequenceStep, ShipLink, StartPlan, compute_stability,
};
use serde::Serialize;
use std::fmt::Debug;

use super::clock::VirtualClock;

/// What the simulation host needs from a game.
pub trait SimMachine {
    type Step: Copy + Debug;

    fn follow_up(&mut self, scheduled: Scheduled<Self::Step>) -> Effects<Self::Step>;

    fn countdown(&mut self) -> Effects<Self::Step>;

    /// Period of the fast driver, for machines that have one.
    fn tick_period(&self) -> Option<u32> {
        None
    }

    fn tick(&mut self) -> Effects<Self::Step> {
        Effects::none()
    }

    fn active(&self) -> bool;

    /// Round reached, or nodes in tolerance.
    fn progress(&self) -> u32;

    /// Describe any broken invariant in the current state.
    fn audit(&self) -> Option<String> {
        None
    }
}

impl SimMachine for SequenceGame {
    type Step = SequenceStep;

    fn follow_up(&mut self, scheduled: Scheduled<SequenceStep>) -> Effects<SequenceStep> {
        self.run_follow_up(scheduled)
    }

    fn countdown(&mut self) -> Effects<SequenceStep> {
        self.tick_second()
    }

    fn active(&self) -> bool {
        self.is_active()
    }

    fn progress(&self) -> u32 {
        if self.is_active() { self.state().round } else { 0 }
    }
}

impl SimMachine for PowerGame {
    type Step = PowerStep;

    fn follow_up(&mut self, scheduled: Scheduled<PowerStep>) -> Effects<PowerStep> {
        self.run_follow_up(scheduled)
    }

    fn countdown(&mut self) -> Effects<PowerStep> {
        self.tick_second()
    }

    fn tick_period(&self) -> Option<u32> {
        Some(self.config().tick_ms)
    }

    fn tick(&mut self) -> Effects<PowerStep> {
        PowerGame::tick(self)
    }

    fn active(&self) -> bool {
        self.is_active()
    }

    fn progress(&self) -> u32 {
        let tolerance = self.config().tolerance;
        let balanced = self
            .state()
            .nodes()
            .iter()
            .filter(|node| node.is_balanced(tolerance))
            .count();
        u32::try_from(balanced).unwrap_or(u32::MAX)
    }

    fn audit(&self) -> Option<String> {
        let state = self.state();
        let expected = compute_stability(state.nodes(), self.config());
        if state.core_stability_centi() != expected {
            return Some(format!(
                "stability {} does not match derived {}",
                state.core_stability_centi(),
                expected
            ));
        }
        if state.coolant_centi() > COOLANT_MAX {
            return Some(format!("coolant {} above cap", state.coolant_centi()));
        }
        None
    }
}

/// Scripted stand-in for the person at the console.
pub trait Player<M: SimMachine> {
    /// How often the player gets to act.
    fn think_ms(&self) -> u32;

    fn act(&mut self, game: &mut M, log: &mut RunLog) -> Effects<M::Step>;
}

/// Counters the players and the host keep while a run is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunLog {
    pub presses: u32,
    pub mismatches: u32,
    pub transfers: u32,
    pub cooldowns: u32,
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Stabilized,
    Breached,
    NotStarted,
    Unfinished,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub game: GameKind,
    pub seed: u64,
    pub connected: bool,
    pub outcome: Outcome,
    pub commands: Vec<String>,
    pub terminal_commands: usize,
    pub breach_commands: usize,
    pub elapsed_ms: u64,
    pub peak_progress: u32,
    pub log: RunLog,
}

#[derive(Debug, Clone, Copy)]
enum Event<S> {
    FollowUp(Scheduled<S>),
    Countdown,
    Tick,
    Think,
}

/// One game from negotiation to the reset after its terminal state.
pub struct Simulation<'a, E: CommandEndpoint> {
    link: &'a ShipLink<E>,
    horizon_ms: u64,
}

impl<'a, E: CommandEndpoint> Simulation<'a, E> {
    pub const fn new(link: &'a ShipLink<E>, horizon_ms: u64) -> Self {
        Self { link, horizon_ms }
    }

    pub async fn run<M, P>(
        &self,
        kind: GameKind,
        seed: u64,
        game: &mut M,
        player: &mut P,
        begin: impl FnOnce(&mut M, StartPlan) -> Effects<M::Step>,
    ) -> RunSummary
    where
        M: SimMachine,
        P: Player<M>,
    {
        let plan = self.link.negotiate(kind).await;
        let connected = plan.connected;
        let mut clock = VirtualClock::new();
        let mut commands = Vec::new();
        let mut log = RunLog::default();
        let mut peak_progress = 0;

        let effects = begin(game, plan);
        self.absorb(&mut clock, &mut commands, effects).await;
        if game.active() {
            clock.schedule(COUNTDOWN_PERIOD_MS, Event::Countdown);
            if let Some(period) = game.tick_period() {
                clock.schedule(period, Event::Tick);
            }
            clock.schedule(player.think_ms(), Event::Think);
        }

        while let Some(event) = clock.advance() {
            if clock.now_ms() > self.horizon_ms {
                log::warn!("{kind} seed {seed}: horizon reached with events pending");
                break;
            }
            peak_progress = peak_progress.max(game.progress());
            let effects = match event {
                Event::FollowUp(scheduled) => game.follow_up(scheduled),
                Event::Countdown if game.active() => {
                    clock.schedule(COUNTDOWN_PERIOD_MS, Event::Countdown);
                    game.countdown()
                }
                Event::Tick if game.active() => {
                    if let Some(period) = game.tick_period() {
                        clock.schedule(period, Event::Tick);
                    }
                    let effects = game.tick();
                    if let Some(violation) = game.audit() {
                        log.violations
                            .push(format!("t={}ms: {violation}", clock.now_ms()));
                    }
                    effects
                }
                Event::Think if game.active() => {
                    clock.schedule(player.think_ms(), Event::Think);
                    player.act(game, &mut log)
                }
                Event::Countdown | Event::Tick | Event::Think => Effects::none(),
            };
            self.absorb(&mut clock, &mut commands, effects).await;
        }

        summarize(kind, seed, connected, &commands, clock.now_ms(), peak_progress, log)
    }

    async fn absorb<S: Copy>(
        &self,
        clock: &mut VirtualClock<Event<S>>,
        commands: &mut Vec<RemoteCommand>,
        effects: Effects<S>,
    ) {
        if let Some(command) = effects.command {
            commands.push(command);
            let _ = self.link.dispatch(command).await;
        }
        for follow_up in effects.follow_ups {
            clock.schedule(follow_up.after_ms, Event::FollowUp(follow_up));
        }
    }
}

fn summarize(
    game: GameKind,
    seed: u64,
    connected: bool,
    commands: &[RemoteCommand],
    elapsed_ms: u64,
    peak_progress: u32,
    log: RunLog,
) -> RunSummary {
    let terminal: Vec<RemoteCommand> = commands
        .iter()
        .copied()
        .filter(|c| matches!(c, RemoteCommand::Stabilize { .. } | RemoteCommand::Breach { .. }))
        .collect();
    let outcome = match terminal.first() {
        _ if !connected => Outcome::NotStarted,
        Some(RemoteCommand::Stabilize { .. }) => Outcome::Stabilized,
        Some(RemoteCommand::Breach { .. }) => Outcome::Breached,
        _ => Outcome::Unfinished,
    };
    RunSummary {
        game,
        seed,
        connected,
        outcome,
        commands: commands.iter().map(|c| c.label().to_string()).collect(),
        terminal_commands: terminal.len(),
        breach_commands: terminal.iter().filter(|c| c.is_breach()).count(),
        elapsed_ms,
        peak_progress,
        log,
    }
}
