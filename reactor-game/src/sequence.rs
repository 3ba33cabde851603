//! Reactor Realignment: the sequence-recall state machine.
//!
//! Each round appends one random symbol, replays the whole sequence and then
//! checks presses one by one against it. A countdown runs alongside and breaches
//! the core when it expires.
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    FIRST_ROUND_DELAY_MS, NOTICE_CANNOT_CONNECT, NOTICE_REACTOR_BREACH, NOTICE_REACTOR_STABILIZED,
    NOTICE_REPEAT_SEQUENCE, NOTICE_ROUND_COMPLETE, NOTICE_WRONG_SEQUENCE, PRESS_FLASH_MS,
    ROUND_TRANSITION_MS, TERMINAL_DISPLAY_MS,
};
use crate::countdown::{Countdown, CountdownTick};
use crate::difficulty::DifficultySettings;
use crate::effects::{Effects, Scheduled};
use crate::notice::Notice;
use crate::numbers::len_to_u32;
use crate::script::{GameKind, RemoteCommand};
use crate::session::StartPlan;
use crate::symbol::Symbol;

const GAME: GameKind = GameKind::ReactorRealignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencePhase {
    #[default]
    Idle,
    Playback,
    Input,
    Success,
    Failure,
}

impl SequencePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playback => "playback",
            Self::Input => "input",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for SequencePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceGameState {
    pub sequence: Vec<Symbol>,
    pub player_input: Vec<Symbol>,
    pub round: u32,
    pub total_rounds: u32,
    pub time_remaining: u32,
    pub active: bool,
    pub phase: SequencePhase,
}

impl SequenceGameState {
    fn fresh(settings: &DifficultySettings) -> Self {
        Self {
            sequence: Vec::new(),
            player_input: Vec::new(),
            round: 1,
            total_rounds: settings.rounds,
            time_remaining: settings.time_limit,
            active: false,
            phase: SequencePhase::Idle,
        }
    }
}

impl Default for SequenceGameState {
    fn default() -> Self {
        Self::fresh(&DifficultySettings::default())
    }
}

/// Delayed transitions the host runs on the machine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceStep {
    BeginFirstRound,
    PlaybackStep,
    /// Unlight the pad if the flashed symbol is still the one shown.
    ClearFlash(Symbol),
    Retry,
    NextRound,
    Reset,
}

/// What a single press did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressOutcome {
    Ignored,
    Accepted,
    Mismatch,
    RoundCleared,
    Completed,
}

pub type SequenceEffects = Effects<SequenceStep>;

#[derive(Debug, Clone)]
pub struct SequenceGame {
    state: SequenceGameState,
    settings: DifficultySettings,
    rng: ChaCha20Rng,
    countdown: Countdown,
    epoch: u32,
    highlighted: Option<Symbol>,
    notice: Option<Notice>,
    playback_cursor: usize,
}

impl SequenceGame {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let settings = DifficultySettings::default();
        Self {
            state: SequenceGameState::fresh(&settings),
            countdown: Countdown::new(settings.time_limit),
            settings,
            rng: ChaCha20Rng::seed_from_u64(seed),
            epoch: 0,
            highlighted: None,
            notice: None,
            playback_cursor: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SequenceGameState {
        &self.state
    }

    #[must_use]
    pub const fn settings(&self) -> &DifficultySettings {
        &self.settings
    }

    /// Symbol currently lit on the pad, from playback or a press flash.
    #[must_use]
    pub const fn highlighted(&self) -> Option<Symbol> {
        self.highlighted
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    #[must_use]
    pub const fn countdown(&self) -> Countdown {
        self.countdown
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.active
    }

    /// Adopt new settings. Ignored while a game is running.
    pub fn apply_settings(&mut self, settings: DifficultySettings) {
        if self.state.active {
            return;
        }
        self.state.total_rounds = settings.rounds;
        self.state.time_remaining = settings.time_limit;
        self.countdown = Countdown::new(settings.time_limit);
        self.settings = settings;
    }

    /// Begin a run once the remote side has been negotiated.
    ///
    /// Without a connection the machine stays idle and shows the
    /// connection failure.
    pub fn start_with(&mut self, plan: StartPlan) -> SequenceEffects {
        if self.state.active {
            return Effects::none();
        }
        if let Some(settings) = plan.settings {
            self.notice = Some(settings.notice());
            self.apply_settings(settings);
        }
        if !plan.connected {
            self.notice = Some(Notice::failure(NOTICE_CANNOT_CONNECT));
            return Effects::none();
        }

        self.epoch = self.epoch.wrapping_add(1);
        self.state = SequenceGameState::fresh(&self.settings);
        self.state.active = true;
        self.countdown = Countdown::new(self.settings.time_limit);
        self.highlighted = None;
        self.playback_cursor = 0;
        log::info!(
            "reactor realignment started: {} rounds, {}s",
            self.settings.rounds,
            self.settings.time_limit
        );
        Effects::none().then(FIRST_ROUND_DELAY_MS, SequenceStep::BeginFirstRound, self.epoch)
    }

    /// Run a follow-up previously handed to the host. Stale epochs are dropped.
    pub fn run_follow_up(&mut self, scheduled: Scheduled<SequenceStep>) -> SequenceEffects {
        if scheduled.epoch != self.epoch {
            log::debug!("dropping stale {:?}", scheduled.step);
            return Effects::none();
        }
        match scheduled.step {
            SequenceStep::Reset => {
                self.reset();
                Effects::none()
            }
            _ if !self.state.active => Effects::none(),
            SequenceStep::BeginFirstRound => self.begin_round(),
            SequenceStep::PlaybackStep => self.playback_step(),
            SequenceStep::ClearFlash(symbol) => {
                if self.state.phase != SequencePhase::Playback && self.highlighted == Some(symbol) {
                    self.highlighted = None;
                }
                Effects::none()
            }
            SequenceStep::Retry => self.begin_playback(),
            SequenceStep::NextRound => {
                self.state.round += 1;
                self.begin_round()
            }
        }
    }

    /// Compare a press against the sequence at the next position.
    pub fn press(&mut self, symbol: Symbol) -> (PressOutcome, SequenceEffects) {
        if !self.state.active || self.state.phase != SequencePhase::Input {
            return (PressOutcome::Ignored, Effects::none());
        }
        let position = self.state.player_input.len();
        let Some(&expected) = self.state.sequence.get(position) else {
            return (PressOutcome::Ignored, Effects::none());
        };

        self.highlighted = Some(symbol);
        let flash =
            Effects::none().then(PRESS_FLASH_MS, SequenceStep::ClearFlash(symbol), self.epoch);

        if expected != symbol {
            self.state.player_input.clear();
            self.state.phase = SequencePhase::Failure;
            self.notice = Some(Notice::failure(NOTICE_WRONG_SEQUENCE));
            let effects = flash.then(ROUND_TRANSITION_MS, SequenceStep::Retry, self.epoch);
            return (PressOutcome::Mismatch, effects);
        }

        self.state.player_input.push(symbol);
        if self.state.player_input.len() < self.state.sequence.len() {
            return (PressOutcome::Accepted, flash);
        }

        if self.state.round >= self.state.total_rounds {
            return (PressOutcome::Completed, self.succeed());
        }
        self.state.phase = SequencePhase::Success;
        self.notice =
            Some(Notice::success(NOTICE_ROUND_COMPLETE).with_arg("round", self.state.round));
        let effects = flash.then(ROUND_TRANSITION_MS, SequenceStep::NextRound, self.epoch);
        (PressOutcome::RoundCleared, effects)
    }

    /// One countdown second. Expiry breaches the core whatever the round is doing.
    pub fn tick_second(&mut self) -> SequenceEffects {
        if !self.state.active {
            return Effects::none();
        }
        match self.countdown.tick() {
            CountdownTick::Running(left) => {
                self.state.time_remaining = left;
                Effects::none()
            }
            CountdownTick::Expired => {
                self.state.time_remaining = 0;
                self.fail()
            }
        }
    }

    /// The hidden warning-glyph control: breach now.
    pub fn forfeit(&mut self) -> SequenceEffects {
        if self.state.active {
            self.fail()
        } else {
            Effects::command(RemoteCommand::Breach { game: GAME })
        }
    }

    /// Back to idle with the current settings. Pending follow-ups go stale.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = SequenceGameState::fresh(&self.settings);
        self.countdown = Countdown::new(self.settings.time_limit);
        self.highlighted = None;
        self.notice = None;
        self.playback_cursor = 0;
    }

    fn begin_round(&mut self) -> SequenceEffects {
        let symbol = Symbol::random(&mut self.rng);
        self.state.sequence.push(symbol);
        debug_assert_eq!(len_to_u32(self.state.sequence.len()), self.state.round);
        self.begin_playback()
    }

    fn begin_playback(&mut self) -> SequenceEffects {
        self.state.phase = SequencePhase::Playback;
        self.state.player_input.clear();
        self.highlighted = None;
        self.playback_cursor = 0;
        Effects::none().then(
            self.settings.sequence_speed,
            SequenceStep::PlaybackStep,
            self.epoch,
        )
    }

    // Even cursor positions light a symbol, odd ones clear it.
    fn playback_step(&mut self) -> SequenceEffects {
        if self.state.phase != SequencePhase::Playback {
            return Effects::none();
        }
        let cursor = self.playback_cursor;
        self.highlighted = if cursor % 2 == 0 {
            self.state.sequence.get(cursor / 2).copied()
        } else {
            None
        };
        self.playback_cursor += 1;

        if self.playback_cursor >= self.state.sequence.len() * 2 {
            self.highlighted = None;
            self.state.phase = SequencePhase::Input;
            self.notice = Some(Notice::neutral(NOTICE_REPEAT_SEQUENCE));
            return Effects::none();
        }
        Effects::none().then(
            self.settings.sequence_speed,
            SequenceStep::PlaybackStep,
            self.epoch,
        )
    }

    fn succeed(&mut self) -> SequenceEffects {
        log::info!("reactor realignment complete after {} rounds", self.state.round);
        self.finish(SequencePhase::Success, Notice::success(NOTICE_REACTOR_STABILIZED));
        Effects::command(RemoteCommand::Stabilize { game: GAME }).then(
            TERMINAL_DISPLAY_MS,
            SequenceStep::Reset,
            self.epoch,
        )
    }

    fn fail(&mut self) -> SequenceEffects {
        log::info!("reactor breach in round {}", self.state.round);
        self.finish(SequencePhase::Failure, Notice::failure(NOTICE_REACTOR_BREACH));
        Effects::command(RemoteCommand::Breach { game: GAME }).then(
            TERMINAL_DISPLAY_MS,
            SequenceStep::Reset,
            self.epoch,
        )
    }

    fn finish(&mut self, phase: SequencePhase, notice: Notice) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state.active = false;
        self.state.phase = phase;
        self.highlighted = None;
        self.notice = Some(notice);
    }
}
