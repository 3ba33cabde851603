//! Warp Core Balancing: the power-balancing state machine.
//!
//! Power and coolant are held in centi-units so transfers conserve total
//! power exactly. Stability is derived from the nodes on every tick and has
//! no setter.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BALANCE_TOLERANCE, CENTI, COOLANT_COST, COOLANT_LOW, COOLANT_MAX, COOLANT_REGEN_PER_TICK,
    COOLDOWN_DROP, DEFAULT_TIME_LIMIT_SECS, FLUCTUATION, NODE_COUNT, NODE_DRIFT_WARNING,
    NOTICE_BALANCE_NODES, NOTICE_CANNOT_CONNECT, NOTICE_WARP_BREACH, NOTICE_WARP_STABILIZED,
    OVERHEAT_PENALTY, POWER_CEILING, POWER_FLOOR, POWER_MAX, POWER_TICK_MS, SEED_POWER_MAX_UNITS,
    SEED_POWER_MIN_UNITS, STABILITY_MAX, TARGET_POWER, TERMINAL_DISPLAY_MS, TRANSFER_AMOUNT,
};
use crate::countdown::{Countdown, CountdownTick};
use crate::effects::{Effects, Scheduled};
use crate::notice::Notice;
use crate::numbers::{centi_to_units, len_to_u32, ucenti_to_units};
use crate::script::{GameKind, RemoteCommand};
use crate::session::StartPlan;

const GAME: GameKind = GameKind::WarpCoreBalancing;

/// Tunables for the power machine, all power values in centi-units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    pub node_count: usize,
    pub tick_ms: u32,
    pub time_limit: u32,
    pub target: i32,
    pub seed_min_units: i32,
    pub seed_max_units: i32,
    pub fluctuation: i32,
    pub floor: i32,
    pub ceiling: i32,
    pub tolerance: i32,
    pub overheat_penalty: i32,
    pub transfer_amount: i32,
    pub cooldown_drop: i32,
    pub coolant_cost: u32,
    pub coolant_regen: u32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            node_count: NODE_COUNT,
            tick_ms: POWER_TICK_MS,
            time_limit: DEFAULT_TIME_LIMIT_SECS,
            target: TARGET_POWER,
            seed_min_units: SEED_POWER_MIN_UNITS,
            seed_max_units: SEED_POWER_MAX_UNITS,
            fluctuation: FLUCTUATION,
            floor: POWER_FLOOR,
            ceiling: POWER_CEILING,
            tolerance: BALANCE_TOLERANCE,
            overheat_penalty: OVERHEAT_PENALTY,
            transfer_amount: TRANSFER_AMOUNT,
            cooldown_drop: COOLDOWN_DROP,
            coolant_cost: COOLANT_COST,
            coolant_regen: COOLANT_REGEN_PER_TICK,
        }
    }
}

impl PowerConfig {
    /// Defaults with random drift switched off.
    #[must_use]
    pub fn calm() -> Self {
        Self {
            fluctuation: 0,
            ..Self::default()
        }
    }
}

/// Colour band a node is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLevel {
    Overheating,
    Balanced,
    Drifting,
    Critical,
}

impl NodeLevel {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Overheating => "node-overheating",
            Self::Balanced => "node-balanced",
            Self::Drifting => "node-drifting",
            Self::Critical => "node-critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerNode {
    pub id: usize,
    power: i32,
    target: i32,
    pub overheating: bool,
}

impl PowerNode {
    #[must_use]
    pub const fn new(id: usize, power_centi: i32) -> Self {
        Self {
            id,
            power: power_centi,
            target: TARGET_POWER,
            overheating: false,
        }
    }

    #[must_use]
    pub const fn power_centi(&self) -> i32 {
        self.power
    }

    #[must_use]
    pub fn power(&self) -> f32 {
        centi_to_units(self.power)
    }

    #[must_use]
    pub fn target_power(&self) -> f32 {
        centi_to_units(self.target)
    }

    #[must_use]
    pub const fn deviation(&self) -> i32 {
        (self.power - self.target).abs()
    }

    #[must_use]
    pub const fn is_balanced(&self, tolerance: i32) -> bool {
        self.deviation() < tolerance && !self.overheating
    }

    #[must_use]
    pub const fn level(&self) -> NodeLevel {
        if self.overheating {
            NodeLevel::Overheating
        } else if self.deviation() < BALANCE_TOLERANCE {
            NodeLevel::Balanced
        } else if self.deviation() > NODE_DRIFT_WARNING {
            NodeLevel::Critical
        } else {
            NodeLevel::Drifting
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerGameState {
    nodes: Vec<PowerNode>,
    core_stability: i32,
    coolant: u32,
    time_remaining: u32,
    active: bool,
}

impl PowerGameState {
    fn fresh(config: &PowerConfig) -> Self {
        Self {
            nodes: Vec::new(),
            core_stability: STABILITY_MAX,
            coolant: COOLANT_MAX,
            time_remaining: config.time_limit,
            active: false,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> &[PowerNode] {
        &self.nodes
    }

    #[must_use]
    pub fn core_stability(&self) -> f32 {
        centi_to_units(self.core_stability)
    }

    #[must_use]
    pub const fn core_stability_centi(&self) -> i32 {
        self.core_stability
    }

    #[must_use]
    pub fn coolant(&self) -> f32 {
        ucenti_to_units(self.coolant)
    }

    #[must_use]
    pub const fn coolant_centi(&self) -> u32 {
        self.coolant
    }

    #[must_use]
    pub const fn coolant_low(&self) -> bool {
        self.coolant < COOLANT_LOW
    }

    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Sum of node power in centi-units.
    #[must_use]
    pub fn total_power(&self) -> i64 {
        self.nodes.iter().map(|n| i64::from(n.power)).sum()
    }

    #[must_use]
    pub fn overheating_count(&self) -> u32 {
        len_to_u32(self.nodes.iter().filter(|n| n.overheating).count())
    }
}

/// `max(0, 100 - total deviation - penalty per overheating node)` in centi-units.
#[must_use]
pub fn compute_stability(nodes: &[PowerNode], config: &PowerConfig) -> i32 {
    let deviation: i64 = nodes.iter().map(|n| i64::from(n.deviation())).sum();
    let overheating = i64::try_from(nodes.iter().filter(|n| n.overheating).count())
        .unwrap_or(i64::MAX);
    let raw = i64::from(STABILITY_MAX)
        - deviation
        - overheating.saturating_mul(i64::from(config.overheat_penalty));
    i32::try_from(raw.max(0)).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerStep {
    Reset,
}

/// Result of clicking a node under the two-click protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionOutcome {
    Ignored,
    Armed,
    Disarmed,
    Transferred { moved: bool },
}

pub type PowerEffects = Effects<PowerStep>;

#[derive(Debug, Clone)]
pub struct PowerGame {
    state: PowerGameState,
    config: PowerConfig,
    rng: ChaCha20Rng,
    countdown: Countdown,
    epoch: u32,
    selected: Option<usize>,
    notice: Option<Notice>,
}

impl PowerGame {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, PowerConfig::default())
    }

    #[must_use]
    pub fn with_config(seed: u64, config: PowerConfig) -> Self {
        Self {
            state: PowerGameState::fresh(&config),
            countdown: Countdown::new(config.time_limit),
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
            epoch: 0,
            selected: None,
            notice: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PowerGameState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &PowerConfig {
        &self.config
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
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

    /// Begin a run once the initialization script has been answered.
    pub fn start_with(&mut self, plan: StartPlan) -> PowerEffects {
        if self.state.active {
            return Effects::none();
        }
        if !plan.connected {
            self.notice = Some(Notice::failure(NOTICE_CANNOT_CONNECT));
            return Effects::none();
        }
        let (low, high) = (self.config.seed_min_units, self.config.seed_max_units);
        let powers: Vec<i32> = (0..self.config.node_count)
            .map(|_| self.rng.gen_range(low..high.max(low + 1)) * CENTI)
            .collect();
        self.activate(&powers);
        Effects::none()
    }

    /// Activate with explicit node power (centi-units), skipping negotiation.
    pub fn start_with_nodes(&mut self, powers_centi: &[i32]) {
        if !self.state.active {
            self.activate(powers_centi);
        }
    }

    fn activate(&mut self, powers_centi: &[i32]) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = PowerGameState::fresh(&self.config);
        self.state.nodes = powers_centi
            .iter()
            .enumerate()
            .map(|(id, &power)| PowerNode {
                target: self.config.target,
                ..PowerNode::new(id, power)
            })
            .collect();
        self.state.active = true;
        self.countdown = Countdown::new(self.config.time_limit);
        self.selected = None;
        self.notice = Some(Notice::neutral(NOTICE_BALANCE_NODES));
        log::info!("warp core balancing started with {} nodes", self.state.nodes.len());
    }

    pub fn run_follow_up(&mut self, scheduled: Scheduled<PowerStep>) -> PowerEffects {
        if scheduled.epoch != self.epoch {
            return Effects::none();
        }
        match scheduled.step {
            PowerStep::Reset => self.reset(),
        }
        Effects::none()
    }

    /// One simulation tick: drift, clamp, regenerate coolant, re-derive
    /// stability, then check the win and loss conditions in that order.
    pub fn tick(&mut self) -> PowerEffects {
        if !self.state.active {
            return Effects::none();
        }
        let PowerConfig {
            fluctuation,
            floor,
            ceiling,
            coolant_regen,
            ..
        } = self.config;
        for node in &mut self.state.nodes {
            let drift = if fluctuation > 0 {
                self.rng.gen_range(-fluctuation..=fluctuation)
            } else {
                0
            };
            let next = node.power + drift;
            if next > ceiling {
                node.power = ceiling;
                node.overheating = true;
            } else if next < floor {
                node.power = floor;
            } else {
                node.power = next;
                node.overheating = false;
            }
        }
        self.state.coolant = (self.state.coolant + coolant_regen).min(COOLANT_MAX);
        self.state.core_stability = compute_stability(&self.state.nodes, &self.config);

        let tolerance = self.config.tolerance;
        if self.state.nodes.iter().all(|n| n.is_balanced(tolerance)) {
            return self.succeed();
        }
        if self.state.core_stability <= 0 {
            return self.fail();
        }
        Effects::none()
    }

    /// Move `transfer_amount` from one node to another. Nothing moves unless
    /// the source holds at least that much and the destination stays at or
    /// below [`POWER_MAX`].
    pub fn transfer(&mut self, from: usize, to: usize) -> bool {
        if !self.state.active || from == to {
            return false;
        }
        let amount = self.config.transfer_amount;
        let nodes = &mut self.state.nodes;
        if from >= nodes.len()
            || to >= nodes.len()
            || nodes[from].power < amount
            || nodes[to].power + amount > POWER_MAX
        {
            return false;
        }
        nodes[from].power -= amount;
        nodes[to].power += amount;
        true
    }

    /// Spend coolant to knock a node's power down and clear its overheat flag.
    pub fn cooldown(&mut self, node: usize) -> bool {
        if !self.state.active || self.state.coolant < self.config.coolant_cost {
            return false;
        }
        let drop = self.config.cooldown_drop;
        let Some(target) = self.state.nodes.get_mut(node) else {
            return false;
        };
        target.power = (target.power - drop).max(0);
        target.overheating = false;
        self.state.coolant -= self.config.coolant_cost;
        true
    }

    #[must_use]
    pub const fn can_cool(&self) -> bool {
        self.state.active && self.state.coolant >= self.config.coolant_cost
    }

    pub fn select_node(&mut self, node: usize) -> SelectionOutcome {
        if !self.state.active || node >= self.state.nodes.len() {
            return SelectionOutcome::Ignored;
        }
        match self.selected.take() {
            None => {
                self.selected = Some(node);
                SelectionOutcome::Armed
            }
            Some(armed) if armed == node => SelectionOutcome::Disarmed,
            Some(armed) => SelectionOutcome::Transferred {
                moved: self.transfer(armed, node),
            },
        }
    }

    pub fn tick_second(&mut self) -> PowerEffects {
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

    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = PowerGameState::fresh(&self.config);
        self.countdown = Countdown::new(self.config.time_limit);
        self.selected = None;
        self.notice = None;
    }

    fn succeed(&mut self) -> PowerEffects {
        log::info!("warp core stabilized with {}s left", self.state.time_remaining);
        self.finish(Notice::success(NOTICE_WARP_STABILIZED));
        Effects::command(RemoteCommand::Stabilize { game: GAME }).then(
            TERMINAL_DISPLAY_MS,
            PowerStep::Reset,
            self.epoch,
        )
    }

    fn fail(&mut self) -> PowerEffects {
        log::info!(
            "warp core breach: stability {}, {}s left",
            self.state.core_stability,
            self.state.time_remaining
        );
        self.finish(Notice::failure(NOTICE_WARP_BREACH));
        Effects::command(RemoteCommand::Breach { game: GAME }).then(
            TERMINAL_DISPLAY_MS,
            PowerStep::Reset,
            self.epoch,
        )
    }

    fn finish(&mut self, notice: Notice) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state.active = false;
        self.selected = None;
        self.notice = Some(notice);
    }
}
