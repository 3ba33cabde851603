//! Named simulation plans the CLI can run.
use anyhow::Result;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use reactor_game::{DifficultySettings, GameKind, PowerConfig};

use crate::logic::endpoint::ShipScript;
use crate::logic::policy::{PowerPolicy, SequencePolicy};
use crate::logic::simulation::RunSummary;

pub mod catalog;

pub use catalog::{catalog_scenarios, find_scenario, list_scenarios};

pub type Expectation = fn(&RunSummary) -> Result<()>;

/// How the warp core's nodes are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLayout {
    /// The machine draws its own starting power.
    Seeded,
    /// Nodes mirror each other around the target in whole transfer steps,
    /// so the total is exactly balanced.
    Paired,
}

#[derive(Debug, Clone)]
pub enum Plan {
    Sequence {
        policy: SequencePolicy,
        settings: DifficultySettings,
        ship: ShipScript,
    },
    Power {
        policy: PowerPolicy,
        config: PowerConfig,
        layout: NodeLayout,
        ship: ShipScript,
    },
}

impl Plan {
    pub const fn game(&self) -> GameKind {
        match self {
            Self::Sequence { .. } => GameKind::ReactorRealignment,
            Self::Power { .. } => GameKind::WarpCoreBalancing,
        }
    }

    pub const fn ship(&self) -> ShipScript {
        match self {
            Self::Sequence { ship, .. } | Self::Power { ship, .. } => *ship,
        }
    }

    /// Settings the recording endpoint hands out on a difficulty read.
    pub fn settings(&self) -> DifficultySettings {
        match self {
            Self::Sequence { settings, .. } => settings.clone(),
            Self::Power { .. } => DifficultySettings::default(),
        }
    }

    pub const fn policy_label(&self) -> &'static str {
        match self {
            Self::Sequence { policy, .. } => policy.label(),
            Self::Power { policy, .. } => policy.label(),
        }
    }
}

#[derive(Clone)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub plan: Plan,
    pub expectation: Expectation,
}

impl Scenario {
    /// Scenarios that script the ship's answers only make sense offline.
    pub const fn runs_live(&self) -> bool {
        matches!(self.plan.ship(), ShipScript::Accepting)
    }
}

/// Starting power for a [`NodeLayout::Paired`] core, in centi-units.
pub fn paired_layout(seed: u64, config: &PowerConfig) -> Vec<i32> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let steps = [0, 1, 2];
    let mut nodes = Vec::with_capacity(config.node_count);
    for _ in 0..config.node_count / 2 {
        let offset = steps.choose(&mut rng).copied().unwrap_or(0) * config.transfer_amount;
        nodes.push(config.target + offset);
        nodes.push(config.target - offset);
    }
    if config.node_count % 2 == 1 {
        nodes.push(config.target);
    }
    nodes.shuffle(&mut rng);
    nodes
}
