use anyhow::Result;
use colored::Colorize;
use reactor_game::{
    CommandEndpoint, Effects, EndpointConfig, GameKind, PowerGame, SequenceGame, ShipLink,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::endpoint::RecordingEndpoint;
use super::policy::{PowerPlayer, SequencePlayer};
use super::simulation::{RunSummary, Simulation};
use crate::live::HttpEndpoint;
use crate::scenario::{NodeLayout, Plan, Scenario, paired_layout};

/// Virtual time after which a run is cut off.
const HORIZON_MS: u64 = 30 * 60 * 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

/// Where the commands of a simulated run go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An in-process scripting console driven by the scenario's ship script.
    Recording,
    /// A real `exec.lua` endpoint, e.g. `http://localhost:8080`.
    Live { base_url: String, callsign: Option<String> },
}

impl Target {
    fn endpoint_config(&self, game: GameKind) -> EndpointConfig {
        match self {
            Self::Recording => EndpointConfig::for_game(game),
            Self::Live { base_url, callsign } => EndpointConfig {
                base_url: base_url.clone(),
                callsign: callsign
                    .clone()
                    .unwrap_or_else(|| game.default_callsign().to_string()),
            },
        }
    }
}

pub struct LogicTester {
    verbose: bool,
    target: Target,
}

impl LogicTester {
    pub const fn new(target: Target, verbose: bool) -> Self {
        Self { verbose, target }
    }

    pub async fn run_scenario(
        &self,
        scenario: &Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (policy: {} seed: {})",
                    scenario.key.bright_white(),
                    scenario.plan.policy_label(),
                    seed
                );
            }
            results.push(self.run_single_scenario(scenario, seed, iterations).await);
        }

        results
    }

    async fn run_single_scenario(
        &self,
        scenario: &Scenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            let verdict = match run_plan(&scenario.plan, iteration_seed, &self.target).await {
                Ok(summary) => (scenario.expectation)(&summary).map(|()| summary),
                Err(err) => Err(err),
            };
            match verdict {
                Ok(summary) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) outcome:{:?} virtual:{}ms commands:{}",
                            i + 1,
                            iterations,
                            summary.outcome,
                            summary.elapsed_ms,
                            summary.commands.join(",")
                        );
                    }
                }
                Err(err) => {
                    let message = format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1);
                    if self.verbose {
                        println!("  ❌ {}", message.clone().red());
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

/// Simulate one game of `plan` against `target`.
///
/// # Errors
///
/// Fails only when a live endpoint cannot be constructed.
pub async fn run_plan(plan: &Plan, seed: u64, target: &Target) -> Result<RunSummary> {
    let config = target.endpoint_config(plan.game());
    match target {
        Target::Recording => {
            let endpoint = RecordingEndpoint::new(plan.ship(), plan.settings());
            Ok(simulate(plan, seed, &ShipLink::new(endpoint, config)).await)
        }
        Target::Live { .. } => {
            let endpoint = HttpEndpoint::new(&config)?;
            Ok(simulate(plan, seed, &ShipLink::new(endpoint, config)).await)
        }
    }
}

async fn simulate<E: CommandEndpoint>(plan: &Plan, seed: u64, link: &ShipLink<E>) -> RunSummary {
    let simulation = Simulation::new(link, HORIZON_MS);
    match plan {
        Plan::Sequence { policy, .. } => {
            let mut game = SequenceGame::new(seed);
            let mut player = SequencePlayer::new(*policy);
            simulation
                .run(plan.game(), seed, &mut game, &mut player, SequenceGame::start_with)
                .await
        }
        Plan::Power {
            policy,
            config,
            layout,
            ..
        } => {
            let mut game = PowerGame::with_config(seed, config.clone());
            let mut player = PowerPlayer::new(*policy);
            let nodes = (*layout == NodeLayout::Paired).then(|| paired_layout(seed, config));
            simulation
                .run(plan.game(), seed, &mut game, &mut player, move |game, start| {
                    match nodes {
                        Some(nodes) if start.connected => {
                            game.start_with_nodes(&nodes);
                            Effects::none()
                        }
                        _ => game.start_with(start),
                    }
                })
                .await
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}
