use anyhow::{Result, ensure};
use reactor_game::{DifficultySettings, PowerConfig};

use super::{NodeLayout, Plan, Scenario};
use crate::logic::endpoint::ShipScript;
use crate::logic::policy::{PowerPolicy, SequencePolicy};
use crate::logic::simulation::{Outcome, RunSummary};

pub fn catalog_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            key: "sequence-perfect",
            description: "Flawless player clears every round on the default difficulty",
            plan: sequence(SequencePolicy::Perfect, DifficultySettings::default()),
            expectation: perfect_sequence,
        },
        Scenario {
            key: "sequence-hard",
            description: "Flawless player against a Hard scenario (8 rounds, 300 ms playback)",
            plan: sequence(SequencePolicy::Perfect, hard_settings()),
            expectation: perfect_sequence,
        },
        Scenario {
            key: "sequence-forgetful",
            description: "One wrong symbol fails the round, which is replayed and then cleared",
            plan: sequence(SequencePolicy::Forgetful, DifficultySettings::default()),
            expectation: forgetful_sequence,
        },
        Scenario {
            key: "sequence-idle",
            description: "Nobody answers; the countdown breaches the core exactly once",
            plan: sequence(
                SequencePolicy::Idle,
                DifficultySettings {
                    time_limit: 20,
                    ..DifficultySettings::default()
                },
            ),
            expectation: idle_sequence,
        },
        Scenario {
            key: "sequence-offline",
            description: "Ship lookup fails, so the reactor game never starts",
            plan: Plan::Sequence {
                policy: SequencePolicy::Perfect,
                settings: DifficultySettings::default(),
                ship: ShipScript::Missing,
            },
            expectation: never_started,
        },
        Scenario {
            key: "warp-calm",
            description: "Balancer settles a drift-free core laid out in whole transfer steps",
            plan: power(PowerPolicy::Balancer, PowerConfig::calm(), NodeLayout::Paired),
            expectation: calm_warp,
        },
        Scenario {
            key: "warp-balancer",
            description: "Balancer works a drifting core until it settles or breaches",
            plan: power(PowerPolicy::Balancer, PowerConfig::default(), NodeLayout::Seeded),
            expectation: single_terminal,
        },
        Scenario {
            key: "warp-idle",
            description: "Untouched drifting core ends exactly once with invariants intact",
            plan: power(PowerPolicy::Idle, PowerConfig::default(), NodeLayout::Seeded),
            expectation: single_terminal,
        },
        Scenario {
            key: "warp-offline",
            description: "Ship lookup fails, so the warp game never starts",
            plan: Plan::Power {
                policy: PowerPolicy::Balancer,
                config: PowerConfig::default(),
                layout: NodeLayout::Seeded,
                ship: ShipScript::Missing,
            },
            expectation: never_started,
        },
    ]
}

pub fn find_scenario(key: &str) -> Option<Scenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key.eq_ignore_ascii_case(key))
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .into_iter()
        .map(|s| (s.key, s.description))
        .collect()
}

fn sequence(policy: SequencePolicy, settings: DifficultySettings) -> Plan {
    Plan::Sequence {
        policy,
        settings,
        ship: ShipScript::Accepting,
    }
}

fn power(policy: PowerPolicy, config: PowerConfig, layout: NodeLayout) -> Plan {
    Plan::Power {
        policy,
        config,
        layout,
        ship: ShipScript::Accepting,
    }
}

fn hard_settings() -> DifficultySettings {
    DifficultySettings {
        difficulty: String::from("Hard"),
        time_limit: 90,
        rounds: 8,
        sequence_speed: 300,
    }
}

fn clean_run(summary: &RunSummary) -> Result<()> {
    ensure!(summary.connected, "ship did not accept initialization");
    ensure!(
        summary.log.violations.is_empty(),
        "invariant violations: {}",
        summary.log.violations.join("; ")
    );
    ensure!(
        summary.terminal_commands == 1,
        "expected one terminal command, saw {:?}",
        summary.commands
    );
    Ok(())
}

fn perfect_sequence(summary: &RunSummary) -> Result<()> {
    clean_run(summary)?;
    ensure!(
        summary.outcome == Outcome::Stabilized,
        "perfect play ended {:?}",
        summary.outcome
    );
    ensure!(summary.log.mismatches == 0, "perfect play logged a mismatch");
    ensure!(summary.breach_commands == 0, "perfect play breached the core");
    Ok(())
}

fn forgetful_sequence(summary: &RunSummary) -> Result<()> {
    clean_run(summary)?;
    ensure!(
        summary.log.mismatches == 1,
        "expected exactly one mismatch, saw {}",
        summary.log.mismatches
    );
    ensure!(
        summary.outcome == Outcome::Stabilized,
        "one slip should still stabilize, ended {:?}",
        summary.outcome
    );
    Ok(())
}

fn idle_sequence(summary: &RunSummary) -> Result<()> {
    clean_run(summary)?;
    ensure!(summary.outcome == Outcome::Breached, "idle run ended {:?}", summary.outcome);
    ensure!(summary.breach_commands == 1, "expected a single breach");
    ensure!(
        summary.elapsed_ms >= 20_000,
        "breach came early at {}ms",
        summary.elapsed_ms
    );
    ensure!(summary.log.presses == 0, "idle player pressed a symbol");
    Ok(())
}

fn calm_warp(summary: &RunSummary) -> Result<()> {
    clean_run(summary)?;
    ensure!(
        summary.outcome == Outcome::Stabilized,
        "calm core ended {:?}",
        summary.outcome
    );
    Ok(())
}

fn single_terminal(summary: &RunSummary) -> Result<()> {
    clean_run(summary)?;
    ensure!(
        matches!(summary.outcome, Outcome::Stabilized | Outcome::Breached),
        "run ended {:?}",
        summary.outcome
    );
    Ok(())
}

fn never_started(summary: &RunSummary) -> Result<()> {
    ensure!(!summary.connected, "ship unexpectedly accepted initialization");
    ensure!(summary.outcome == Outcome::NotStarted, "run ended {:?}", summary.outcome);
    ensure!(
        summary.commands.is_empty(),
        "offline run sent {:?}",
        summary.commands
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_and_findable() {
        let scenarios = catalog_scenarios();
        for scenario in &scenarios {
            assert_eq!(
                scenarios.iter().filter(|s| s.key == scenario.key).count(),
                1,
                "duplicate key {}",
                scenario.key
            );
            assert!(find_scenario(scenario.key).is_some());
        }
        assert!(find_scenario("SEQUENCE-PERFECT").is_some());
        assert!(find_scenario("nope").is_none());
    }

    #[test]
    fn offline_scenarios_stay_offline() {
        for scenario in catalog_scenarios() {
            assert_eq!(scenario.runs_live(), !scenario.key.ends_with("offline"));
        }
    }
}
