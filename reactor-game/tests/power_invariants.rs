use proptest::prelude::*;
use reactor_game::constants::{COOLANT_MAX, COOLANT_REGEN_PER_TICK, POWER_MAX};
use reactor_game::{PowerConfig, PowerGame, PowerGameState, RemoteCommand, StartPlan};

fn expected_stability(state: &PowerGameState) -> i32 {
    let deviation: i32 = state
        .nodes()
        .iter()
        .map(|n| (n.power_centi() - 5_000).abs())
        .sum();
    let overheating = state.nodes().iter().filter(|n| n.overheating).count();
    let overheating = i32::try_from(overheating).unwrap();
    (10_000 - deviation - overheating * 1_000).max(0)
}

#[derive(Debug, Clone)]
enum Action {
    Tick,
    Cool(usize),
    Click(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Tick),
        1 => (0usize..6).prop_map(Action::Cool),
        1 => (0usize..6).prop_map(Action::Click),
    ]
}

proptest! {
    #[test]
    fn transfer_conserves_total_power(
        powers in prop::collection::vec(0i32..10_000, 6),
        from in 0usize..6,
        to in 0usize..6,
    ) {
        let mut game = PowerGame::with_config(0, PowerConfig::calm());
        game.start_with_nodes(&powers);
        let before = game.state().total_power();
        let moved = game.transfer(from, to);
        prop_assert_eq!(game.state().total_power(), before);
        prop_assert_eq!(
            moved,
            from != to && powers[from] >= 1_000 && powers[to] + 1_000 <= POWER_MAX
        );
    }

    #[test]
    fn stability_is_always_the_derived_value(seed in any::<u64>(), ticks in 1usize..40) {
        let mut game = PowerGame::new(seed);
        game.start_with(StartPlan::connected(None));
        for _ in 0..ticks {
            if !game.is_active() {
                break;
            }
            game.tick();
            prop_assert_eq!(game.state().core_stability_centi(), expected_stability(game.state()));
        }
    }

    #[test]
    fn coolant_stays_bounded_and_only_regenerates_slowly(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..80),
    ) {
        let mut game = PowerGame::new(seed);
        game.start_with(StartPlan::connected(None));
        for step in actions {
            let before = game.state().coolant_centi();
            match step {
                Action::Tick => {
                    game.tick();
                }
                Action::Cool(node) => {
                    game.cooldown(node);
                }
                Action::Click(node) => {
                    game.select_node(node);
                }
            }
            let after = game.state().coolant_centi();
            prop_assert!(after <= COOLANT_MAX);
            for node in game.state().nodes() {
                prop_assert!(
                    (0..=POWER_MAX).contains(&node.power_centi()),
                    "node {} at {}",
                    node.id,
                    node.power_centi()
                );
            }
            if after > before {
                prop_assert!(after - before <= COOLANT_REGEN_PER_TICK || after == COOLANT_MAX);
            }
            if !game.is_active() {
                break;
            }
        }
    }
}

#[test]
fn transfers_between_ticks_never_overfill_a_node() {
    let mut game = PowerGame::with_config(3, PowerConfig::calm());
    game.start_with_nodes(&[8_000, 5_000, 5_000, 5_000, 5_000, 5_000]);
    assert!(game.transfer(1, 0));
    assert!(game.transfer(2, 0));
    assert!(!game.transfer(3, 0));
    let powers: Vec<i32> = game.state().nodes().iter().map(|n| n.power_centi()).collect();
    assert_eq!(powers, [POWER_MAX, 4_000, 4_000, 5_000, 5_000, 5_000]);
    assert_eq!(game.state().total_power(), 33_000);
}

#[test]
fn calm_balanced_core_stabilizes_on_first_tick() {
    let mut game = PowerGame::with_config(99, PowerConfig::calm());
    game.start_with_nodes(&[5_000; 6]);
    assert_eq!(expected_stability(game.state()), 10_000);
    let effects = game.tick();
    assert!(matches!(effects.command, Some(RemoteCommand::Stabilize { .. })));
    assert!((game.state().core_stability() - 100.0).abs() < f32::EPSILON);
    assert!(game.tick().is_empty());
}

#[test]
fn unattended_core_breaches_once_when_time_runs_out() {
    let mut game = PowerGame::with_config(7, PowerConfig::calm());
    game.start_with_nodes(&[4_000; 6]);
    let mut breaches = 0;
    for _ in 0..60 {
        for _ in 0..5 {
            if game.tick().command.is_some_and(RemoteCommand::is_breach) {
                breaches += 1;
            }
        }
        if game.tick_second().command.is_some_and(RemoteCommand::is_breach) {
            breaches += 1;
        }
    }
    assert!(!game.is_active());
    assert_eq!(game.state().time_remaining(), 0);
    assert_eq!(game.state().core_stability_centi(), 4_000);
    assert_eq!(breaches, 1);
}
