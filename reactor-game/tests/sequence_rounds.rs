use reactor_game::{
    DifficultySettings, PressOutcome, RemoteCommand, Scheduled, SequenceEffects, SequenceGame,
    SequencePhase, SequenceStep, StartPlan, Symbol,
};

/// Minimal virtual clock: runs follow-ups in due order and returns the
/// commands they produced.
struct Clock {
    now: u64,
    pending: Vec<(u64, Scheduled<SequenceStep>)>,
    commands: Vec<RemoteCommand>,
}

impl Clock {
    fn new() -> Self {
        Self {
            now: 0,
            pending: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn absorb(&mut self, effects: SequenceEffects) {
        self.commands.extend(effects.command);
        for follow_up in effects.follow_ups {
            self.pending
                .push((self.now + u64::from(follow_up.after_ms), follow_up));
        }
    }

    /// Advance until the game waits for the player or nothing is left.
    fn settle(&mut self, game: &mut SequenceGame) {
        while game.state().phase != SequencePhase::Input || !self.pending.is_empty() {
            let Some(index) = self
                .pending
                .iter()
                .enumerate()
                .min_by_key(|(_, (due, _))| *due)
                .map(|(index, _)| index)
            else {
                break;
            };
            let (due, follow_up) = self.pending.remove(index);
            self.now = due;
            let effects = game.run_follow_up(follow_up);
            self.absorb(effects);
        }
    }
}

fn start(rounds: u32, seed: u64) -> (SequenceGame, Clock) {
    let mut game = SequenceGame::new(seed);
    let mut clock = Clock::new();
    let effects = game.start_with(StartPlan::connected(Some(DifficultySettings {
        rounds,
        ..DifficultySettings::default()
    })));
    clock.absorb(effects);
    clock.settle(&mut game);
    (game, clock)
}

#[test]
fn sequence_grows_by_one_each_round() {
    let (mut game, mut clock) = start(5, 0x5EED);
    for round in 1..=4u32 {
        assert_eq!(game.state().round, round);
        assert_eq!(game.state().sequence.len(), round as usize);
        let targets = game.state().sequence.clone();
        let mut last = PressOutcome::Ignored;
        for symbol in targets {
            let (outcome, effects) = game.press(symbol);
            clock.absorb(effects);
            last = outcome;
        }
        assert_eq!(last, PressOutcome::RoundCleared);
        clock.settle(&mut game);
    }
    assert_eq!(game.state().sequence.len(), 5);
}

#[test]
fn perfect_run_stabilizes_exactly_once() {
    let (mut game, mut clock) = start(3, 17);
    let mut completions = 0;
    while game.is_active() {
        let targets = game.state().sequence.clone();
        for symbol in targets {
            let (outcome, effects) = game.press(symbol);
            if outcome == PressOutcome::Completed {
                completions += 1;
            }
            clock.absorb(effects);
        }
        clock.settle(&mut game);
    }
    assert_eq!(completions, 1);
    let stabilizes = clock
        .commands
        .iter()
        .filter(|c| matches!(c, RemoteCommand::Stabilize { .. }))
        .count();
    assert_eq!(stabilizes, 1);
    assert_eq!(game.state().phase, SequencePhase::Idle);
}

#[test]
fn mismatch_fails_fast_before_later_positions() {
    let (mut game, mut clock) = start(5, 3);
    for _ in 0..2 {
        let targets = game.state().sequence.clone();
        for symbol in targets {
            let (_, effects) = game.press(symbol);
            clock.absorb(effects);
        }
        clock.settle(&mut game);
    }
    assert_eq!(game.state().sequence.len(), 3);
    let first = game.state().sequence[0];
    let wrong = Symbol::ALL.into_iter().find(|s| *s != first).unwrap();
    let (outcome, effects) = game.press(wrong);
    assert_eq!(outcome, PressOutcome::Mismatch);
    assert!(game.state().player_input.is_empty());
    assert_eq!(game.press(first).0, PressOutcome::Ignored);
    clock.absorb(effects);
    clock.settle(&mut game);
    assert_eq!(game.state().round, 3);
    assert_eq!(game.state().sequence.len(), 3);
    assert_eq!(game.state().phase, SequencePhase::Input);
}

#[test]
fn countdown_breaches_mid_input_exactly_once() {
    let (mut game, mut clock) = start(5, 8);
    let first = game.state().sequence[0];
    let (_, effects) = game.press(first);
    clock.absorb(effects);
    for _ in 0..120 {
        let effects = game.tick_second();
        clock.absorb(effects);
    }
    assert!(!game.is_active());
    let breaches = clock
        .commands
        .iter()
        .filter(|c| c.is_breach())
        .count();
    assert_eq!(breaches, 1);
}

#[test]
fn restart_discards_follow_ups_from_previous_run() {
    let mut game = SequenceGame::new(1);
    let first = game.start_with(StartPlan::connected(None));
    let stale = first.follow_ups[0];
    let breach = game.forfeit();
    let reset = breach.follow_ups[0];
    game.run_follow_up(reset);
    let second = game.start_with(StartPlan::connected(None));
    assert!(game.run_follow_up(stale).is_empty());
    assert!(game.state().sequence.is_empty());
    let fresh = game.run_follow_up(second.follow_ups[0]);
    assert!(!fresh.is_empty());
    assert_eq!(game.state().sequence.len(), 1);
}
