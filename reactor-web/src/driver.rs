//! Runs the core state machines on browser timers.
//!
//! Machines live in an `Rc<RefCell<_>>` owned by the page. Every mutation
//! goes through [`Driver::update`], which forces a re-render afterwards.
//! Remote commands are fired on `spawn_local` and never awaited by the UI.
use crate::endpoint::WebEndpoint;
use gloo::timers::callback::{Interval, Timeout};
use reactor_game::{
    Effects, EndpointConfig, GameKind, PowerGame, PowerStep, RemoteCommand, Scheduled,
    SequenceGame, SequenceStep, ShipLink, StartPlan,
};
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::functional::UseForceUpdateHandle;

/// A state machine whose delayed follow-ups the browser can run.
pub trait Machine: 'static {
    type Step: Copy + Debug + 'static;

    fn run_follow_up(&mut self, scheduled: Scheduled<Self::Step>) -> Effects<Self::Step>;
}

impl Machine for SequenceGame {
    type Step = SequenceStep;

    fn run_follow_up(&mut self, scheduled: Scheduled<SequenceStep>) -> Effects<SequenceStep> {
        Self::run_follow_up(self, scheduled)
    }
}

impl Machine for PowerGame {
    type Step = PowerStep;

    fn run_follow_up(&mut self, scheduled: Scheduled<PowerStep>) -> Effects<PowerStep> {
        Self::run_follow_up(self, scheduled)
    }
}

pub struct Driver<M: Machine> {
    game: Rc<RefCell<M>>,
    redraw: UseForceUpdateHandle,
}

impl<M: Machine> Clone for Driver<M> {
    fn clone(&self) -> Self {
        Self {
            game: Rc::clone(&self.game),
            redraw: self.redraw.clone(),
        }
    }
}

impl<M: Machine> Driver<M> {
    pub const fn new(game: Rc<RefCell<M>>, redraw: UseForceUpdateHandle) -> Self {
        Self { game, redraw }
    }

    /// Read the machine without triggering a render.
    pub fn read<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&self.game.borrow())
    }

    /// Mutate the machine, then re-render.
    pub fn update<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        let out = f(&mut self.game.borrow_mut());
        self.redraw.force_update();
        out
    }

    /// Fire the command (if any) and arm a timeout per follow-up.
    pub fn apply(&self, config: &EndpointConfig, effects: Effects<M::Step>) {
        if let Some(command) = effects.command {
            dispatch(config.clone(), command);
        }
        for follow_up in effects.follow_ups {
            let driver = self.clone();
            let config = config.clone();
            // Stale steps are rejected by epoch, so timeouts are never cancelled.
            Timeout::new(follow_up.after_ms, move || {
                let next = driver.update(|game| game.run_follow_up(follow_up));
                driver.apply(&config, next);
            })
            .forget();
        }
    }

    /// Periodic driver; dropping the handle stops it.
    #[must_use]
    pub fn every(
        &self,
        period_ms: u32,
        config: EndpointConfig,
        step: fn(&mut M) -> Effects<M::Step>,
    ) -> Interval {
        let driver = self.clone();
        Interval::new(period_ms, move || {
            let effects = driver.update(step);
            driver.apply(&config, effects);
        })
    }

    /// Negotiate with the ship, then hand the plan to `begin`.
    pub fn launch<F>(&self, config: EndpointConfig, kind: GameKind, begin: F, settled: impl FnOnce() + 'static)
    where
        F: FnOnce(&mut M, StartPlan) -> Effects<M::Step> + 'static,
    {
        let driver = self.clone();
        spawn_local(async move {
            let link = ShipLink::new(WebEndpoint::new(&config), config.clone());
            let plan = link.negotiate(kind).await;
            let effects = driver.update(|game| begin(game, plan));
            driver.apply(&config, effects);
            settled();
        });
    }
}

/// Send a command without waiting for it.
pub fn dispatch(config: EndpointConfig, command: RemoteCommand) {
    spawn_local(async move {
        let link = ShipLink::new(WebEndpoint::new(&config), config);
        if link.dispatch(command).await.is_none() {
            crate::dom::console_error(&format!(
                "{} did not reach {}",
                command.label(),
                link.config().exec_url()
            ));
        }
    });
}
