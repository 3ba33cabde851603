//! Side effects requested by a state transition.
//!
//! Neither machine owns a timer or a network handle. A transition returns
//! the remote command to fire (if any) and the follow-up steps the host
//! must run later. Each follow-up carries the epoch it was scheduled in so
//! steps from a previous run are dropped after a restart or reset.
use smallvec::SmallVec;

use crate::script::RemoteCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled<S> {
    pub after_ms: u32,
    pub step: S,
    pub epoch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effects<S> {
    pub command: Option<RemoteCommand>,
    pub follow_ups: SmallVec<[Scheduled<S>; 2]>,
}

impl<S> Default for Effects<S> {
    fn default() -> Self {
        Self {
            command: None,
            follow_ups: SmallVec::new(),
        }
    }
}

impl<S> Effects<S> {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn command(command: RemoteCommand) -> Self {
        Self {
            command: Some(command),
            follow_ups: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn then(mut self, after_ms: u32, step: S, epoch: u32) -> Self {
        self.follow_ups.push(Scheduled {
            after_ms,
            step,
            epoch,
        });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.command.is_none() && self.follow_ups.is_empty()
    }
}
