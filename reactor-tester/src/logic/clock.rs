//! Deterministic stand-in for browser timers.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Due<T> {
    at_ms: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Due<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.at_ms, self.seq) == (other.at_ms, other.seq)
    }
}

impl<T> Eq for Due<T> {}

impl<T> PartialOrd for Due<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Due<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at_ms, self.seq).cmp(&(other.at_ms, other.seq))
    }
}

/// Priority queue of due events. Events due at the same instant fire in
/// the order they were scheduled.
pub struct VirtualClock<T> {
    now_ms: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<Due<T>>>,
}

impl<T> Default for VirtualClock<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }
}

impl<T> VirtualClock<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, after_ms: u32, item: T) {
        let at_ms = self.now_ms + u64::from(after_ms);
        self.seq += 1;
        self.queue.push(Reverse(Due {
            at_ms,
            seq: self.seq,
            item,
        }));
    }

    /// Advance to the next event and hand it out.
    pub fn advance(&mut self) -> Option<T> {
        let Reverse(due) = self.queue.pop()?;
        self.now_ms = due.at_ms;
        Some(due.item)
    }

    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_fire_in_due_order_then_fifo() {
        let mut clock = VirtualClock::new();
        clock.schedule(500, "late");
        clock.schedule(100, "first");
        clock.schedule(100, "second");
        assert_eq!(clock.advance(), Some("first"));
        assert_eq!(clock.advance(), Some("second"));
        assert_eq!(clock.now_ms(), 100);
        clock.schedule(50, "relative");
        assert_eq!(clock.advance(), Some("relative"));
        assert_eq!(clock.now_ms(), 150);
        assert_eq!(clock.advance(), Some("late"));
        assert!(clock.is_idle());
        assert_eq!(clock.advance(), None);
    }
}
