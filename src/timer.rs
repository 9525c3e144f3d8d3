//! Logical time for the engine.
//!
//! The engine never sleeps or spawns timers of its own. It asks an injected
//! [`Clock`] for "now" and keeps deadlines in one-shot [`Timer`]s that are
//! checked whenever an event or `tick` arrives.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time measured from when the clock was created.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to. Clones share the same time, so a
/// test can keep one handle while the engine owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        ManualClock {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// A cancellable one-shot deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline_ms: Option<u64>,
}

impl Timer {
    /// Arm (or re-arm) the timer to fire `duration_ms` after `now_ms`.
    pub fn start(&mut self, now_ms: u64, duration_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(duration_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Armed and not yet due.
    pub fn is_running(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|d| now_ms < d)
    }

    /// Disarm and return `true` if the deadline has passed.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(d) if now_ms >= d => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Milliseconds elapsed since the timer was armed for `duration_ms`.
    pub fn elapsed(&self, now_ms: u64, duration_ms: u64) -> Option<u64> {
        self.deadline_ms
            .map(|d| now_ms.saturating_sub(d.saturating_sub(duration_ms)))
    }
}
