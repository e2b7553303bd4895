//! Scheduling primitives for delayed game transitions.
//!
//! Two delayed transitions exist in the games: hiding a mismatched pair
//! (short delay) and advancing to the next level after a win (long delay).
//! Neither blocks the caller; the engine records the transition in a
//! `TimerQueue` and the event loop drains it with `tick`.
//!
//! ## Generation tokens
//!
//! Every scheduled entry is tagged with the `Generation` active when it was
//! scheduled. `reset()` bumps the engine's generation; entries from an
//! earlier generation are dropped silently when they come due. Cancellation
//! is logical only: the entry stays queued until its fire time, it just
//! does nothing.
//!
//! ## Clocks
//!
//! Time is supplied by an injectable `Clock`: `MonotonicClock` in
//! production, `ManualClock` in tests so delayed transitions are
//! deterministic without wall-clock waits.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Delay before a mismatched memotest pair flips back over.
pub const MISMATCH_HIDE_DELAY: Duration = Duration::from_secs(1);

/// Delay between winning a level and advancing to the next one.
pub const WIN_ADVANCE_DELAY: Duration = Duration::from_secs(3);

/// Generation token invalidating stale delayed transitions.
///
/// Starts at 0 for a fresh engine and increases by one on every reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// Create a generation token with the given counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The successor token, used when an engine resets.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

/// Event an engine hands back to its driver when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The win delay elapsed; the sequencer should advance a level.
    AdvanceLevel,
}

/// A pending delayed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled<A> {
    /// Absolute fire time on the owning clock.
    pub fire_at: Duration,

    /// Generation active when this entry was scheduled.
    pub generation: Generation,

    /// The transition to apply when the entry fires live.
    pub action: A,
}

/// Queue of pending delayed transitions for one engine.
///
/// Entries fire in scheduling order once their fire time is reached.
/// SmallVec keeps the common case (at most a hide timer and a win timer)
/// off the heap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerQueue<A> {
    pending: SmallVec<[Scheduled<A>; 2]>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            pending: SmallVec::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire at `now + delay` under `generation`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, generation: Generation, action: A) {
        self.pending.push(Scheduled {
            fire_at: now + delay,
            generation,
            action,
        });
    }

    /// Drain every entry due at `now`.
    ///
    /// Due entries whose generation differs from `current` were scheduled
    /// before a reset; they are dropped without firing. Entries not yet due
    /// stay queued regardless of generation.
    pub fn fire_due(&mut self, now: Duration, current: Generation) -> SmallVec<[A; 2]> {
        let mut due = SmallVec::new();
        let mut remaining = SmallVec::new();

        for entry in self.pending.drain(..) {
            if entry.fire_at > now {
                remaining.push(entry);
            } else if entry.generation == current {
                due.push(entry.action);
            }
        }

        self.pending = remaining;
        due
    }

    /// Number of entries still queued (live or stale).
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Source of the current time for an engine driver.
pub trait Clock {
    /// Elapsed time on this clock's timeline.
    fn now(&self) -> Duration;
}

/// Wall clock measuring from its construction instant.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock starting at zero now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Test-controlled clock advanced explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}
