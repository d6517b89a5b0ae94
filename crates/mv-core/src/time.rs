//! Simulation time model.
//!
//! # Design
//!
//! The host advances a monotonically increasing `Tick` counter; each tick
//! represents a fixed number of milliseconds held in `SimClock`:
//!
//!   now_ms = tick * tick_ms
//!
//! Generators never read wall-clock time.  They receive the elapsed
//! milliseconds for the tick and schedule periodic work with [`Timer`].

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps tick counts to simulated milliseconds.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated milliseconds one tick represents.
    pub tick_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_ms: u32) -> Self {
        Self { tick_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated milliseconds since tick 0.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_ms as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms)", self.current_tick, self.now_ms())
    }
}

// ── Timer ─────────────────────────────────────────────────────────────────────

/// Monotonic countdown used by generators to schedule periodic actions.
///
/// `update` subtracts unconditionally, so the remaining time may go negative;
/// `passed` is true iff the remaining time is `<= 0`.  A default timer has
/// already passed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    remaining_ms: i64,
}

impl Timer {
    pub fn new(duration_ms: u32) -> Self {
        Self { remaining_ms: duration_ms as i64 }
    }

    #[inline]
    pub fn update(&mut self, diff_ms: u32) {
        self.remaining_ms -= diff_ms as i64;
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.remaining_ms <= 0
    }

    #[inline]
    pub fn reset(&mut self, duration_ms: u32) {
        self.remaining_ms = duration_ms as i64;
    }

    #[inline]
    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }
}
