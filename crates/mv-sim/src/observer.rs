//! Simulation observer trait for replication and data collection.

use mv_core::Tick;
use mv_motion::MotionEvent;
use mv_spline::MotionUpdate;

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: replica feed
///
/// ```rust,ignore
/// struct Replica { sent: Vec<MotionUpdate> }
///
/// impl SimObserver for Replica {
///     fn on_motion_update(&mut self, _tick: Tick, update: &MotionUpdate) {
///         self.sent.push(update.clone());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per committed trajectory, in commit order.
    fn on_motion_update(&mut self, _tick: Tick, _update: &MotionUpdate) {}

    /// Called once per completion event, after the host applied its part.
    fn on_motion_event(&mut self, _tick: Tick, _event: &MotionEvent) {}

    /// Called at the end of each tick.
    ///
    /// `moving` is the number of in-world agents with a trajectory in flight.
    fn on_tick_end(&mut self, _tick: Tick, _moving: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
