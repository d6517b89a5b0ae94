//! The lifecycle every motion strategy implements.

use mv_agent::{Agent, TargetLink};

use crate::MotionContext;

/// Which strategy a generator implements.  Carried in completion events.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MotionKind {
    Wander,
    Point,
    Pursuit,
    AssistSeek,
    AssistDistract,
}

/// Where a generator is in its lifecycle.
///
/// `Uninitialized → Active → Finalized`.  `Reset` keeps a generator
/// `Active`; nothing leaves `Finalized`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum GeneratorState {
    #[default]
    Uninitialized,
    Active,
    Finalized,
}

/// A per-agent motion strategy driven once per tick by its owning
/// [`MotionMaster`][crate::MotionMaster].
///
/// The owner guarantees the call order: `initialize` exactly once before
/// any `update`, `finalize` exactly once on removal, and `reset` only while
/// active.  Implementations must undo in `finalize` every status they set in
/// `initialize`.
///
/// # Example
///
/// ```rust,ignore
/// struct Idle;
///
/// impl MotionGenerator for Idle {
///     fn kind(&self) -> MotionKind { MotionKind::Point }
///     fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
///         ctx.stop(agent);
///     }
///     fn update(&mut self, _: &mut Agent, _: &mut MotionContext<'_>, _: u32) -> bool {
///         true
///     }
///     fn finalize(&mut self, _: &mut Agent, _: &mut MotionContext<'_>) {}
/// }
/// ```
pub trait MotionGenerator {
    fn kind(&self) -> MotionKind;

    /// Called once when the generator becomes active.  May set statuses and
    /// launch an initial trajectory.
    fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>);

    /// Called once per tick while active.  Returns `false` to be removed.
    fn update(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>, diff_ms: u32) -> bool;

    /// Re-arm transient state when control returns to this generator.
    fn reset(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        self.initialize(agent, ctx);
    }

    /// Called once on removal.
    fn finalize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>);

    /// Completion hook, invoked by the generator itself when a trajectory it
    /// launched reaches its end.
    fn movement_inform(&mut self, _agent: &mut Agent, _ctx: &mut MotionContext<'_>) {}

    /// The agent's speed table changed while this generator was active.
    fn on_speed_changed(&mut self) {}

    /// The agent this generator is tracking, if any.
    fn target(&self) -> Option<TargetLink> {
        None
    }
}
