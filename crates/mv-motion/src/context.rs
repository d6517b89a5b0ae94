//! What a generator may touch besides its own agent.

use mv_agent::{Agent, LinkRegistry, WorldView};
use mv_core::{AgentId, MotionConfig, RandomSource};
use mv_path::PathPlanner;
use mv_spline::{MotionBroadcast, MotionUpdate, Mover, TrajectoryInit};

use crate::MotionKind;

// ── Events ────────────────────────────────────────────────────────────────────

/// A side effect a generator asks the host to carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum MotionEvent {
    /// A movement completed.  Only raised for autonomous agents.
    Inform { agent: AgentId, motion: MotionKind, id: u32 },
    /// A melee pursuer arrived next to its target.
    Attack { agent: AgentId, target: AgentId },
    /// The agent reached its helpers and calls them in.
    CallAssistance { agent: AgentId },
    /// A controlled descent ended on the ground.  The host applies the death
    /// state.
    ReachedGround { agent: AgentId },
}

/// A generator to push once the current one has been removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FollowUp {
    AssistDistract { duration_ms: u32 },
}

// ── Outbox ────────────────────────────────────────────────────────────────────

/// Everything generators produced this tick, drained by the host.
#[derive(Default, Debug)]
pub struct Outbox {
    pub updates:   Vec<MotionUpdate>,
    pub events:    Vec<MotionEvent>,
    pub followups: Vec<(AgentId, FollowUp)>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the follow-ups queued for `agent`.
    pub fn take_followups(&mut self, agent: AgentId) -> Vec<FollowUp> {
        let mut taken = Vec::new();
        self.followups.retain(|&(owner, f)| {
            if owner == agent {
                taken.push(f);
                false
            } else {
                true
            }
        });
        taken
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.events.is_empty() && self.followups.is_empty()
    }
}

impl MotionBroadcast for Outbox {
    fn broadcast(&mut self, update: MotionUpdate) {
        self.updates.push(update);
    }
}

// ── MotionContext ─────────────────────────────────────────────────────────────

/// Borrowed collaborators for one generator call.
///
/// The world snapshot is read-only and was taken before any generator ran
/// this tick; the only agent a generator may mutate is the one it is handed
/// directly.
pub struct MotionContext<'a> {
    /// Simulation time at the start of the tick.
    pub now_ms:  u64,
    pub world:   &'a WorldView,
    pub links:   &'a mut LinkRegistry,
    pub planner: &'a dyn PathPlanner,
    pub config:  &'a MotionConfig,
    pub rng:     &'a mut dyn RandomSource,
    pub outbox:  &'a mut Outbox,
}

impl MotionContext<'_> {
    /// Commit `init` and broadcast it.  Returns the trajectory duration.
    pub fn launch(&mut self, init: TrajectoryInit<'_>) -> u32 {
        init.launch(self.now_ms, &mut *self.outbox)
    }

    /// Halt the mover where it really is.
    pub fn stop(&mut self, mover: &mut Mover) {
        mover.stop(self.now_ms, &mut *self.outbox);
    }

    pub fn emit(&mut self, event: MotionEvent) {
        self.outbox.events.push(event);
    }

    /// Raise a completion notification for autonomous agents; player
    /// agents have nobody to notify.
    pub fn inform(&mut self, agent: &Agent, motion: MotionKind, id: u32) {
        if agent.is_autonomous() {
            self.emit(MotionEvent::Inform { agent: agent.id, motion, id });
        }
    }

    pub fn request(&mut self, agent: AgentId, followup: FollowUp) {
        self.outbox.followups.push((agent, followup));
    }
}
