//! A timed pause while the agent waits for help to arrive.

use mv_agent::Agent;
use mv_core::{Timer, UnitStatus};

use crate::{MotionContext, MotionGenerator, MotionKind};

/// Holds the agent distracted for a fixed time, then completes.
#[derive(Debug)]
pub struct AssistDistractGenerator {
    duration_ms: u32,
    timer:       Timer,
}

impl AssistDistractGenerator {
    pub fn new(duration_ms: u32) -> Self {
        Self { duration_ms, timer: Timer::new(duration_ms) }
    }

    pub fn remaining_ms(&self) -> i64 {
        self.timer.remaining_ms()
    }
}

impl MotionGenerator for AssistDistractGenerator {
    fn kind(&self) -> MotionKind {
        MotionKind::AssistDistract
    }

    fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        self.timer.reset(self.duration_ms);
        agent.add_status(UnitStatus::DISTRACTED);
        if !agent.mover.is_stopped() {
            ctx.stop(&mut agent.mover);
        }
    }

    fn update(&mut self, _agent: &mut Agent, _ctx: &mut MotionContext<'_>, diff_ms: u32) -> bool {
        self.timer.update(diff_ms);
        !self.timer.passed()
    }

    /// Resuming keeps whatever time was left.
    fn reset(&mut self, agent: &mut Agent, _ctx: &mut MotionContext<'_>) {
        agent.add_status(UnitStatus::DISTRACTED);
    }

    fn finalize(&mut self, agent: &mut Agent, _ctx: &mut MotionContext<'_>) {
        agent.clear_status(UnitStatus::DISTRACTED);
    }
}
