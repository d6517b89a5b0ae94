//! Confused roaming around the point where the confusion began.

use mv_agent::Agent;
use mv_core::{DisplayFlags, Timer, UnitStatus, Vec3};
use mv_path::{PathRequest, PathType};
use mv_spline::TrajectoryInit;

use crate::{MotionContext, MotionGenerator, MotionKind};

/// Largest per-axis offset of a candidate point from the anchor.
pub const WANDER_RADIUS: f32 = 5.0;

/// Longest path a single wander leg may take.
pub const WANDER_MAX_PATH_LENGTH: f32 = 30.0;

/// Pause after a leg completes.
const WAIT_AFTER_MOVE_MS: (u32, u32) = (800, 1_500);

/// Pause before retrying after the planner found no normal path.
const RETRY_AFTER_FAILURE_MS: (u32, u32) = (800, 1_000);

/// Random walk around an anchor.
///
/// One timer drives two states: while it has passed the agent is moving
/// (or just finished a leg), otherwise it is waiting for the next leg.
#[derive(Debug, Default)]
pub struct WanderGenerator {
    anchor:    Vec3,
    next_move: Timer,
}

impl WanderGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Time left before the next leg; zero or negative while moving.
    pub fn next_move_in_ms(&self) -> i64 {
        self.next_move.remaining_ms()
    }

    fn start_leg(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        let x = self.anchor.x + ctx.rng.range_f32(-WANDER_RADIUS, WANDER_RADIUS);
        let y = self.anchor.y + ctx.rng.range_f32(-WANDER_RADIUS, WANDER_RADIUS);
        let z = ctx.planner.ground_height(x, y, self.anchor.z);

        let request = PathRequest::new(agent.mover.real_position(), Vec3::new(x, y, z))
            .max_length(WANDER_MAX_PATH_LENGTH)
            .capabilities(agent.capabilities);
        let path = ctx.planner.plan(&request);

        if path.kind != PathType::Normal || path.points.is_empty() {
            log::trace!("{}: no wander path to ({x:.1}, {y:.1}): {:?}", agent.id, path.kind);
            let (lo, hi) = RETRY_AFTER_FAILURE_MS;
            self.next_move.reset(ctx.rng.range_u32(lo, hi));
            return;
        }

        ctx.launch(TrajectoryInit::new(&mut agent.mover).move_by_path(path.points).set_walk(true));
    }
}

impl MotionGenerator for WanderGenerator {
    fn kind(&self) -> MotionKind {
        MotionKind::Wander
    }

    fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        self.anchor = agent.mover.real_position();
        self.next_move.reset(0);
        agent.add_status(UnitStatus::CONFUSED);
        if !agent.mover.is_stopped() {
            ctx.stop(&mut agent.mover);
        }
    }

    fn update(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>, diff_ms: u32) -> bool {
        if agent.has_status(UnitStatus::CANNOT_MOVE) {
            return true;
        }

        if self.next_move.passed() {
            agent.add_status(UnitStatus::CONFUSED);
            if agent.mover.is_stopped() {
                let (lo, hi) = WAIT_AFTER_MOVE_MS;
                self.next_move.reset(ctx.rng.range_u32(lo, hi));
            }
        } else {
            self.next_move.update(diff_ms);
            if self.next_move.passed() {
                agent.add_status(UnitStatus::CONFUSED);
                self.start_leg(agent, ctx);
            }
        }
        true
    }

    fn reset(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        self.next_move.reset(0);
        if !agent.mover.is_stopped() {
            ctx.stop(&mut agent.mover);
        }
    }

    fn finalize(&mut self, agent: &mut Agent, _ctx: &mut MotionContext<'_>) {
        agent.display.remove(DisplayFlags::CONFUSED);
        agent.clear_status(UnitStatus::CONFUSED);
        if agent.is_autonomous() {
            if let Some(victim) = agent.victim {
                agent.facing_target = Some(victim);
            }
        }
    }
}
