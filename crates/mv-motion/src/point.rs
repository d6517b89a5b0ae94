//! Straight-to-a-point movement and the assistance-seeking run built on it.

use mv_agent::Agent;
use mv_core::{MovementFlags, UnitStatus, Vec3};
use mv_path::PathRequest;
use mv_spline::TrajectoryInit;

use crate::{FollowUp, MotionContext, MotionEvent, MotionGenerator, MotionKind};

/// Reason code for a controlled descent that ends on the ground.
pub const EVENT_FALL_GROUND: u32 = 0xFFFF_FFFE;

/// Reason code for a run to fetch help.
pub const EVENT_ASSIST_MOVE: u32 = 0xFFFF_FFFF;

// ── PointGenerator ────────────────────────────────────────────────────────────

/// Move once to a fixed destination, then complete.
#[derive(Debug)]
pub struct PointGenerator {
    /// Reason code reported on arrival.
    id:            u32,
    destination:   Vec3,
    generate_path: bool,
    speed:         Option<f32>,
    arrived:       bool,
}

impl PointGenerator {
    /// Straight line to `destination`.
    pub fn new(id: u32, destination: Vec3) -> Self {
        Self { id, destination, generate_path: false, speed: None, arrived: false }
    }

    /// Route through the path planner instead of a straight line.
    pub fn with_path(mut self, generate: bool) -> Self {
        self.generate_path = generate;
        self
    }

    /// Fixed velocity instead of the agent's speed for its movement mode.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    /// `true` once the trajectory reached its end (as opposed to being
    /// cancelled).
    pub fn arrived(&self) -> bool {
        self.arrived
    }

    fn waypoints(&self, agent: &Agent, ctx: &MotionContext<'_>) -> Vec<Vec3> {
        if self.generate_path {
            let request = PathRequest::new(agent.mover.real_position(), self.destination)
                .capabilities(agent.capabilities);
            let path = ctx.planner.plan(&request);
            if path.is_usable() {
                return path.points;
            }
            log::trace!("{}: no path to {}, moving straight: {:?}", agent.id, self.destination, path.kind);
        }
        vec![self.destination]
    }
}

impl MotionGenerator for PointGenerator {
    fn kind(&self) -> MotionKind {
        MotionKind::Point
    }

    fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        if !agent.mover.is_stopped() {
            ctx.stop(&mut agent.mover);
        }
        let points = self.waypoints(agent, ctx);
        let mut init = TrajectoryInit::new(&mut agent.mover).move_by_path(points);
        if let Some(speed) = self.speed {
            init = init.set_velocity(speed);
        }
        ctx.launch(init);
    }

    fn update(&mut self, agent: &mut Agent, _ctx: &mut MotionContext<'_>, _diff_ms: u32) -> bool {
        if agent.has_status(UnitStatus::ROOTED | UnitStatus::STUNNED) {
            return agent.has_status(UnitStatus::FORCED_TRANSIT);
        }
        if agent.mover.is_stopped() {
            self.arrived = true;
            return false;
        }
        true
    }

    fn finalize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        agent.clear_status(UnitStatus::FORCED_TRANSIT);
        if self.arrived {
            self.movement_inform(agent, ctx);
        }
    }

    fn movement_inform(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        if !agent.is_autonomous() {
            return;
        }
        if self.id == EVENT_FALL_GROUND {
            agent.mover.move_flags.insert(MovementFlags::FLYING);
            ctx.emit(MotionEvent::ReachedGround { agent: agent.id });
        }
        ctx.inform(agent, MotionKind::Point, self.id);
    }
}

// ── AssistSeekGenerator ───────────────────────────────────────────────────────

/// Run to where help is, call it in, then stand distracted for the
/// configured assistance delay.
#[derive(Debug)]
pub struct AssistSeekGenerator {
    inner: PointGenerator,
}

impl AssistSeekGenerator {
    pub fn new(destination: Vec3) -> Self {
        Self { inner: PointGenerator::new(EVENT_ASSIST_MOVE, destination).with_path(true) }
    }

    pub fn destination(&self) -> Vec3 {
        self.inner.destination
    }
}

impl MotionGenerator for AssistSeekGenerator {
    fn kind(&self) -> MotionKind {
        MotionKind::AssistSeek
    }

    fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        agent.no_call_assistance = true;
        self.inner.initialize(agent, ctx);
    }

    fn update(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>, diff_ms: u32) -> bool {
        self.inner.update(agent, ctx, diff_ms)
    }

    fn finalize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        agent.no_call_assistance = false;
        ctx.emit(MotionEvent::CallAssistance { agent: agent.id });
        if agent.alive {
            let duration_ms = ctx.config.assistance_delay_ms;
            ctx.request(agent.id, FollowUp::AssistDistract { duration_ms });
        }
    }
}
