//! Chase and formation-follow toward a linked target.
//!
//! # Two-phase gate
//!
//! Recomputing a destination costs a path search, so it sits behind two
//! checks.  The recheck timer admits at most one distance check per
//! `pursuit_recheck_interval_ms`; the distance check then compares the
//! current trajectory's end with the target's live position and only
//! recomputes when the two drifted further apart than both collision radii
//! plus `recalculation_range_rate`.
//!
//! # Contact modes
//!
//! | offset | angle | following | mode                                  |
//! |--------|-------|-----------|---------------------------------------|
//! | 0      | any   | any       | melee: anywhere within melee range    |
//! | > 0    | 0     | no        | kiting: on the axis, inside `offset`  |
//! | > 0    | any   | yes       | formation: polar slot off the facing  |
//! | > 0    | ≠ 0   | any       | formation                             |

use mv_agent::{Agent, TargetLink, TargetView};
use mv_core::{MovementFlags, Timer, UnitStatus, Vec3};
use mv_path::{PathRequest, PathType};
use mv_spline::TrajectoryInit;

use crate::contact::{edge_distance, within_melee_range, ContactMode, MELEE_RANGE};
use crate::{MotionContext, MotionEvent, MotionGenerator, MotionKind};

/// Squared distance the target must move before a mid-flight pursuer
/// bothers to recompute.
const ANCHOR_EPSILON_SQ: f32 = 0.01;

/// Facing tolerance, in radians, before a stopped pursuer turns to its
/// target.
const FACING_ARC: f32 = 0.01;

/// States that suspend pursuit without ending it.
const HELD: UnitStatus = UnitStatus(
    UnitStatus::ROOTED.0 | UnitStatus::STUNNED.0 | UnitStatus::FLEEING.0 | UnitStatus::DISTRACTED.0,
);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PursuitKind {
    /// Hunt the agent's current victim at run pace.
    Chase,
    /// Keep up with a leader; autonomous followers walk when it walks.
    Follow,
}

impl PursuitKind {
    fn status(self) -> UnitStatus {
        match self {
            PursuitKind::Chase => UnitStatus::CHASING,
            PursuitKind::Follow => UnitStatus::FOLLOWING,
        }
    }
}

#[derive(Debug)]
pub struct PursuitGenerator {
    kind:           PursuitKind,
    link:           TargetLink,
    offset:         f32,
    angle:          f32,
    recheck:        Timer,
    /// Target position at the last successful launch.
    anchor:         Option<Vec3>,
    /// Recompute at the next recheck regardless of distance.
    recalculate:    bool,
    /// Set until a launch gives the pursuer something to arrive at.
    target_reached: bool,
    last_path:      PathType,
}

impl PursuitGenerator {
    pub fn new(kind: PursuitKind, link: TargetLink, offset: f32, angle: f32) -> Self {
        Self {
            kind,
            link,
            offset,
            angle,
            recheck: Timer::default(),
            anchor: None,
            recalculate: false,
            target_reached: true,
            last_path: PathType::NotAttempted,
        }
    }

    pub fn chase(link: TargetLink, offset: f32, angle: f32) -> Self {
        Self::new(PursuitKind::Chase, link, offset, angle)
    }

    pub fn follow(link: TargetLink, offset: f32, angle: f32) -> Self {
        Self::new(PursuitKind::Follow, link, offset, angle)
    }

    pub fn pursuit_kind(&self) -> PursuitKind {
        self.kind
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// `false` only when the last search came back with a degraded path.
    pub fn is_reachable(&self) -> bool {
        matches!(self.last_path, PathType::Normal | PathType::NotAttempted)
    }

    fn mode(&self, agent: &Agent) -> ContactMode {
        ContactMode::select(self.offset, self.angle, agent.has_status(UnitStatus::FOLLOWING))
    }

    fn walks(&self, agent: &Agent, target: &TargetView) -> bool {
        match self.kind {
            PursuitKind::Chase => false,
            PursuitKind::Follow => agent.is_autonomous() && target.walking,
        }
    }

    /// The target's snapshot, if the link is valid and it is still in the
    /// world.
    fn resolve(&self, ctx: &MotionContext<'_>) -> Option<TargetView> {
        let id = ctx.links.resolve(self.link)?;
        ctx.world.get(id).filter(|t| t.in_world).copied()
    }

    /// Pick a fresh destination near the target and launch toward it.
    /// Returns `true` if a trajectory was launched.
    fn set_target_location(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) -> bool {
        let Some(target) = self.resolve(ctx) else {
            return false;
        };
        if agent.has_status(UnitStatus::CANNOT_MOVE) {
            return false;
        }

        let mode = self.mode(agent);
        let unmoved = self.anchor.is_some_and(|a| target.position.distance_sq(a) < ANCHOR_EPSILON_SQ);
        if agent.mover.is_stopped() {
            // Already standing at an unmoved target: nothing to recompute.
            if mode == ContactMode::Melee
                && unmoved
                && !self.recalculate
                && within_melee_range(agent, &target)
            {
                return false;
            }
        } else {
            let gap = edge_distance(agent, &target);
            match mode {
                ContactMode::Melee if gap <= MELEE_RANGE => {
                    ctx.stop(&mut agent.mover);
                    return false;
                }
                ContactMode::Kiting { offset } if gap <= offset * 0.8 => {
                    ctx.stop(&mut agent.mover);
                    return false;
                }
                ContactMode::Formation { offset, .. } if gap <= offset + 1.0 => return false,
                _ => {}
            }
            if unmoved {
                return false;
            }
        }

        let slack = ctx.config.recalculation_range_rate;
        let destination = mode.destination(agent, &target, ctx.planner, &mut *ctx.rng, slack);
        let request = PathRequest::new(agent.mover.real_position(), destination)
            .force_direct(agent.trusted_follower && agent.has_status(UnitStatus::FOLLOWING))
            .capabilities(agent.capabilities);
        let path = ctx.planner.plan(&request);
        self.last_path = path.kind;
        if !path.is_usable() {
            log::trace!("{}: cannot reach {}: {:?}", agent.id, target.id, path.kind);
            return false;
        }

        agent.add_status(UnitStatus::PURSUING);
        self.target_reached = false;
        self.recalculate = false;
        self.anchor = Some(target.position);

        let walk = self.walks(agent, &target);
        ctx.launch(TrajectoryInit::new(&mut agent.mover).move_by_path(path.points).set_walk(walk));
        true
    }
}

impl MotionGenerator for PursuitGenerator {
    fn kind(&self) -> MotionKind {
        MotionKind::Pursuit
    }

    fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        agent.add_status(self.kind.status());
        if self.kind == PursuitKind::Chase && agent.victim.is_some() {
            agent.mover.move_flags.remove(MovementFlags::WALKING);
        }
        self.recheck.reset(ctx.config.pursuit_recheck_interval_ms);
        self.set_target_location(agent, ctx);
    }

    fn update(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>, diff_ms: u32) -> bool {
        let Some(target) = self.resolve(ctx) else {
            return false;
        };

        if !agent.alive || agent.has_status(HELD) {
            return true;
        }
        if agent.has_status(UnitStatus::CASTING) {
            if !agent.mover.is_stopped() {
                ctx.stop(&mut agent.mover);
            }
            return true;
        }
        // A chaser whose victim changed waits for its owner to retarget.
        if self.kind == PursuitKind::Chase && agent.victim != Some(target.id) {
            return true;
        }

        self.recheck.update(diff_ms);
        if self.recheck.passed() {
            self.recheck.reset(ctx.config.pursuit_recheck_interval_ms);
            let allowed = target.object_size + agent.object_size + ctx.config.recalculation_range_rate;
            let drift_sq = agent.mover.final_destination().distance_sq(target.position);
            if self.recalculate || drift_sq > allowed * allowed {
                self.set_target_location(agent, ctx);
            }
        }

        if agent.mover.is_stopped() {
            if self.angle == 0.0 && !agent.mover.has_in_arc(FACING_ARC, target.position) {
                agent.mover.set_in_front(target.position);
            }
            if !self.target_reached {
                self.target_reached = true;
                agent.clear_status(UnitStatus::PURSUING);
                let melee = self.mode(agent) == ContactMode::Melee;
                if melee && !agent.has_status(UnitStatus::FOLLOWING) && within_melee_range(agent, &target) {
                    ctx.emit(MotionEvent::Attack { agent: agent.id, target: target.id });
                }
                self.movement_inform(agent, ctx);
            }
        }
        true
    }

    fn finalize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        agent.clear_status(UnitStatus::PURSUING | self.kind.status());
        ctx.links.unlink(self.link);
    }

    fn movement_inform(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        ctx.inform(agent, MotionKind::Pursuit, self.link.target_id().0);
    }

    fn on_speed_changed(&mut self) {
        self.recalculate = true;
    }

    fn target(&self) -> Option<TargetLink> {
        Some(self.link)
    }
}
