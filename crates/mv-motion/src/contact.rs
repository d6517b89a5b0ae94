//! Melee range and contact-point geometry.
//!
//! All distances here are *edge* distances: centre distance minus both
//! collision radii, floored at zero.

use mv_agent::{Agent, TargetView};
use mv_core::{RandomSource, Vec3};
use mv_path::PathPlanner;

/// Edge distance at which two agents can strike each other.
pub const MELEE_RANGE: f32 = 5.0;

/// Edge distance between an agent and a target.
pub fn edge_distance(agent: &Agent, target: &TargetView) -> f32 {
    let centre = agent.mover.real_position().distance(target.position);
    (centre - agent.object_size - target.object_size).max(0.0)
}

pub fn within_melee_range(agent: &Agent, target: &TargetView) -> bool {
    edge_distance(agent, target) <= MELEE_RANGE
}

/// Where a pursuer should stand relative to its target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ContactMode {
    /// Anywhere within melee range.
    Melee,
    /// On the target→pursuer axis, a little inside `offset`.
    Kiting { offset: f32 },
    /// At `offset` and `angle` relative to the target's facing.
    Formation { offset: f32, angle: f32 },
}

impl ContactMode {
    /// `following` pursuers never kite: a zero angle still means a
    /// formation slot directly ahead of the target.
    pub fn select(offset: f32, angle: f32, following: bool) -> Self {
        if offset == 0.0 {
            ContactMode::Melee
        } else if angle == 0.0 && !following {
            ContactMode::Kiting { offset }
        } else {
            ContactMode::Formation { offset, angle }
        }
    }

    /// Pick a destination for `agent` around `target`, projected to ground.
    ///
    /// Melee contact points sit at most `slack` beyond both radii, so a
    /// pursuer standing on one is inside its own recheck allowance.
    pub fn destination(
        self,
        agent:   &Agent,
        target:  &TargetView,
        planner: &dyn PathPlanner,
        rng:     &mut dyn RandomSource,
        slack:   f32,
    ) -> Vec3 {
        let here = agent.mover.real_position();
        let radii = target.object_size + agent.object_size;
        let towards_agent = target.position.angle_to(here);

        let flat = match self {
            ContactMode::Melee => {
                let gap = rng.range_f32(0.0, (MELEE_RANGE - 0.5).min(slack));
                target.position.offset_polar(radii + gap, towards_agent)
            }
            ContactMode::Kiting { offset } => {
                let factor = rng.range_u32(80, 95) as f32 * 0.01;
                target.position.offset_polar(radii + offset * factor, towards_agent)
            }
            ContactMode::Formation { offset, angle } => {
                target.position.offset_polar(radii + offset, target.orientation + angle)
            }
        };
        Vec3::new(flat.x, flat.y, planner.ground_height(flat.x, flat.y, target.position.z))
    }
}
