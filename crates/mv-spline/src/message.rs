//! The single outbound message: a committed trajectory.

use mv_core::{AgentId, Vec3};

use crate::{Facing, SplineFlags};

/// Everything a remote replica needs to reproduce a trajectory's
/// interpolation.  One message per commit; delivery is at-most-once and
/// unacknowledged.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionUpdate {
    pub agent:       AgentId,
    pub spline_id:   u32,
    pub start_ms:    u64,
    /// Full path, waypoint zero being the agent's position at commit time.
    pub path:        Vec<Vec3>,
    pub velocity:    f32,
    pub flags:       SplineFlags,
    pub facing:      Facing,
    pub duration_ms: u32,
}

/// Sink for committed trajectories, fanned out to the agent's observers.
pub trait MotionBroadcast {
    fn broadcast(&mut self, update: MotionUpdate);
}

impl MotionBroadcast for Vec<MotionUpdate> {
    fn broadcast(&mut self, update: MotionUpdate) {
        self.push(update);
    }
}

/// A sink that drops every update.  Useful when nobody is watching.
pub struct Discard;

impl MotionBroadcast for Discard {
    fn broadcast(&mut self, _update: MotionUpdate) {}
}
