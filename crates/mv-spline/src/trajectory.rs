//! A committed, time-interpolated path.

use mv_core::{AgentId, Vec3};

/// Motion modifiers carried by a trajectory and mirrored to observers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineFlags {
    /// Walk rather than run.
    pub walkmode: bool,
    pub flying:   bool,
    /// Loop back to the start instead of finishing.
    pub cyclic:   bool,
}

/// What the agent faces while (and after) moving.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    /// Face along the direction of travel.
    #[default]
    None,
    /// Turn to a fixed planar angle on arrival.
    Angle(f32),
    /// Keep facing another agent.
    Target(AgentId),
    /// Keep facing a fixed point.
    Point(Vec3),
}

/// A polyline with a velocity and its own elapsed-time counter.
///
/// `finalized()` holds iff `time_passed_ms >= duration_ms`.  Cyclic
/// trajectories wrap their elapsed time and therefore never finalize unless
/// their duration is zero.  The default trajectory is empty and finalized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    id:             u32,
    path:           Vec<Vec3>,
    /// `lengths[i]` is the polyline length from `path[0]` to `path[i]`.
    lengths:        Vec<f32>,
    velocity:       f32,
    flags:          SplineFlags,
    facing:         Facing,
    started_at_ms:  u64,
    time_passed_ms: u32,
    duration_ms:    u32,
}

impl Trajectory {
    /// Build from an already-validated path (non-empty, finite) and velocity
    /// (finite, positive).
    pub(crate) fn new(
        id:            u32,
        path:          Vec<Vec3>,
        velocity:      f32,
        flags:         SplineFlags,
        facing:        Facing,
        started_at_ms: u64,
    ) -> Self {
        let mut lengths = Vec::with_capacity(path.len());
        let mut total = 0.0f32;
        lengths.push(0.0);
        for pair in path.windows(2) {
            total += pair[0].distance(pair[1]);
            lengths.push(total);
        }
        let duration_ms = (total / velocity * 1000.0).round() as u32;
        Self {
            id,
            path,
            lengths,
            velocity,
            flags,
            facing,
            started_at_ms,
            time_passed_ms: 0,
            duration_ms,
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &[Vec3] {
        &self.path
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn flags(&self) -> SplineFlags {
        self.flags
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[inline]
    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    #[inline]
    pub fn time_passed_ms(&self) -> u32 {
        self.time_passed_ms
    }

    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    #[inline]
    pub fn finalized(&self) -> bool {
        self.time_passed_ms >= self.duration_ms
    }

    /// Total polyline length.
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Last waypoint, or `None` for the empty default trajectory.
    pub fn final_destination(&self) -> Option<Vec3> {
        self.path.last().copied()
    }

    /// Advance elapsed time by `diff_ms`.
    ///
    /// Returns `true` exactly once: on the update that moves the trajectory
    /// from in-flight to finalized.
    pub fn update(&mut self, diff_ms: u32) -> bool {
        if self.finalized() {
            return false;
        }
        let passed = self.time_passed_ms.saturating_add(diff_ms);
        if self.flags.cyclic {
            self.time_passed_ms = passed % self.duration_ms;
            return false;
        }
        self.time_passed_ms = passed.min(self.duration_ms);
        self.finalized()
    }

    /// Interpolated position at the current elapsed time.
    pub fn compute_position(&self) -> Option<Vec3> {
        self.position_at(self.time_passed_ms)
    }

    /// Interpolated position `t_ms` after the trajectory started.
    pub fn position_at(&self, t_ms: u32) -> Option<Vec3> {
        let last = *self.path.last()?;
        if t_ms >= self.duration_ms || self.path.len() == 1 {
            return Some(last);
        }
        let travelled = self.velocity * t_ms as f32 / 1000.0;
        // First waypoint whose cumulative length reaches `travelled`.
        let seg_end = self.lengths.partition_point(|&l| l < travelled).max(1);
        if seg_end >= self.path.len() {
            return Some(last);
        }
        let (l0, l1) = (self.lengths[seg_end - 1], self.lengths[seg_end]);
        let span = l1 - l0;
        let t = if span > 0.0 { (travelled - l0) / span } else { 1.0 };
        Some(self.path[seg_end - 1].lerp(self.path[seg_end], t.clamp(0.0, 1.0)))
    }

    /// Planar heading of the segment being travelled at the current time.
    pub(crate) fn current_heading(&self) -> Option<f32> {
        if self.path.len() < 2 {
            return None;
        }
        let travelled = self.velocity * self.time_passed_ms as f32 / 1000.0;
        let seg_end = self
            .lengths
            .partition_point(|&l| l <= travelled)
            .clamp(1, self.path.len() - 1);
        let (a, b) = (self.path[seg_end - 1], self.path[seg_end]);
        (a.distance_2d(b) > f32::EPSILON).then(|| a.angle_to(b))
    }
}
