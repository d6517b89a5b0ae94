//! The motion-relevant slice of an agent.

use mv_core::{AgentId, MovementFlags, SpeedTable, Vec3};
use mv_core::geo::angle_diff;

use crate::{Facing, MotionBroadcast, Trajectory, TrajectoryInit};

/// Position, orientation, movement flags, speeds, and the current trajectory
/// of one agent.  At most one trajectory exists at a time; launching a new
/// one replaces it wholesale.
#[derive(Clone, Debug)]
pub struct Mover {
    /// The agent this mover belongs to; stamped on every broadcast.
    pub owner:       AgentId,
    /// Last synced position.  May lag the trajectory by up to one tick;
    /// use [`real_position`][Self::real_position] for the exact value.
    pub position:    Vec3,
    pub orientation: f32,
    pub move_flags:  MovementFlags,
    pub speeds:      SpeedTable,
    pub trajectory:  Trajectory,
    spline_seq:      u32,
}

impl Mover {
    pub fn new(owner: AgentId, position: Vec3) -> Self {
        Self {
            owner,
            position,
            orientation: 0.0,
            move_flags:  MovementFlags::default(),
            speeds:      SpeedTable::default(),
            trajectory:  Trajectory::default(),
            spline_seq:  0,
        }
    }

    pub(crate) fn next_spline_id(&mut self) -> u32 {
        self.spline_seq = self.spline_seq.wrapping_add(1);
        self.spline_seq
    }

    /// Where the agent truly is right now: the interpolated trajectory point
    /// while in flight, the stored position otherwise.
    pub fn real_position(&self) -> Vec3 {
        if self.trajectory.finalized() {
            self.position
        } else {
            self.trajectory.compute_position().unwrap_or(self.position)
        }
    }

    /// `true` when no trajectory is in flight.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.trajectory.finalized()
    }

    /// Where the current trajectory ends (the stored position if there is none).
    pub fn final_destination(&self) -> Vec3 {
        self.trajectory.final_destination().unwrap_or(self.position)
    }

    /// Advance the trajectory by `diff_ms` and sync position and orientation.
    ///
    /// Returns `true` on the tick the trajectory finalizes naturally.
    pub fn advance(&mut self, diff_ms: u32) -> bool {
        if self.trajectory.finalized() {
            return false;
        }
        let arrived = self.trajectory.update(diff_ms);
        if let Some(p) = self.trajectory.compute_position() {
            self.position = p;
        }
        match self.trajectory.facing() {
            Facing::Angle(a) if arrived => self.orientation = a,
            Facing::Point(p) => self.set_in_front(p),
            Facing::None => {
                if let Some(h) = self.trajectory.current_heading() {
                    self.orientation = h;
                }
            }
            // Target facing is resolved by whoever can see the target.
            _ => {}
        }
        if arrived {
            self.move_flags.remove(MovementFlags::SPLINE_ENABLED | MovementFlags::FORWARD);
        }
        arrived
    }

    /// Replace any in-flight trajectory with a stationary one at the real
    /// position.
    pub fn stop(&mut self, now_ms: u64, sink: &mut dyn MotionBroadcast) {
        TrajectoryInit::new(self).launch(now_ms, sink);
    }

    /// `true` if `point` lies within `arc` radians centred on the facing.
    pub fn has_in_arc(&self, arc: f32, point: Vec3) -> bool {
        let angle = self.position.angle_to(point);
        angle_diff(angle, self.orientation) <= arc * 0.5
    }

    /// Turn to face `point`.
    pub fn set_in_front(&mut self, point: Vec3) {
        if self.position.distance_2d(point) > f32::EPSILON {
            self.orientation = self.position.angle_to(point);
        }
    }
}
