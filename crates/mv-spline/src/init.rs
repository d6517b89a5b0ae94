//! Trajectory synthesis: assemble, validate, commit, broadcast.

use mv_core::{AgentId, MovementFlags, SpeedType, Vec3};

use crate::{Facing, MotionBroadcast, MotionUpdate, Mover, SplineError, SplineFlags, SplineResult};

/// The arguments of one launch, before the origin is prepended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplineArgs {
    /// Waypoints after the origin.  Empty means "stay where you are".
    pub path:     Vec<Vec3>,
    /// `None` selects the agent's speed for its movement mode.
    pub velocity: Option<f32>,
    pub flags:    SplineFlags,
    pub facing:   Facing,
}

impl SplineArgs {
    /// Check an assembled (origin-prefixed) path and resolved velocity.
    pub fn validate(&self) -> SplineResult<()> {
        if self.path.is_empty() {
            return Err(SplineError::EmptyPath);
        }
        if let Some(index) = self.path.iter().position(|p| !p.is_finite()) {
            return Err(SplineError::NonFinitePoint { index });
        }
        match self.velocity {
            Some(v) if v.is_finite() && v > 0.0 => Ok(()),
            other => Err(SplineError::InvalidVelocity(other.unwrap_or(0.0))),
        }
    }
}

/// Builder for a new trajectory on one mover.
///
/// Construction mixes the mover's current state into the arguments: walk
/// mode follows its `WALKING` flag and flying follows `FLYING | LEVITATING`.
///
/// ```rust,ignore
/// let duration = TrajectoryInit::new(&mut agent.mover)
///     .move_by_path(path.points)
///     .set_walk(true)
///     .launch(now_ms, &mut outbox);
/// ```
pub struct TrajectoryInit<'m> {
    mover: &'m mut Mover,
    args:  SplineArgs,
}

impl<'m> TrajectoryInit<'m> {
    pub fn new(mover: &'m mut Mover) -> Self {
        let flags = SplineFlags {
            walkmode: mover.move_flags.contains(MovementFlags::WALKING),
            flying:   mover.move_flags.intersects(MovementFlags::FLYING | MovementFlags::LEVITATING),
            cyclic:   false,
        };
        Self { mover, args: SplineArgs { flags, ..SplineArgs::default() } }
    }

    /// Straight line to `dest`.
    pub fn move_to(mut self, dest: Vec3) -> Self {
        self.args.path = vec![dest];
        self
    }

    /// Follow `points` (origin excluded).
    pub fn move_by_path(mut self, points: Vec<Vec3>) -> Self {
        self.args.path = points;
        self
    }

    pub fn set_walk(mut self, walk: bool) -> Self {
        self.args.flags.walkmode = walk;
        self
    }

    pub fn set_fly(mut self, fly: bool) -> Self {
        self.args.flags.flying = fly;
        self
    }

    pub fn set_cyclic(mut self) -> Self {
        self.args.flags.cyclic = true;
        self
    }

    pub fn set_velocity(mut self, velocity: f32) -> Self {
        self.args.velocity = Some(velocity);
        self
    }

    pub fn set_facing_target(mut self, target: AgentId) -> Self {
        self.args.facing = Facing::Target(target);
        self
    }

    pub fn set_facing_angle(mut self, angle: f32) -> Self {
        self.args.facing = Facing::Angle(angle);
        self
    }

    pub fn set_facing_point(mut self, point: Vec3) -> Self {
        self.args.facing = Facing::Point(point);
        self
    }

    /// Commit the trajectory and broadcast it.
    ///
    /// Returns the trajectory duration in milliseconds, or `0` if the
    /// assembled trajectory failed validation, in which case nothing was
    /// committed or broadcast.
    pub fn launch(self, now_ms: u64, sink: &mut dyn MotionBroadcast) -> u32 {
        let TrajectoryInit { mover, mut args } = self;

        let real_position = mover.real_position();
        if args.path.is_empty() {
            args.path.push(real_position);
        }
        args.path.insert(0, real_position);

        let mut move_flags = mover.move_flags;
        move_flags.set(MovementFlags::WALKING, args.flags.walkmode);
        move_flags.insert(MovementFlags::SPLINE_ENABLED | MovementFlags::FORWARD);

        if args.velocity.is_none() {
            args.velocity = Some(mover.speeds.get(SpeedType::select(move_flags)));
        }

        if let Err(e) = args.validate() {
            log::warn!("agent {}: trajectory rejected: {e}", mover.owner);
            return 0;
        }
        let Some(velocity) = args.velocity else {
            return 0;
        };

        let spline_id = mover.next_spline_id();
        mover.move_flags = move_flags;
        mover.position = real_position;
        mover.trajectory = crate::Trajectory::new(
            spline_id,
            args.path,
            velocity,
            args.flags,
            args.facing,
            now_ms,
        );

        if mover.trajectory.finalized() {
            mover.move_flags.remove(MovementFlags::SPLINE_ENABLED | MovementFlags::FORWARD);
        }

        let trajectory = &mover.trajectory;
        sink.broadcast(MotionUpdate {
            agent:       mover.owner,
            spline_id,
            start_ms:    now_ms,
            path:        trajectory.path().to_vec(),
            velocity,
            flags:       trajectory.flags(),
            facing:      trajectory.facing(),
            duration_ms: trajectory.duration_ms(),
        });
        trajectory.duration_ms()
    }
}
