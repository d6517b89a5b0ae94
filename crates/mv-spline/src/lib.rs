//! `mv-spline`: committed trajectories and how they are synthesized.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`trajectory`] | `Trajectory`, `SplineFlags`, `Facing`                        |
//! | [`init`]       | `TrajectoryInit`: builds, validates and launches trajectories |
//! | [`mover`]      | `Mover`: an agent's position, flags, speeds and trajectory  |
//! | [`message`]    | `MotionUpdate`, `MotionBroadcast`                            |
//! | [`error`]      | `SplineError`, `SplineResult<T>`                             |
//!
//! # Continuity
//!
//! Every launch starts from where the agent *actually* is: if the previous
//! trajectory is still in flight, its interpolated position at launch time
//! becomes waypoint zero of the new one.  The stored `Mover::position` may be
//! up to one tick stale and is never trusted for that purpose.
//!
//! # Time
//!
//! Trajectories own their elapsed time (`time_passed_ms`), advanced by the
//! host through [`Mover::advance`].  Position along the path is a pure
//! function of that elapsed time, so observers that receive the
//! [`MotionUpdate`] reproduce the same interpolation remotely.

pub mod error;
pub mod init;
pub mod message;
pub mod mover;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use error::{SplineError, SplineResult};
pub use init::{SplineArgs, TrajectoryInit};
pub use message::{Discard, MotionBroadcast, MotionUpdate};
pub use mover::Mover;
pub use trajectory::{Facing, SplineFlags, Trajectory};
