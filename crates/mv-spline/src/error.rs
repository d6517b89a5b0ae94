use thiserror::Error;

/// Reasons an assembled trajectory is rejected before commit.
#[derive(Debug, Error, PartialEq)]
pub enum SplineError {
    #[error("trajectory has no waypoints")]
    EmptyPath,

    #[error("velocity {0} is not a finite positive number")]
    InvalidVelocity(f32),

    #[error("waypoint {index} is not finite")]
    NonFinitePoint { index: usize },
}

pub type SplineResult<T> = Result<T, SplineError>;
