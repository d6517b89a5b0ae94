//! The planner trait and request type.
//!
//! # Pluggability
//!
//! Generators call planning through [`PathPlanner`], so hosts can plug in a
//! navigation-mesh search, a waypoint graph, or a scripted test double
//! without touching the generators.

use mv_core::Vec3;

use crate::Path;

/// Locomotion capabilities a planner may honour when choosing terrain.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    pub can_walk: bool,
    pub can_swim: bool,
    pub can_fly:  bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { can_walk: true, can_swim: true, can_fly: false }
    }
}

impl Capabilities {
    /// `true` if the agent has at least one way to get around.
    #[inline]
    pub fn is_mobile(self) -> bool {
        self.can_walk || self.can_swim || self.can_fly
    }
}

/// One synchronous planning query.
#[derive(Clone, Debug, PartialEq)]
pub struct PathRequest {
    pub origin:       Vec3,
    pub destination:  Vec3,
    /// Longest acceptable path; longer results are truncated and reported as
    /// [`PathType::Incomplete`][crate::PathType::Incomplete].
    pub max_length:   Option<f32>,
    /// Trusted followers may skip obstacle-aware detours entirely.
    pub force_direct: bool,
    pub capabilities: Capabilities,
}

impl PathRequest {
    pub fn new(origin: Vec3, destination: Vec3) -> Self {
        Self {
            origin,
            destination,
            max_length:   None,
            force_direct: false,
            capabilities: Capabilities::default(),
        }
    }

    pub fn max_length(mut self, limit: f32) -> Self {
        self.max_length = Some(limit);
        self
    }

    pub fn force_direct(mut self, force: bool) -> Self {
        self.force_direct = force;
        self
    }

    pub fn capabilities(mut self, caps: Capabilities) -> Self {
        self.capabilities = caps;
        self
    }
}

/// Synchronous path-search service.
///
/// Implementations must answer within a fraction of a tick: generators call
/// `plan` inline from their per-tick update.
pub trait PathPlanner {
    /// Plan a path for `request`.  Never fails hard: an impossible request
    /// is reported through [`Path::kind`].
    fn plan(&self, request: &PathRequest) -> Path;

    /// Project `(x, y)` onto walkable ground, using `z` as the search hint.
    ///
    /// Default: flat world, `z` is returned unchanged.
    fn ground_height(&self, _x: f32, _y: f32, z: f32) -> f32 {
        z
    }
}

impl<P: PathPlanner + ?Sized> PathPlanner for &P {
    fn plan(&self, request: &PathRequest) -> Path {
        (**self).plan(request)
    }

    fn ground_height(&self, x: f32, y: f32, z: f32) -> f32 {
        (**self).ground_height(x, y, z)
    }
}
