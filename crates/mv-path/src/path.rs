//! Planner results.

use mv_core::Vec3;

/// How good a planned path is.
///
/// `Normal`, `Shortcut` and `Incomplete` paths are usable; `NoPath` and
/// `NotAttempted` mean the caller should leave its trajectory alone and retry
/// on a later tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathType {
    /// A complete path that respects the navigation data.
    Normal,
    /// A straight line that ignores the navigation data.
    Shortcut,
    /// The path stops short of the destination (length limit or partial mesh).
    Incomplete,
    /// No path exists.
    NoPath,
    /// The planner declined to search.
    #[default]
    NotAttempted,
}

impl PathType {
    /// `true` for any classification a generator may launch on.
    #[inline]
    pub fn is_usable(self) -> bool {
        matches!(self, PathType::Normal | PathType::Shortcut | PathType::Incomplete)
    }
}

/// An ordered waypoint sequence plus its classification.
///
/// `points` excludes the origin: the first element is the first waypoint
/// after the agent's current position and the last is the (possibly
/// truncated) destination.  The trajectory synthesizer prepends the origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub points: Vec<Vec3>,
    pub kind:   PathType,
}

impl Path {
    pub fn new(points: Vec<Vec3>, kind: PathType) -> Self {
        Self { points, kind }
    }

    /// A failed request: no waypoints and the given failure classification.
    pub fn failed(kind: PathType) -> Self {
        Self { points: Vec::new(), kind }
    }

    #[inline]
    pub fn is_usable(&self) -> bool {
        self.kind.is_usable() && !self.points.is_empty()
    }

    /// Last waypoint, if any.
    pub fn destination(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    /// Total polyline length starting from `origin`.
    pub fn length_from(&self, origin: Vec3) -> f32 {
        let mut prev = origin;
        let mut total = 0.0;
        for &p in &self.points {
            total += prev.distance(p);
            prev = p;
        }
        total
    }
}
