//! Straight-line reference planner.
//!
//! `DirectPlanner` connects origin and destination with a single segment.
//! Axis-aligned blocking boxes stand in for navigation data: a segment that
//! crosses one is reported as `NoPath` unless the request forces a direct
//! path, in which case it is returned as a `Shortcut`.  An optional flat
//! floor gives `ground_height` something to project onto.

use mv_core::Vec3;

use crate::{Path, PathPlanner, PathRequest, PathType};

/// An axis-aligned box in the horizontal plane (height is ignored).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Slab test of the planar segment `a → b` against the box.
    pub fn intersects_segment(&self, a: Vec3, b: Vec3) -> bool {
        let (mut t0, mut t1) = (0.0f32, 1.0f32);
        let d = [b.x - a.x, b.y - a.y];
        let o = [a.x, a.y];
        let lo = [self.min_x, self.min_y];
        let hi = [self.max_x, self.max_y];
        for axis in 0..2 {
            if d[axis].abs() < f32::EPSILON {
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d[axis];
            let mut near = (lo[axis] - o[axis]) * inv;
            let mut far = (hi[axis] - o[axis]) * inv;
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            t0 = t0.max(near);
            t1 = t1.min(far);
            if t0 > t1 {
                return false;
            }
        }
        true
    }
}

/// Straight-line planner with optional blocking boxes.
#[derive(Clone, Debug, Default)]
pub struct DirectPlanner {
    pub obstacles: Vec<Aabb>,
    /// Height of the ground everywhere.  `None` leaves heights untouched.
    pub floor:     Option<f32>,
}

impl DirectPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obstacle(mut self, obstacle: Aabb) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn with_floor(mut self, z: f32) -> Self {
        self.floor = Some(z);
        self
    }
}

impl PathPlanner for DirectPlanner {
    fn plan(&self, request: &PathRequest) -> Path {
        let (from, to) = (request.origin, request.destination);
        if !from.is_finite() || !to.is_finite() || !request.capabilities.is_mobile() {
            return Path::failed(PathType::NotAttempted);
        }

        let blocked = self.obstacles.iter().any(|b| b.intersects_segment(from, to));
        let kind = match (blocked, request.force_direct) {
            (false, _)    => PathType::Normal,
            (true, true)  => PathType::Shortcut,
            (true, false) => {
                log::trace!("direct path {from} -> {to} blocked");
                return Path::failed(PathType::NoPath);
            }
        };

        let length = from.distance(to);
        match request.max_length {
            Some(limit) if length > limit && length > 0.0 => {
                let end = from.lerp(to, limit / length);
                Path::new(vec![end], PathType::Incomplete)
            }
            _ => Path::new(vec![to], kind),
        }
    }

    fn ground_height(&self, _x: f32, _y: f32, z: f32) -> f32 {
        self.floor.unwrap_or(z)
    }
}
