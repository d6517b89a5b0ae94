//! Unit tests for mv-path.

use mv_core::Vec3;

use crate::{Aabb, Capabilities, DirectPlanner, Path, PathPlanner, PathRequest, PathType};

#[cfg(test)]
mod path_type {
    use super::*;

    #[test]
    fn usable_classifications() {
        assert!(PathType::Normal.is_usable());
        assert!(PathType::Shortcut.is_usable());
        assert!(PathType::Incomplete.is_usable());
        assert!(!PathType::NoPath.is_usable());
        assert!(!PathType::NotAttempted.is_usable());
    }

    #[test]
    fn empty_path_is_not_usable() {
        assert!(!Path::new(vec![], PathType::Normal).is_usable());
        assert!(Path::new(vec![Vec3::ZERO], PathType::Normal).is_usable());
    }

    #[test]
    fn length_from_origin() {
        let p = Path::new(vec![Vec3::new(3.0, 4.0, 0.0), Vec3::new(3.0, 10.0, 0.0)], PathType::Normal);
        assert_eq!(p.length_from(Vec3::ZERO), 11.0);
        assert_eq!(p.destination(), Some(Vec3::new(3.0, 10.0, 0.0)));
    }
}

#[cfg(test)]
mod direct_planner {
    use super::*;

    fn wall() -> Aabb {
        Aabb::new(4.0, -1.0, 6.0, 1.0)
    }

    #[test]
    fn open_ground_is_normal() {
        let path = DirectPlanner::new().plan(&PathRequest::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(path.kind, PathType::Normal);
        assert_eq!(path.points, vec![Vec3::new(10.0, 0.0, 0.0)]);
    }

    #[test]
    fn obstacle_blocks_unless_forced() {
        let planner = DirectPlanner::new().with_obstacle(wall());
        let req = PathRequest::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(planner.plan(&req).kind, PathType::NoPath);
        assert!(planner.plan(&req).points.is_empty());

        let forced = planner.plan(&req.clone().force_direct(true));
        assert_eq!(forced.kind, PathType::Shortcut);
        assert!(forced.is_usable());
    }

    #[test]
    fn segment_beside_obstacle_is_clear() {
        let planner = DirectPlanner::new().with_obstacle(wall());
        let req = PathRequest::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(10.0, 5.0, 0.0));
        assert_eq!(planner.plan(&req).kind, PathType::Normal);
    }

    #[test]
    fn length_limit_truncates() {
        let req = PathRequest::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)).max_length(30.0);
        let path = DirectPlanner::new().plan(&req);
        assert_eq!(path.kind, PathType::Incomplete);
        let end = path.destination().unwrap();
        assert!((end.x - 30.0).abs() < 1e-4, "got {end}");
    }

    #[test]
    fn immobile_agent_not_attempted() {
        let caps = Capabilities { can_walk: false, can_swim: false, can_fly: false };
        let req = PathRequest::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)).capabilities(caps);
        assert_eq!(DirectPlanner::new().plan(&req).kind, PathType::NotAttempted);
    }

    #[test]
    fn non_finite_destination_not_attempted() {
        let req = PathRequest::new(Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0));
        assert_eq!(DirectPlanner::new().plan(&req).kind, PathType::NotAttempted);
    }

    #[test]
    fn default_ground_height_is_identity() {
        assert_eq!(DirectPlanner::new().ground_height(1.0, 2.0, 3.5), 3.5);
    }

    #[test]
    fn floor_projects_every_height() {
        let planner = DirectPlanner::new().with_floor(0.0);
        assert_eq!(planner.ground_height(1.0, 2.0, 15.0), 0.0);
        assert_eq!(planner.ground_height(-4.0, 9.0, -3.0), 0.0);
    }
}
