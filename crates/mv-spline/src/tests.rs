//! Unit tests for mv-spline.

use mv_core::{AgentId, MovementFlags, SpeedType, Vec3};

use crate::{Facing, MotionUpdate, Mover, SplineArgs, SplineError, TrajectoryInit};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn mover_at(x: f32, y: f32) -> Mover {
    Mover::new(AgentId(1), Vec3::new(x, y, 0.0))
}

fn assert_near(a: Vec3, b: Vec3) {
    assert!(a.distance(b) < 1e-4, "{a} != {b}");
}

/// Launch a straight run to `dest` at a fixed 10 units/s.
fn launch_to(m: &mut Mover, dest: Vec3, out: &mut Vec<MotionUpdate>) -> u32 {
    TrajectoryInit::new(m).move_to(dest).set_velocity(10.0).launch(0, out)
}

// ── Trajectory ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trajectory {
    use super::*;

    #[test]
    fn default_is_finalized_and_empty() {
        let m = mover_at(0.0, 0.0);
        assert!(m.trajectory.finalized());
        assert!(m.trajectory.compute_position().is_none());
        assert_eq!(m.final_destination(), Vec3::ZERO);
    }

    #[test]
    fn duration_from_length_and_velocity() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        let d = launch_to(&mut m, Vec3::new(30.0, 40.0, 0.0), &mut out);
        assert_eq!(d, 5_000);
        assert_eq!(m.trajectory.length(), 50.0);
    }

    #[test]
    fn interpolates_across_segments() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        TrajectoryInit::new(&mut m)
            .move_by_path(vec![Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0)])
            .set_velocity(10.0)
            .launch(0, &mut out);

        let t = &m.trajectory;
        assert_eq!(t.position_at(0), Some(Vec3::ZERO));
        assert_eq!(t.position_at(500), Some(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(t.position_at(1_500), Some(Vec3::new(10.0, 5.0, 0.0)));
        assert_eq!(t.position_at(9_999), Some(Vec3::new(10.0, 10.0, 0.0)));
    }

    #[test]
    fn update_reports_arrival_once() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        launch_to(&mut m, Vec3::new(10.0, 0.0, 0.0), &mut out);

        assert!(!m.advance(600));
        assert!(!m.is_stopped());
        assert_near(m.position, Vec3::new(6.0, 0.0, 0.0));
        assert!(m.advance(600));
        assert!(m.is_stopped());
        assert_eq!(m.position, Vec3::new(10.0, 0.0, 0.0));
        assert!(!m.advance(600));
        assert!(!m.move_flags.contains(MovementFlags::SPLINE_ENABLED));
    }

    #[test]
    fn cyclic_never_finalizes() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        TrajectoryInit::new(&mut m)
            .move_by_path(vec![Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO])
            .set_velocity(10.0)
            .set_cyclic()
            .launch(0, &mut out);
        for _ in 0..50 {
            assert!(!m.advance(300));
        }
        assert!(!m.trajectory.finalized());
        assert!(m.trajectory.time_passed_ms() < m.trajectory.duration_ms());
    }

    #[test]
    fn facing_angle_applied_on_arrival() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        TrajectoryInit::new(&mut m)
            .move_to(Vec3::new(1.0, 0.0, 0.0))
            .set_velocity(10.0)
            .set_facing_angle(2.0)
            .launch(0, &mut out);
        m.advance(1_000);
        assert_eq!(m.orientation, 2.0);
    }
}

// ── Launch ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod launch {
    use super::*;

    #[test]
    fn continuity_from_finalized_state() {
        let mut m = mover_at(3.0, 4.0);
        let mut out = Vec::new();
        launch_to(&mut m, Vec3::new(10.0, 0.0, 0.0), &mut out);
        assert_eq!(m.trajectory.path()[0], Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(out[0].path[0], Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn continuity_from_mid_flight_state() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        launch_to(&mut m, Vec3::new(100.0, 0.0, 0.0), &mut out);
        m.trajectory.update(2_500); // advance without syncing `position`
        assert_eq!(m.position, Vec3::ZERO, "stored position is stale");

        launch_to(&mut m, Vec3::new(25.0, 50.0, 0.0), &mut out);
        assert_near(m.trajectory.path()[0], Vec3::new(25.0, 0.0, 0.0));
        assert_eq!(out[1].path[0], m.trajectory.path()[0]);
        assert_eq!(m.trajectory.duration_ms(), 5_000);
    }

    #[test]
    fn empty_path_mid_flight_yields_zero_displacement() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        launch_to(&mut m, Vec3::new(100.0, 0.0, 0.0), &mut out);
        m.trajectory.update(1_000);

        let d = TrajectoryInit::new(&mut m).launch(1_000, &mut out);
        let here = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(d, 0);
        let path = m.trajectory.path();
        assert_eq!(path.len(), 2);
        assert_near(path[0], here);
        assert_eq!(path[0], path[1]);
        assert!(m.is_stopped());
        assert_near(m.real_position(), here);
        assert_eq!(out.len(), 2, "a stop is still broadcast");
    }

    #[test]
    fn stop_is_an_empty_launch() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        launch_to(&mut m, Vec3::new(100.0, 0.0, 0.0), &mut out);
        m.advance(500);
        m.stop(500, &mut out);
        assert!(m.is_stopped());
        assert_near(m.final_destination(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_velocity_commits_nothing() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        launch_to(&mut m, Vec3::new(100.0, 0.0, 0.0), &mut out);
        let before = m.trajectory.clone();

        for v in [f32::NAN, f32::INFINITY, 0.0, -3.0] {
            let d = TrajectoryInit::new(&mut m)
                .move_to(Vec3::new(1.0, 1.0, 0.0))
                .set_velocity(v)
                .launch(10, &mut out);
            assert_eq!(d, 0);
            assert_eq!(m.trajectory, before);
        }
        assert_eq!(out.len(), 1, "rejected launches are not broadcast");
    }

    #[test]
    fn non_finite_waypoint_rejected() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        let d = TrajectoryInit::new(&mut m)
            .move_to(Vec3::new(f32::NAN, 0.0, 0.0))
            .launch(0, &mut out);
        assert_eq!(d, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn velocity_defaults_to_mode_speed() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        TrajectoryInit::new(&mut m).move_to(Vec3::new(7.0, 0.0, 0.0)).launch(0, &mut out);
        assert_eq!(m.trajectory.velocity(), m.speeds.get(SpeedType::Run));
        assert!(!m.move_flags.contains(MovementFlags::WALKING));

        TrajectoryInit::new(&mut m)
            .move_to(Vec3::new(3.0, 0.0, 0.0))
            .set_walk(true)
            .launch(0, &mut out);
        assert_eq!(m.trajectory.velocity(), m.speeds.get(SpeedType::Walk));
        assert!(m.move_flags.contains(MovementFlags::WALKING));
        assert!(m.move_flags.contains(MovementFlags::SPLINE_ENABLED | MovementFlags::FORWARD));
    }

    #[test]
    fn existing_flags_mixed_into_new_launch() {
        let mut m = mover_at(0.0, 0.0);
        m.move_flags.insert(MovementFlags::WALKING | MovementFlags::LEVITATING);
        let mut out = Vec::new();
        TrajectoryInit::new(&mut m).move_to(Vec3::new(5.0, 0.0, 0.0)).launch(0, &mut out);
        assert!(out[0].flags.walkmode);
        assert!(out[0].flags.flying);
    }

    #[test]
    fn flying_uses_flight_speed() {
        let mut m = mover_at(0.0, 0.0);
        m.move_flags.insert(MovementFlags::FLYING);
        m.speeds.set(SpeedType::Flight, 20.0);
        let mut out = Vec::new();
        TrajectoryInit::new(&mut m).move_to(Vec3::new(40.0, 0.0, 0.0)).launch(0, &mut out);
        assert_eq!(m.trajectory.velocity(), 20.0);
        assert_eq!(m.trajectory.duration_ms(), 2_000);
    }

    #[test]
    fn broadcast_carries_full_state() {
        let mut m = mover_at(0.0, 0.0);
        let mut out = Vec::new();
        TrajectoryInit::new(&mut m)
            .move_by_path(vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)])
            .set_velocity(4.0)
            .set_facing_target(AgentId(9))
            .launch(1_234, &mut out);
        let msg = &out[0];
        assert_eq!(msg.agent, AgentId(1));
        assert_eq!(msg.start_ms, 1_234);
        assert_eq!(msg.path.len(), 3);
        assert_eq!(msg.velocity, 4.0);
        assert_eq!(msg.facing, Facing::Target(AgentId(9)));
        assert_eq!(msg.duration_ms, 500);
        assert_eq!(msg.spline_id, m.trajectory.id());
    }

    #[test]
    fn validate_reports_reason() {
        let args = SplineArgs::default();
        assert_eq!(args.validate(), Err(SplineError::EmptyPath));
        let args = SplineArgs { path: vec![Vec3::ZERO], velocity: Some(f32::NAN), ..Default::default() };
        assert!(matches!(args.validate(), Err(SplineError::InvalidVelocity(_))));
    }
}

#[cfg(test)]
mod facing {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn in_arc_and_set_in_front() {
        let mut m = mover_at(0.0, 0.0);
        let north = Vec3::new(0.0, 10.0, 0.0);
        assert!(!m.has_in_arc(0.01, north));
        m.set_in_front(north);
        assert!((m.orientation - FRAC_PI_2).abs() < 1e-6);
        assert!(m.has_in_arc(0.01, north));
    }
}
