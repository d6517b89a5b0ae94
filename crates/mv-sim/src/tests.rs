//! Integration tests for mv-sim.

use mv_agent::AgentBuilder;
use mv_core::{AgentId, MovementFlags, MvError, SimConfig, SpeedType, Tick, UnitStatus, Vec3};
use mv_motion::{MotionEvent, MotionKind, EVENT_FALL_GROUND};
use mv_path::{DirectPlanner, Path, PathPlanner, PathRequest, PathType};
use mv_spline::MotionUpdate;

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig { tick_ms: 100, total_ticks, seed: 42, ..SimConfig::default() }
}

/// Two agents on the x axis, `gap` apart.
fn pair(gap: f32) -> Sim<DirectPlanner> {
    SimBuilder::new(test_config(100), DirectPlanner::new())
        .agent(AgentBuilder::new(Vec3::ZERO))
        .agent(AgentBuilder::new(Vec3::new(gap, 0.0, 0.0)))
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    updates:    Vec<MotionUpdate>,
    events:     Vec<(Tick, MotionEvent)>,
    ticks:      u64,
    max_moving: usize,
    ended:      Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_motion_update(&mut self, _tick: Tick, update: &MotionUpdate) {
        self.updates.push(update.clone());
    }

    fn on_motion_event(&mut self, tick: Tick, event: &MotionEvent) {
        self.events.push((tick, event.clone()));
    }

    fn on_tick_end(&mut self, _tick: Tick, moving: usize) {
        self.ticks += 1;
        self.max_moving = self.max_moving.max(moving);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

impl Recorder {
    fn count(&self, pred: impl Fn(&MotionEvent) -> bool) -> usize {
        self.events.iter().filter(|(_, e)| pred(e)).count()
    }
}

/// Flat planner whose ground sits at `z = 0`.
struct Floor;

impl PathPlanner for Floor {
    fn plan(&self, request: &PathRequest) -> Path {
        Path::new(vec![request.destination], PathType::Normal)
    }

    fn ground_height(&self, _x: f32, _y: f32, _z: f32) -> f32 {
        0.0
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn spawns_agents_with_empty_stacks() {
        let sim = pair(10.0);
        assert_eq!(sim.agents.len(), 2);
        assert_eq!(sim.masters.len(), 2);
        assert!(sim.master(AgentId(1)).unwrap().is_empty());
    }

    #[test]
    fn invalid_config_errors() {
        let config = SimConfig { tick_ms: 0, ..SimConfig::default() };
        let result = SimBuilder::new(config, DirectPlanner::new()).build();
        assert!(matches!(result, Err(SimError::Core(MvError::Config(_)))));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_total_ticks() {
        let mut sim = pair(10.0);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.ticks, 100);
        assert_eq!(rec.ended, Some(Tick(100)));
        assert_eq!(sim.clock.current_tick, Tick(100));
    }

    #[test]
    fn point_move_arrives_and_informs() {
        let mut sim = pair(50.0);
        sim.move_point(AgentId(0), 5, Vec3::new(10.0, 0.0, 0.0), true).unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(20, &mut rec).unwrap();

        assert_eq!(rec.updates.len(), 1);
        assert_eq!(rec.updates[0].agent, AgentId(0));
        assert_eq!(rec.updates[0].path[0], Vec3::ZERO);
        assert_eq!(rec.max_moving, 1);
        assert_eq!(
            rec.count(|e| *e == MotionEvent::Inform { agent: AgentId(0), motion: MotionKind::Point, id: 5 }),
            1
        );
        assert!(sim.master(AgentId(0)).unwrap().is_empty());
        assert!(sim.agent(AgentId(0)).unwrap().position().distance(Vec3::new(10.0, 0.0, 0.0)) < 1e-3);
    }

    #[test]
    fn chase_closes_in_and_attacks_once() {
        let mut sim = pair(30.0);
        sim.move_chase(AgentId(0), AgentId(1), 0.0, 0.0).unwrap();
        assert!(sim.agent(AgentId(0)).unwrap().has_status(UnitStatus::CHASING));

        let mut rec = Recorder::default();
        sim.run_ticks(80, &mut rec).unwrap();

        assert_eq!(
            rec.count(|e| *e == MotionEvent::Attack { agent: AgentId(0), target: AgentId(1) }),
            1
        );
        let chaser = sim.agent(AgentId(0)).unwrap();
        let target = sim.agent(AgentId(1)).unwrap();
        assert!(chaser.position().distance(target.position()) < 5.0);
        assert_eq!(sim.master(AgentId(0)).unwrap().top_kind(), Some(MotionKind::Pursuit));
    }

    #[test]
    fn stationary_target_is_attacked_once_for_any_seed() {
        for seed in 0..20 {
            let config = SimConfig { seed, ..test_config(300) };
            let mut sim = SimBuilder::new(config, DirectPlanner::new())
                .agent(AgentBuilder::new(Vec3::ZERO))
                .agent(AgentBuilder::new(Vec3::new(30.0, 0.0, 0.0)))
                .build()
                .unwrap();
            sim.move_chase(AgentId(0), AgentId(1), 0.0, 0.0).unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();

            assert_eq!(rec.count(|e| matches!(e, MotionEvent::Attack { .. })), 1, "seed {seed}");
            assert_eq!(rec.count(|e| matches!(e, MotionEvent::Inform { .. })), 1, "seed {seed}");
            assert_eq!(rec.updates.len(), 1, "seed {seed}");
        }
    }

    #[test]
    fn commanded_launch_replays_in_step_with_the_host() {
        for warmup in [0, 5] {
            let mut sim = pair(50.0);
            sim.run_ticks(warmup, &mut NoopObserver).unwrap();
            sim.move_point(AgentId(0), 1, Vec3::new(40.0, 0.0, 0.0), false).unwrap();
            let mut rec = Recorder::default();
            sim.flush(&mut rec);
            let update = rec.updates[0].clone();
            assert_eq!(update.start_ms, sim.now_ms());

            sim.run_ticks(3, &mut NoopObserver).unwrap();
            let elapsed_s = (sim.now_ms() - update.start_ms) as f32 / 1000.0;
            let replica_x = update.path[0].x + update.velocity * elapsed_s;
            let server_x = sim.agent(AgentId(0)).unwrap().position().x;
            assert!((replica_x - server_x).abs() < 1e-3, "warmup {warmup}: {replica_x} != {server_x}");
        }
    }

    #[test]
    fn fall_onto_planner_floor_takes_time() {
        let mut sim = SimBuilder::new(test_config(100), DirectPlanner::new().with_floor(0.0))
            .agent(AgentBuilder::new(Vec3::new(0.0, 0.0, 15.0)))
            .build()
            .unwrap();
        sim.move_fall(AgentId(0)).unwrap();
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        let agent = sim.agent(AgentId(0)).unwrap();
        assert!(agent.alive);
        assert!(agent.position().z > 0.0 && agent.position().z < 15.0);

        sim.run_ticks(40, &mut NoopObserver).unwrap();
        let agent = sim.agent(AgentId(0)).unwrap();
        assert!(!agent.alive);
        assert!(agent.position().z.abs() < 1e-3);
    }

    #[test]
    fn removing_target_ends_pursuit() {
        let mut sim = pair(30.0);
        sim.move_chase(AgentId(0), AgentId(1), 0.0, 0.0).unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();

        sim.remove(AgentId(1)).unwrap();
        assert!(sim.links.dependents(AgentId(1)).is_empty());
        sim.run_ticks(1, &mut NoopObserver).unwrap();

        let chaser = sim.agent(AgentId(0)).unwrap();
        assert!(sim.master(AgentId(0)).unwrap().is_empty());
        assert!(!chaser.has_status(UnitStatus::CHASING | UnitStatus::PURSUING));
        assert!(sim.links.is_empty());
    }

    #[test]
    fn fall_kills_on_landing() {
        let mut sim = SimBuilder::new(test_config(100), Floor)
            .agent(AgentBuilder::new(Vec3::new(0.0, 0.0, 20.0)))
            .build()
            .unwrap();
        sim.move_fall(AgentId(0)).unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(40, &mut rec).unwrap();

        let agent = sim.agent(AgentId(0)).unwrap();
        assert!(!agent.alive);
        assert!(agent.mover.move_flags.contains(MovementFlags::FLYING));
        assert!(agent.position().z.abs() < 1e-3);
        assert_eq!(rec.count(|e| matches!(e, MotionEvent::ReachedGround { .. })), 1);
        assert_eq!(
            rec.count(|e| matches!(e, MotionEvent::Inform { id, .. } if *id == EVENT_FALL_GROUND)),
            1
        );
    }

    #[test]
    fn seek_assistance_calls_then_waits() {
        let mut sim = pair(50.0);
        sim.move_seek_assistance(AgentId(0), Vec3::new(5.0, 0.0, 0.0)).unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(10, &mut rec).unwrap();

        assert_eq!(rec.count(|e| matches!(e, MotionEvent::CallAssistance { .. })), 1);
        assert_eq!(sim.master(AgentId(0)).unwrap().top_kind(), Some(MotionKind::AssistDistract));
        assert!(sim.agent(AgentId(0)).unwrap().has_status(UnitStatus::DISTRACTED));

        sim.run_ticks(20, &mut rec).unwrap();
        assert!(sim.master(AgentId(0)).unwrap().is_empty());
        assert!(!sim.agent(AgentId(0)).unwrap().has_status(UnitStatus::DISTRACTED));
    }

    #[test]
    fn same_seed_same_wander() {
        let run = || {
            let mut sim = pair(50.0);
            sim.move_confused(AgentId(0)).unwrap();
            let mut rec = Recorder::default();
            sim.run_ticks(100, &mut rec).unwrap();
            rec.updates
        };
        let a = run();
        assert!(!a.is_empty());
        assert_eq!(a, run());
    }

    #[test]
    fn stop_clears_stack_and_halts() {
        let mut sim = pair(50.0);
        sim.move_point(AgentId(0), 1, Vec3::new(40.0, 0.0, 0.0), false).unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        sim.stop(AgentId(0)).unwrap();
        assert!(sim.master(AgentId(0)).unwrap().is_empty());
        assert!(sim.agent(AgentId(0)).unwrap().mover.is_stopped());

        let mut rec = Recorder::default();
        sim.flush(&mut rec);
        assert_eq!(rec.updates.len(), 1);
        assert!(rec.events.is_empty());
    }

    #[test]
    fn speed_change_applies() {
        let mut sim = pair(50.0);
        sim.set_speed(AgentId(0), SpeedType::Run, 14.0).unwrap();
        sim.move_point(AgentId(0), 1, Vec3::new(14.0, 0.0, 0.0), false).unwrap();
        let mut rec = Recorder::default();
        sim.flush(&mut rec);
        assert_eq!(rec.updates[0].velocity, 14.0);
        assert_eq!(rec.updates[0].duration_ms, 1_000);
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn chase_rejects_bad_targets() {
        let mut sim = pair(10.0);
        assert!(matches!(
            sim.move_chase(AgentId(0), AgentId(0), 0.0, 0.0),
            Err(SimError::SelfTarget(_))
        ));
        assert!(matches!(
            sim.move_chase(AgentId(0), AgentId(9), 0.0, 0.0),
            Err(SimError::Core(MvError::AgentNotFound(_)))
        ));
        sim.remove(AgentId(1)).unwrap();
        assert!(matches!(
            sim.move_follow(AgentId(0), AgentId(1), 2.0, 0.0),
            Err(SimError::Core(MvError::NotInWorld(_)))
        ));
    }

    #[test]
    fn removed_agents_reject_commands() {
        let mut sim = pair(10.0);
        sim.remove(AgentId(0)).unwrap();
        assert!(matches!(sim.remove(AgentId(0)), Err(SimError::Core(MvError::NotInWorld(_)))));
        assert!(matches!(sim.move_confused(AgentId(0)), Err(SimError::Core(MvError::NotInWorld(_)))));
        assert!(matches!(
            sim.move_distract(AgentId(7), 100),
            Err(SimError::Core(MvError::AgentNotFound(_)))
        ));
    }
}
