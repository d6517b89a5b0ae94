//! skirmish: a small scene exercising every motion generator.
//!
//! A raider chases a guard across a walled yard, a hound follows its
//! handler in formation, a dazed scout wanders, a runner fetches help, and
//! a bat drops from the rafters.

use std::time::Instant;

use anyhow::Result;

use mv_agent::AgentBuilder;
use mv_core::{AgentId, SimConfig, Tick, Vec3};
use mv_motion::MotionEvent;
use mv_path::{Aabb, DirectPlanner};
use mv_sim::{SimBuilder, SimObserver};
use mv_spline::MotionUpdate;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 42;
const TICK_MS:     u32 = 100;
const TOTAL_TICKS: u64 = 300; // 30 simulated seconds

const RAIDER:  AgentId = AgentId(0);
const GUARD:   AgentId = AgentId(1);
const HANDLER: AgentId = AgentId(2);
const HOUND:   AgentId = AgentId(3);
const SCOUT:   AgentId = AgentId(4);
const RUNNER:  AgentId = AgentId(5);
const BAT:     AgentId = AgentId(6);

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ConsoleObserver {
    updates:     usize,
    peak_moving: usize,
}

impl SimObserver for ConsoleObserver {
    fn on_motion_update(&mut self, _tick: Tick, _update: &MotionUpdate) {
        self.updates += 1;
    }

    fn on_motion_event(&mut self, tick: Tick, event: &MotionEvent) {
        println!("{tick:>6}  {event:?}");
    }

    fn on_tick_end(&mut self, _tick: Tick, moving: usize) {
        self.peak_moving = self.peak_moving.max(moving);
    }
}

fn main() -> Result<()> {
    println!("=== skirmish ===");

    // 1. A yard with a flat floor and one wall between the raider and the guard.
    let planner = DirectPlanner::new()
        .with_floor(0.0)
        .with_obstacle(Aabb::new(10.0, -2.0, 12.0, 2.0));

    // 2. Agents, in id order.
    let config = SimConfig { tick_ms: TICK_MS, total_ticks: TOTAL_TICKS, seed: SEED, ..SimConfig::default() };
    let mut sim = SimBuilder::new(config, planner)
        .agent(AgentBuilder::new(Vec3::new(0.0, 8.0, 0.0)))
        .agent(AgentBuilder::new(Vec3::new(25.0, 0.0, 0.0)))
        .agent(AgentBuilder::new(Vec3::new(-20.0, -20.0, 0.0)).orientation(0.5))
        .agent(AgentBuilder::new(Vec3::new(-30.0, -20.0, 0.0)).trusted_follower(true))
        .agent(AgentBuilder::new(Vec3::new(40.0, 40.0, 0.0)))
        .agent(AgentBuilder::new(Vec3::new(-5.0, 30.0, 0.0)))
        .agent(AgentBuilder::new(Vec3::new(0.0, -30.0, 15.0)))
        .build()?;

    // 3. Orders.
    sim.move_chase(RAIDER, GUARD, 0.0, 0.0)?;
    sim.move_point(HANDLER, 1, Vec3::new(20.0, -20.0, 0.0), true)?;
    sim.move_follow(HOUND, HANDLER, 2.0, std::f32::consts::PI)?;
    sim.move_confused(SCOUT)?;
    sim.move_seek_assistance(RUNNER, Vec3::new(-5.0, 45.0, 0.0))?;
    sim.move_fall(BAT)?;

    // 4. Run.
    let mut obs = ConsoleObserver::default();
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  trajectories broadcast : {}", obs.updates);
    println!("  peak agents moving     : {}", obs.peak_moving);
    println!();

    println!("{:<8} {:<24} {:<6} {:<18}", "Agent", "Position", "Alive", "Generators");
    println!("{}", "-".repeat(58));
    for agent in sim.agents.iter() {
        let kinds = sim.master(agent.id).map(|m| m.kinds()).unwrap_or_default();
        println!(
            "{:<8} {:<24} {:<6} {:<18}",
            agent.id.to_string(),
            agent.position().to_string(),
            agent.alive,
            format!("{kinds:?}"),
        );
    }

    Ok(())
}
