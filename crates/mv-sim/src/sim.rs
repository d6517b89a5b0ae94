//! The `Sim` struct and its tick loop.

use mv_agent::{Agent, AgentBuilder, AgentRngs, AgentStore, LinkRegistry, WorldView};
use mv_core::{AgentId, MvError, SimClock, SimConfig, SpeedType, Tick, Vec3};
use mv_motion::{
    AssistDistractGenerator, AssistSeekGenerator, MotionContext, MotionEvent, MotionGenerator,
    MotionMaster, Outbox, PointGenerator, PursuitGenerator, WanderGenerator, EVENT_FALL_GROUND,
};
use mv_path::PathPlanner;
use mv_spline::Facing;

use crate::{SimError, SimObserver, SimResult};

/// The motion simulation runner.
///
/// `Sim<P>` owns every agent, each agent's [`MotionMaster`], the link
/// registry and the planner, and drives the four-phase tick loop described
/// in the crate docs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathPlanner> {
    /// Global configuration (tick length, total ticks, seed, tunables).
    pub config: SimConfig,

    /// Simulation clock; tracks the current tick and simulated time.
    pub clock: SimClock,

    /// Simulated time the movers' state corresponds to: the start of the
    /// last processed tick.
    pub(crate) world_ms: u64,

    /// Every agent ever spawned, indexed by `AgentId`.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Per-agent generator stacks, indexed by `AgentId`.
    pub masters: Vec<MotionMaster>,

    /// Follower → target links, invalidated when a target is removed.
    pub links: LinkRegistry,

    /// The path-search service.
    pub planner: P,

    /// Broadcasts and events not yet delivered to an observer.
    pub(crate) outbox: Outbox,
}

impl<P: PathPlanner> Sim<P> {
    // ── Run loop ──────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.total_ticks`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick.0 < self.config.total_ticks {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Deliver whatever commands produced since the last tick.
    pub fn flush<O: SimObserver>(&mut self, observer: &mut O) {
        self.deliver(self.clock.current_tick, observer);
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick();
        self.deliver(now, observer);
        let moving = self.agents.iter().filter(|a| a.in_world && !a.mover.is_stopped()).count();
        observer.on_tick_end(now, moving);
        self.clock.advance();
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self) {
        let diff_ms = self.config.tick_ms;
        let now_ms = self.clock.now_ms();

        // ── Phase 1: advance trajectories to now_ms ───────────────────────
        let elapsed = u32::try_from(now_ms.saturating_sub(self.world_ms)).unwrap_or(u32::MAX);
        for agent in self.agents.iter_mut().filter(|a| a.in_world) {
            agent.mover.advance(elapsed);
        }
        self.world_ms = now_ms;

        // ── Phase 2: snapshot ─────────────────────────────────────────────
        let world = WorldView::capture(self.agents.iter());
        for agent in self.agents.iter_mut().filter(|a| a.in_world) {
            if let Facing::Target(target) = agent.mover.trajectory.facing() {
                if let Some(seen) = world.get(target) {
                    agent.mover.set_in_front(seen.position);
                }
            }
        }

        // ── Phase 3: motion generators, ascending id ──────────────────────
        for index in 0..self.agents.len() {
            let id = AgentId(index as u32);
            let Some(agent) = self.agents.get_mut(id) else {
                continue;
            };
            let master = &mut self.masters[index];
            if !agent.in_world || master.is_empty() {
                continue;
            }
            let mut ctx = MotionContext {
                now_ms,
                world:   &world,
                links:   &mut self.links,
                planner: &self.planner,
                config:  &self.config.motion,
                rng:     self.rngs.get_mut(id),
                outbox:  &mut self.outbox,
            };
            master.update(agent, &mut ctx, diff_ms);
        }
    }

    /// Phase 4: hand broadcasts to the observer and apply host-owned events.
    fn deliver<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        for update in self.outbox.updates.drain(..) {
            observer.on_motion_update(now, &update);
        }
        let events = std::mem::take(&mut self.outbox.events);
        for event in events {
            self.apply_event(&event);
            observer.on_motion_event(now, &event);
        }
        // Masters consume follow-ups as soon as they are requested.
        self.outbox.followups.clear();
    }

    fn apply_event(&mut self, event: &MotionEvent) {
        match *event {
            MotionEvent::ReachedGround { agent } => {
                if let Some(a) = self.agents.get_mut(agent) {
                    a.alive = false;
                    log::debug!("{agent} reached the ground and died");
                }
            }
            MotionEvent::Attack { agent, target } => {
                if let Some(a) = self.agents.get_mut(agent) {
                    a.victim = Some(target);
                }
            }
            MotionEvent::Inform { .. } | MotionEvent::CallAssistance { .. } => {}
        }
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Add an agent to the world and return its id.
    pub fn spawn(&mut self, agent: AgentBuilder) -> AgentId {
        let id = self.agents.spawn(agent);
        self.masters.push(MotionMaster::new());
        id
    }

    /// Remove an agent from the world.
    ///
    /// Its generators are finalized, and every link that targets it is
    /// invalidated so its pursuers end on their next update.
    pub fn remove(&mut self, id: AgentId) -> SimResult<()> {
        self.with_motion(id, |master, agent, ctx| master.clear(agent, ctx))?;
        self.agents.despawn(id)?;
        self.links.invalidate_target(id);
        Ok(())
    }

    /// Simulated time of the agents' current positions.  Commands issued
    /// between ticks launch from here.
    pub fn now_ms(&self) -> u64 {
        self.world_ms
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn master(&self, id: AgentId) -> Option<&MotionMaster> {
        self.masters.get(id.index())
    }

    /// Change one of an agent's speeds and tell its active generator.
    pub fn set_speed(&mut self, id: AgentId, speed: SpeedType, rate: f32) -> SimResult<()> {
        let agent = self.live_agent_mut(id)?;
        agent.mover.speeds.set(speed, rate);
        self.masters[id.index()].notify_speed_changed();
        Ok(())
    }

    // ── Motion commands ───────────────────────────────────────────────────

    /// Move to `destination`, reporting `event_id` on arrival.
    pub fn move_point(
        &mut self,
        id:            AgentId,
        event_id:      u32,
        destination:   Vec3,
        generate_path: bool,
    ) -> SimResult<()> {
        let generator = PointGenerator::new(event_id, destination).with_path(generate_path);
        self.start(id, Box::new(generator))
    }

    /// Drop straight down to the ground; the agent dies on landing.
    pub fn move_fall(&mut self, id: AgentId) -> SimResult<()> {
        let here = self.live_agent_mut(id)?.mover.real_position();
        let ground = Vec3::new(here.x, here.y, self.planner.ground_height(here.x, here.y, here.z));
        self.start(id, Box::new(PointGenerator::new(EVENT_FALL_GROUND, ground)))
    }

    /// Wander confusedly around the current position.
    pub fn move_confused(&mut self, id: AgentId) -> SimResult<()> {
        self.start(id, Box::new(WanderGenerator::new()))
    }

    /// Chase `target` as the agent's victim.
    pub fn move_chase(&mut self, id: AgentId, target: AgentId, offset: f32, angle: f32) -> SimResult<()> {
        self.check_target(id, target)?;
        self.live_agent_mut(id)?.victim = Some(target);
        let link = self.links.link(id, target);
        self.start(id, Box::new(PursuitGenerator::chase(link, offset, angle)))
    }

    /// Follow `target` at a formation slot.
    pub fn move_follow(&mut self, id: AgentId, target: AgentId, offset: f32, angle: f32) -> SimResult<()> {
        self.check_target(id, target)?;
        let link = self.links.link(id, target);
        self.start(id, Box::new(PursuitGenerator::follow(link, offset, angle)))
    }

    /// Run to `destination` and call for help there.
    pub fn move_seek_assistance(&mut self, id: AgentId, destination: Vec3) -> SimResult<()> {
        self.start(id, Box::new(AssistSeekGenerator::new(destination)))
    }

    /// Stand distracted for `duration_ms`.
    pub fn move_distract(&mut self, id: AgentId, duration_ms: u32) -> SimResult<()> {
        self.start(id, Box::new(AssistDistractGenerator::new(duration_ms)))
    }

    /// Finalize every generator and halt the agent where it is.
    pub fn stop(&mut self, id: AgentId) -> SimResult<()> {
        self.with_motion(id, |master, agent, ctx| {
            master.clear(agent, ctx);
            if !agent.mover.is_stopped() {
                ctx.stop(&mut agent.mover);
            }
        })
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn start(&mut self, id: AgentId, generator: Box<dyn MotionGenerator>) -> SimResult<()> {
        self.with_motion(id, |master, agent, ctx| master.start(generator, agent, ctx))
    }

    fn live_agent_mut(&mut self, id: AgentId) -> SimResult<&mut Agent> {
        let agent = self.agents.get_mut(id).ok_or(MvError::AgentNotFound(id))?;
        if !agent.in_world {
            return Err(MvError::NotInWorld(id).into());
        }
        Ok(agent)
    }

    fn check_target(&self, id: AgentId, target: AgentId) -> SimResult<()> {
        if id == target {
            return Err(SimError::SelfTarget(id));
        }
        self.agents.get(target).ok_or(MvError::AgentNotFound(target))?;
        self.agents.in_world(target).ok_or(MvError::NotInWorld(target))?;
        Ok(())
    }

    /// Run `f` against one agent's stack with a freshly captured snapshot.
    fn with_motion<F>(&mut self, id: AgentId, f: F) -> SimResult<()>
    where
        F: FnOnce(&mut MotionMaster, &mut Agent, &mut MotionContext<'_>),
    {
        let world = WorldView::capture(self.agents.iter());
        let agent = self.agents.get_mut(id).ok_or(MvError::AgentNotFound(id))?;
        if !agent.in_world {
            return Err(MvError::NotInWorld(id).into());
        }
        let mut ctx = MotionContext {
            now_ms:  self.world_ms,
            world:   &world,
            links:   &mut self.links,
            planner: &self.planner,
            config:  &self.config.motion,
            rng:     self.rngs.get_mut(id),
            outbox:  &mut self.outbox,
        };
        f(&mut self.masters[id.index()], agent, &mut ctx);
        Ok(())
    }
}
