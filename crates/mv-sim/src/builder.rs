//! Fluent builder for constructing a [`Sim`].

use mv_agent::{AgentBuilder, AgentRngs, AgentStore, LinkRegistry};
use mv_core::SimConfig;
use mv_motion::{MotionMaster, Outbox};
use mv_path::PathPlanner;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick length, total ticks, seed, motion tunables
/// - `P: PathPlanner`: the path-search service (e.g. [`mv_path::DirectPlanner`])
///
/// # Optional inputs
///
/// | Method        | Default      |
/// |---------------|--------------|
/// | `.agent(b)`   | no agents    |
/// | `.agents(it)` | no agents    |
///
/// Agents can also be spawned later with [`Sim::spawn`].
pub struct SimBuilder<P: PathPlanner> {
    config:  SimConfig,
    planner: P,
    agents:  Vec<AgentBuilder>,
}

impl<P: PathPlanner> SimBuilder<P> {
    pub fn new(config: SimConfig, planner: P) -> Self {
        Self { config, planner, agents: Vec::new() }
    }

    /// Add one agent; ids are assigned in insertion order from 0.
    pub fn agent(mut self, agent: AgentBuilder) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = AgentBuilder>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        let mut sim = Sim {
            clock:    self.config.make_clock(),
            world_ms: 0,
            rngs:     AgentRngs::new(self.config.seed),
            config:   self.config,
            agents:   AgentStore::new(),
            masters:  Vec::<MotionMaster>::new(),
            links:    LinkRegistry::new(),
            planner:  self.planner,
            outbox:   Outbox::new(),
        };
        for agent in self.agents {
            sim.spawn(agent);
        }
        Ok(sim)
    }
}
