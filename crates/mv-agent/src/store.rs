//! Agent storage: `AgentStore` (agent data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! During the update phase the host needs `&mut Agent` for the agent being
//! updated, `&mut AgentRng` for its draws, and read access to the snapshot
//! of everyone else.  Keeping RNGs outside `AgentStore` lets all three
//! borrows coexist without interior mutability.

use mv_core::{AgentId, AgentRng, MvError, MvResult};

use crate::{Agent, AgentBuilder};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    seed:      u64,
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { seed: global_seed, inner: Vec::new() }
    }

    /// Seed RNGs for every id up to and including `agent`.
    pub(crate) fn ensure(&mut self, agent: AgentId) {
        while self.inner.len() <= agent.index() {
            let id = AgentId(self.inner.len() as u32);
            self.inner.push(AgentRng::new(self.seed, id));
        }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        self.ensure(agent);
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Every agent ever spawned, indexed by `AgentId`.
///
/// Removed agents keep their slot with `in_world = false` so ids are never
/// reused and stale ids stay detectable.
#[derive(Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent and return its id.
    pub fn spawn(&mut self, builder: AgentBuilder) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(builder.build(id));
        log::debug!("spawned {id}");
        id
    }

    /// Mark an agent as having left the world.
    pub fn despawn(&mut self, id: AgentId) -> MvResult<()> {
        let agent = self.get_mut(id).ok_or(MvError::AgentNotFound(id))?;
        if !agent.in_world {
            return Err(MvError::NotInWorld(id));
        }
        agent.in_world = false;
        log::debug!("despawned {id}");
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// Like [`get`][Self::get] but only for agents still in the world.
    pub fn in_world(&self, id: AgentId) -> Option<&Agent> {
        self.get(id).filter(|a| a.in_world)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    /// Total slots, including agents that have left the world.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
