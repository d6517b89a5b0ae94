//! Read-only per-tick snapshot of every agent's observable state.

use rustc_hash::FxHashMap;

use mv_core::{AgentId, Vec3};

use crate::Agent;

/// What a generator may observe about another agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetView {
    pub id:           AgentId,
    /// Real (interpolated) position at snapshot time.
    pub position:     Vec3,
    pub orientation:  f32,
    pub object_size:  f32,
    pub combat_reach: f32,
    pub alive:        bool,
    pub in_world:     bool,
    pub walking:      bool,
}

impl TargetView {
    pub fn of(agent: &Agent) -> Self {
        Self {
            id:           agent.id,
            position:     agent.mover.real_position(),
            orientation:  agent.mover.orientation,
            object_size:  agent.object_size,
            combat_reach: agent.combat_reach,
            alive:        agent.alive,
            in_world:     agent.in_world,
            walking:      agent.is_walking(),
        }
    }
}

/// Snapshot built by the host once per tick, before any generator runs.
///
/// Agents that left the world are omitted, so a lookup by a stale id
/// returns `None`.
#[derive(Default, Debug)]
pub struct WorldView {
    agents: FxHashMap<AgentId, TargetView>,
}

impl WorldView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every in-world agent.
    pub fn capture<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> Self {
        let mut view = Self::new();
        for agent in agents {
            view.insert(TargetView::of(agent));
        }
        view
    }

    /// Add or replace one entry.  Entries not in the world are dropped.
    pub fn insert(&mut self, target: TargetView) {
        if target.in_world {
            self.agents.insert(target.id, target);
        } else {
            self.agents.remove(&target.id);
        }
    }

    pub fn remove(&mut self, id: AgentId) {
        self.agents.remove(&id);
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&TargetView> {
        self.agents.get(&id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
