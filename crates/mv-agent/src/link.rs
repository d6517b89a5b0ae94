//! Invalidation-safe follower → target links.
//!
//! The registry is the dependency table owned on behalf of targets: each
//! target maps to the links that reference it, and removing the target
//! invalidates every one of them in a single pass.  Followers hold only a
//! [`TargetLink`] handle and must resolve it through the registry before
//! every use; a resolved id is then looked up in the tick's
//! [`WorldView`][crate::WorldView].
//!
//! Link ids are never reused, so a stale handle can never resolve to a link
//! created later.

use rustc_hash::FxHashMap;

use mv_core::{AgentId, LinkId};

/// A follower's handle on its target.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TargetLink {
    id:     LinkId,
    target: AgentId,
}

impl TargetLink {
    #[inline]
    pub fn id(self) -> LinkId {
        self.id
    }

    /// The id the link was created for.  Whether that agent still exists is
    /// a separate question: ask the registry.
    #[inline]
    pub fn target_id(self) -> AgentId {
        self.target
    }
}

#[derive(Clone, Debug)]
struct LinkEntry {
    follower: AgentId,
    target:   AgentId,
    valid:    bool,
}

/// All live links, indexed both by link id and by target.
#[derive(Default, Debug)]
pub struct LinkRegistry {
    links:      FxHashMap<LinkId, LinkEntry>,
    dependents: FxHashMap<AgentId, Vec<LinkId>>,
    next_id:    u32,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `follower` as depending on `target`.
    pub fn link(&mut self, follower: AgentId, target: AgentId) -> TargetLink {
        let id = LinkId(self.next_id);
        self.next_id += 1;
        self.links.insert(id, LinkEntry { follower, target, valid: true });
        self.dependents.entry(target).or_default().push(id);
        TargetLink { id, target }
    }

    /// The target id if the link is still valid.
    pub fn resolve(&self, link: TargetLink) -> Option<AgentId> {
        self.links
            .get(&link.id)
            .filter(|e| e.valid && e.target == link.target)
            .map(|e| e.target)
    }

    #[inline]
    pub fn is_valid(&self, link: TargetLink) -> bool {
        self.resolve(link).is_some()
    }

    /// The follower that created `link`, while the link exists.
    pub fn follower(&self, link: TargetLink) -> Option<AgentId> {
        self.links.get(&link.id).map(|e| e.follower)
    }

    /// Forget `link` entirely (its generator is being destroyed).
    pub fn unlink(&mut self, link: TargetLink) {
        let Some(entry) = self.links.remove(&link.id) else {
            return;
        };
        if let Some(deps) = self.dependents.get_mut(&entry.target) {
            deps.retain(|&l| l != link.id);
            if deps.is_empty() {
                self.dependents.remove(&entry.target);
            }
        }
    }

    /// Invalidate every link that points at `target`.  Returns how many
    /// links were invalidated.
    pub fn invalidate_target(&mut self, target: AgentId) -> usize {
        let Some(deps) = self.dependents.remove(&target) else {
            return 0;
        };
        for id in &deps {
            if let Some(entry) = self.links.get_mut(id) {
                entry.valid = false;
            }
        }
        log::debug!("{target} left the world; invalidated {} follower link(s)", deps.len());
        deps.len()
    }

    /// Links currently depending on `target`.
    pub fn dependents(&self, target: AgentId) -> &[LinkId] {
        self.dependents.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of links (valid or not) that have not been unlinked.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
