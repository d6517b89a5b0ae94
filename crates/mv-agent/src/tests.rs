//! Unit tests for mv-agent.

use mv_core::{AgentId, MvError, RandomSource, Vec3};
use mv_spline::{Discard, TrajectoryInit};

use crate::{AgentBuilder, AgentKind, AgentRngs, AgentStore, LinkRegistry, WorldView};

fn store_with(n: usize) -> AgentStore {
    let mut store = AgentStore::new();
    for i in 0..n {
        store.spawn(AgentBuilder::new(Vec3::new(i as f32 * 10.0, 0.0, 0.0)));
    }
    store
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut store = AgentStore::new();
        let a = store.spawn(AgentBuilder::new(Vec3::ZERO));
        let b = store.spawn(AgentBuilder::new(Vec3::ZERO).player());
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
        assert!(store.get(a).unwrap().is_autonomous());
        assert_eq!(store.get(b).unwrap().kind, AgentKind::PlayerControlled);
    }

    #[test]
    fn despawn_keeps_slot_but_leaves_world() {
        let mut store = store_with(2);
        store.despawn(AgentId(0)).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get(AgentId(0)).is_some());
        assert!(store.in_world(AgentId(0)).is_none());
        assert!(store.in_world(AgentId(1)).is_some());
    }

    #[test]
    fn despawn_errors() {
        let mut store = store_with(1);
        assert!(matches!(store.despawn(AgentId(5)), Err(MvError::AgentNotFound(_))));
        store.despawn(AgentId(0)).unwrap();
        assert!(matches!(store.despawn(AgentId(0)), Err(MvError::NotInWorld(_))));
    }

    #[test]
    fn builder_applies_overrides() {
        let agent = AgentBuilder::new(Vec3::new(1.0, 2.0, 3.0))
            .orientation(1.0)
            .object_size(2.0)
            .combat_reach(4.0)
            .trusted_follower(true)
            .build(AgentId(9));
        assert_eq!(agent.id, AgentId(9));
        assert_eq!(agent.mover.owner, AgentId(9));
        assert_eq!(agent.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(agent.mover.orientation, 1.0);
        assert_eq!(agent.object_size, 2.0);
        assert_eq!(agent.combat_reach, 4.0);
        assert!(agent.trusted_follower);
        assert!(agent.alive && agent.in_world);
    }

    #[test]
    fn rngs_are_per_agent_and_reproducible() {
        let mut a = AgentRngs::new(7);
        let mut b = AgentRngs::new(7);
        let x = a.get_mut(AgentId(3)).range_u32(0, 1_000_000);
        let y = b.get_mut(AgentId(3)).range_u32(0, 1_000_000);
        assert_eq!(x, y);
        assert_eq!(a.len(), 4);
    }
}

// ── Links ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod links {
    use super::*;

    #[test]
    fn resolves_until_target_invalidated() {
        let mut reg = LinkRegistry::new();
        let link = reg.link(AgentId(1), AgentId(2));
        assert_eq!(reg.resolve(link), Some(AgentId(2)));
        assert_eq!(reg.follower(link), Some(AgentId(1)));

        assert_eq!(reg.invalidate_target(AgentId(2)), 1);
        assert_eq!(reg.resolve(link), None);
        assert!(!reg.is_valid(link));
        // The handle still remembers who it was for.
        assert_eq!(link.target_id(), AgentId(2));
    }

    #[test]
    fn invalidation_hits_every_dependent_only() {
        let mut reg = LinkRegistry::new();
        let a = reg.link(AgentId(1), AgentId(9));
        let b = reg.link(AgentId(2), AgentId(9));
        let c = reg.link(AgentId(3), AgentId(8));
        assert_eq!(reg.dependents(AgentId(9)).len(), 2);

        assert_eq!(reg.invalidate_target(AgentId(9)), 2);
        assert!(!reg.is_valid(a));
        assert!(!reg.is_valid(b));
        assert!(reg.is_valid(c));
        assert!(reg.dependents(AgentId(9)).is_empty());
        assert_eq!(reg.invalidate_target(AgentId(9)), 0);
    }

    #[test]
    fn unlink_removes_from_dependents() {
        let mut reg = LinkRegistry::new();
        let a = reg.link(AgentId(1), AgentId(9));
        let b = reg.link(AgentId(2), AgentId(9));
        reg.unlink(a);
        assert_eq!(reg.dependents(AgentId(9)), &[b.id()]);
        assert_eq!(reg.resolve(a), None);
        assert_eq!(reg.len(), 1);
        // Unlinking twice is harmless.
        reg.unlink(a);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut reg = LinkRegistry::new();
        let a = reg.link(AgentId(1), AgentId(2));
        reg.unlink(a);
        let b = reg.link(AgentId(1), AgentId(2));
        assert_ne!(a.id(), b.id());
        assert_eq!(reg.resolve(a), None);
        assert_eq!(reg.resolve(b), Some(AgentId(2)));
    }
}

// ── View ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod view {
    use super::*;

    #[test]
    fn capture_skips_agents_out_of_world() {
        let mut store = store_with(3);
        store.despawn(AgentId(1)).unwrap();
        let view = WorldView::capture(store.iter());
        assert_eq!(view.len(), 2);
        assert!(view.get(AgentId(1)).is_none());
        assert_eq!(view.get(AgentId(2)).unwrap().position, Vec3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn capture_uses_real_position() {
        let mut store = store_with(1);
        let agent = store.get_mut(AgentId(0)).unwrap();
        TrajectoryInit::new(&mut agent.mover)
            .move_to(Vec3::new(10.0, 0.0, 0.0))
            .set_velocity(10.0)
            .launch(0, &mut Discard);
        agent.mover.trajectory.update(500);

        let view = WorldView::capture(store.iter());
        let seen = view.get(AgentId(0)).unwrap();
        assert!((seen.position.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn insert_out_of_world_removes() {
        let store = store_with(1);
        let mut view = WorldView::capture(store.iter());
        let mut tv = *view.get(AgentId(0)).unwrap();
        tv.in_world = false;
        view.insert(tv);
        assert!(view.is_empty());
    }
}
