//! `mv-agent`: the agents generators move, and how they see each other.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`agent`]  | `Agent`, `AgentKind`, `AgentBuilder`                            |
//! | [`store`]  | `AgentStore` (agents by id), `AgentRngs` (per-agent RNG)        |
//! | [`link`]   | `LinkRegistry`, `TargetLink`: invalidation-safe target handles |
//! | [`view`]   | `WorldView`, `TargetView`: per-tick read-only snapshot         |
//!
//! # Cross-agent access
//!
//! A generator mutates only its own agent.  Everything it learns about other
//! agents comes from the [`WorldView`] snapshot built once per tick, reached
//! through a [`TargetLink`] that the registry invalidates when the target
//! leaves the world.  There is no path from a follower to a removed target.

pub mod agent;
pub mod link;
pub mod store;
pub mod view;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentBuilder, AgentKind};
pub use link::{LinkRegistry, TargetLink};
pub use store::{AgentRngs, AgentStore};
pub use view::{TargetView, WorldView};
