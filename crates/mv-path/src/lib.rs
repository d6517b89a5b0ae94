//! `mv-path`: the synchronous path-search boundary.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`planner`] | `PathPlanner` trait, `PathRequest`, `Capabilities`         |
//! | [`path`]    | `Path`, `PathType`                                         |
//! | [`direct`]  | `DirectPlanner`: straight lines around blocking boxes     |
//!
//! The search algorithm itself lives outside this workspace.  Generators only
//! see the trait: one synchronous `plan` call per tick at most, returning an
//! ordered waypoint list plus a quality classification.

pub mod direct;
pub mod path;
pub mod planner;

#[cfg(test)]
mod tests;

pub use direct::{Aabb, DirectPlanner};
pub use path::{Path, PathType};
pub use planner::{Capabilities, PathPlanner, PathRequest};
