//! `mv-core`: foundational types for the motion-generator framework.
//!
//! This crate is a dependency of every other `mv-*` crate.  It has no `mv-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ids`]        | `AgentId`, `LinkId`                                       |
//! | [`geo`]        | `Vec3`, planar angles and distances                       |
//! | [`time`]       | `Tick`, `SimClock`, `Timer`                               |
//! | [`config`]     | `SimConfig`, `MotionConfig`                               |
//! | [`rng`]        | `AgentRng` (per-agent), `RandomSource` trait              |
//! | [`status`]     | `UnitStatus`, `DisplayFlags`                              |
//! | [`movement`]   | `MovementFlags`, `SpeedType`, `SpeedTable`                |
//! | [`error`]      | `MvError`, `MvResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod movement;
pub mod rng;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MotionConfig, SimConfig};
pub use error::{MvError, MvResult};
pub use geo::Vec3;
pub use ids::{AgentId, LinkId};
pub use movement::{MovementFlags, SpeedTable, SpeedType};
pub use rng::{AgentRng, RandomSource};
pub use status::{DisplayFlags, UnitStatus};
pub use time::{SimClock, Tick, Timer};
