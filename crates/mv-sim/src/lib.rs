//! `mv-sim`: tick loop host for the motion-generator framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Advance  : every in-world mover advances its trajectory to the
//!                 tick's start time (tick * tick_ms).
//!   ② Snapshot : build the read-only WorldView from the advanced state;
//!                 movers facing a target turn toward it.
//!   ③ Motion   : in ascending AgentId order, update each agent's
//!                 MotionMaster (which pops generators that complete).
//!   ④ Deliver  : broadcast committed trajectories and completion events
//!                 to the observer; apply the events the host owns
//!                 (ReachedGround → death, Attack → victim).
//! ```
//!
//! Commands issued between ticks (`move_*`, `spawn`, `remove`) run
//! generators immediately, stamped with [`Sim::now_ms`], the time of the
//! last processed tick.  Their broadcasts go out with the next tick's
//! deliveries, or on an explicit [`Sim::flush`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mv_agent::AgentBuilder;
//! use mv_core::{AgentId, SimConfig, Vec3};
//! use mv_path::DirectPlanner;
//! use mv_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), DirectPlanner::new())
//!     .agent(AgentBuilder::new(Vec3::ZERO))
//!     .agent(AgentBuilder::new(Vec3::new(30.0, 0.0, 0.0)))
//!     .build()?;
//! sim.move_chase(AgentId(0), AgentId(1), 0.0, 0.0)?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
