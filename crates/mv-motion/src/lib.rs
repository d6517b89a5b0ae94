//! `mv-motion`: per-agent motion strategies and the stack that runs them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`generator`] | `MotionGenerator` trait, `MotionKind`, `GeneratorState`         |
//! | [`context`]   | `MotionContext`, `Outbox`, `MotionEvent`, `FollowUp`            |
//! | [`wander`]    | `WanderGenerator`: confused roaming around an anchor           |
//! | [`point`]     | `PointGenerator`, `AssistSeekGenerator`                         |
//! | [`distract`]  | `AssistDistractGenerator`: timed pause                         |
//! | [`pursuit`]   | `PursuitGenerator`: chase and formation follow                 |
//! | [`contact`]   | melee range and contact-point geometry                          |
//! | [`master`]    | `MotionMaster`: the per-agent generator stack                  |
//!
//! # Tick contract
//!
//! The host calls [`MotionMaster::update`] once per tick per agent with the
//! elapsed milliseconds.  Generators never block: each does at most one
//! synchronous path request per tick and reports completion by returning
//! `false` from `update`.  Everything a generator produces besides its own
//! agent's state goes into the [`Outbox`]: trajectory broadcasts, completion
//! events, and follow-up generator requests.

pub mod contact;
pub mod context;
pub mod distract;
pub mod generator;
pub mod master;
pub mod point;
pub mod pursuit;
pub mod wander;


pub use context::{FollowUp, MotionContext, MotionEvent, Outbox};
pub use distract::AssistDistractGenerator;
pub use generator::{GeneratorState, MotionGenerator, MotionKind};
pub use master::MotionMaster;
pub use point::{AssistSeekGenerator, PointGenerator, EVENT_ASSIST_MOVE, EVENT_FALL_GROUND};
pub use pursuit::{PursuitGenerator, PursuitKind};
pub use wander::WanderGenerator;
