//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into `MvError`
//! via `From` impls, or keep them separate and wrap `MvError` as one variant.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `mv-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MvError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {0} is no longer in the world")]
    NotInWorld(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `mv-*` crates.
pub type MvResult<T> = Result<T, MvError>;
