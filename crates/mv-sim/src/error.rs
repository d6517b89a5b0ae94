use mv_core::{AgentId, MvError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] MvError),

    #[error("agent {0} cannot pursue itself")]
    SelfTarget(AgentId),
}

pub type SimResult<T> = Result<T, SimError>;
