use pursuit_behavior::BehaviorError;
use pursuit_core::{AgentId, CoreError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    /// Agents were ticked before the target collaborator supplied a target.
    #[error("no target has been set; call set_target before stepping")]
    TargetMissing,

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
