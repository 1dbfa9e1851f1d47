//! Discrete motion states and the transitions between them.

use std::fmt;

use pursuit_core::AgentId;

/// What an agent is doing this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// Standing on `current_tile`, deciding where to go next.
    #[default]
    Idle,
    /// Steering toward the head tile of the route.
    Moving,
    /// Re-planning a route to the target's current tile.
    Chasing,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Idle    => "idle",
            AgentState::Moving  => "moving",
            AgentState::Chasing => "chasing",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change produced by one [`Agent::update`](crate::Agent::update).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub agent: AgentId,
    pub from:  AgentState,
    pub to:    AgentState,
}
