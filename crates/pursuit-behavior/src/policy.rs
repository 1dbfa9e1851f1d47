//! Behavior policies: the per-agent transition table.
//!
//! | Policy            | Idle                                   | Enter `Chasing`          | After arriving at a tile |
//! |-------------------|----------------------------------------|--------------------------|--------------------------|
//! | `Wander`          | random walk                            | never                    | `Idle`                   |
//! | `DetectThenChase` | random walk                            | target within vision     | `Idle`                   |
//! | `FleeThenAmbush`  | random walk, or reposition near target | after any arrival        | `Chasing`                |

use std::fmt;

use crate::AgentState;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorPolicy {
    /// Random walking only.
    #[default]
    Wander,
    /// Random walk until the target is within vision, then pursue it.
    DetectThenChase,
    /// Reposition onto the target's near side when it is seen, then pursue.
    FleeThenAmbush,
}

impl BehaviorPolicy {
    /// State an agent starts in, and returns to on respawn.
    #[inline]
    pub fn initial_state(self) -> AgentState {
        AgentState::Idle
    }

    /// State entered once the agent reaches the tile it was moving to.
    #[inline]
    pub fn state_after_arrival(self) -> AgentState {
        match self {
            BehaviorPolicy::Wander | BehaviorPolicy::DetectThenChase => AgentState::Idle,
            BehaviorPolicy::FleeThenAmbush => AgentState::Chasing,
        }
    }

    /// Tint for an agent of this policy in `state`.  Diagnostic only.
    pub fn label_color(self, state: AgentState) -> &'static str {
        match (self, state) {
            (BehaviorPolicy::Wander, _) => "white",
            (BehaviorPolicy::DetectThenChase, AgentState::Chasing) => "blue",
            (BehaviorPolicy::DetectThenChase, _) => "red",
            (BehaviorPolicy::FleeThenAmbush, AgentState::Chasing) => "black",
            (BehaviorPolicy::FleeThenAmbush, _) => "yellow",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorPolicy::Wander          => "wander",
            BehaviorPolicy::DetectThenChase => "detect-then-chase",
            BehaviorPolicy::FleeThenAmbush  => "flee-then-ambush",
        }
    }
}

impl fmt::Display for BehaviorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
