//! `pursuit-behavior`: per-agent behavior state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`policy`]  | `BehaviorPolicy`: which transition table an agent follows      |
//! | [`state`]   | `AgentState` (`Idle`/`Moving`/`Chasing`), `Transition`          |
//! | [`context`] | `TickContext<'a>`, `TargetView`, `AgentSnapshot`                |
//! | [`agent`]   | `Agent`: owns its route, position, RNG; `update` and `reset`   |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Tick model
//!
//! The scheduler builds one immutable [`TickContext`] per tick (elapsed
//! time, map, path finder, target, snapshot of every agent's position) and
//! calls [`Agent::update`] on each agent.  An agent mutates only itself, so
//! agents can be updated in any order, or in parallel, with identical
//! results.
//!
//! Shared primitives (`Idle` route consumption, `Moving` steering,
//! `Chasing` re-planning) live once on [`Agent`]; the policy only decides
//! when to enter `Chasing` and where an arrival leads.

pub mod agent;
pub mod context;
pub mod error;
pub mod policy;
pub mod state;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use context::{AgentSnapshot, TargetView, TickContext};
pub use error::{BehaviorError, BehaviorResult};
pub use policy::BehaviorPolicy;
pub use state::{AgentState, Transition};
