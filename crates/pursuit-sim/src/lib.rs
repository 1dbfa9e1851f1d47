//! `pursuit-sim`: tick scheduler for the pursuit engine.
//!
//! # Tick loop
//!
//! ```text
//! step(dt):
//!   ① Precondition: a target must have been supplied (else TargetMissing).
//!   ② Guard:        map destroyed, or target reached its goal / eliminated
//!                    → no agent is touched this tick.
//!   ③ Snapshot:     every agent's position, read before anyone moves.
//!   ④ Update:       Agent::update for each agent (parallel with the
//!                    `parallel` feature).
//!   ⑤ Report:       transitions handed to the observer in AgentId order.
//!   ⑥ Clock:        advance one tick of `dt` seconds.
//! ```
//!
//! # Map epochs
//!
//! Tile ids are only valid for the map that issued them.
//! [`Sim::replace_map`] starts a new epoch: every agent's route is dropped
//! and every agent respawns on the new map.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the update phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pursuit_behavior::{BehaviorPolicy, TargetView};
//! use pursuit_core::SimConfig;
//! use pursuit_grid::TileMapBuilder;
//! use pursuit_sim::{NoopObserver, SimBuilder};
//!
//! let map = TileMapBuilder::grid(20, 20, 1.0, |_| true);
//! let mut sim = SimBuilder::new(SimConfig::default(), map)
//!     .agent(BehaviorPolicy::DetectThenChase)
//!     .target(target_view)
//!     .build()?;
//! sim.step(1.0 / 60.0, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
