//! `pursuit-core`: foundational types for the grid pursuit engine.
//!
//! This crate is a dependency of every other `pursuit-*` crate.  It has no
//! `pursuit-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TileId`                                   |
//! | [`geo`]         | `GridCoord` (Manhattan), `WorldPos` (Euclidean)       |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `AgentRng` (per-agent, deterministic)                 |
//! | [`config`]      | `SearchConfig`, `AgentConfig`, `SimConfig`            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AgentConfig, SearchConfig, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{GridCoord, WorldPos};
pub use ids::{AgentId, TileId};
pub use rng::AgentRng;
pub use time::{SimClock, Tick};
