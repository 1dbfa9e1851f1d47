//! `pursuit-grid`: tile graph, spatial lookup, and path finding.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`map`]        | `TileMap` (CSR adjacency + R-tree), `TileMapBuilder`        |
//! | [`route`]      | `Route`: tile queue consumed head-first by agents          |
//! | [`pathfinder`] | `PathFinder`, `StepCost`, `UniformCost`, `EvasionCost`      |
//! | [`error`]      | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod map;
pub mod pathfinder;
pub mod route;


pub use error::{GridError, GridResult};
pub use map::{TileMap, TileMapBuilder};
pub use pathfinder::{EvasionCost, PathFinder, StepCost, UniformCost};
pub use route::Route;
