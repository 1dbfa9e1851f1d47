use pursuit_core::{AgentId, TileId};
use pursuit_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BehaviorError {
    /// Respawn sampling found no walkable tile.  The map is misconfigured.
    #[error("no walkable spawn tile found after {attempts} attempts")]
    NoWalkableTile { attempts: u32 },

    #[error("tile {0} is not walkable")]
    Unwalkable(TileId),

    #[error("agent {0} has not been placed on the map")]
    NotPlaced(AgentId),

    #[error("routing failed: {0}")]
    Routing(#[from] GridError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
