//! Grid-subsystem error type.

use thiserror::Error;

use pursuit_core::TileId;

/// Errors produced by `pursuit-grid`.
///
/// An unreachable goal is *not* an error: searches return an empty
/// [`Route`](crate::Route) and the caller retries later.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("tile {tile} not found in map of {tile_count} tiles")]
    TileNotFound { tile: TileId, tile_count: usize },
}

pub type GridResult<T> = Result<T, GridError>;
