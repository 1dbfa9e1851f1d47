//! The `Route` type returned by every search.

use std::collections::VecDeque;

use pursuit_core::TileId;

/// Ordered tiles from (excluding) the start to (including) the goal, plus the
/// accumulated step cost.
///
/// Agents drain a route head-first with [`pop_next`](Self::pop_next); once it
/// is empty a new search must be issued.  An empty route straight out of a
/// search means "no progress possible right now" (unreachable goal, start
/// equals goal, or a zero-length walk).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub tiles: VecDeque<TileId>,
    /// Sum of step costs (including any evasion penalties) along `tiles`.
    pub cost: u32,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remove and return the head tile.
    #[inline]
    pub fn pop_next(&mut self) -> Option<TileId> {
        self.tiles.pop_front()
    }

    #[inline]
    pub fn peek_next(&self) -> Option<TileId> {
        self.tiles.front().copied()
    }

    /// Final tile of the route, if any.
    pub fn destination(&self) -> Option<TileId> {
        self.tiles.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().copied()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.cost = 0;
    }
}
