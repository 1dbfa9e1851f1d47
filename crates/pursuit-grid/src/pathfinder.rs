//! A* search, the enemy-avoidance variant, and the random-walk generator.
//!
//! # Cost model
//!
//! Every step between adjacent tiles costs `SearchConfig::step_cost` (10).
//! The heuristic is `step_cost * manhattan(tile, goal)`, admissible and
//! consistent for a 4-connected grid.  Costs are integers so frontier
//! ordering is exact.
//!
//! The per-step cost is supplied by a [`StepCost`] implementation, so the
//! plain search and the evasion search share one loop.  Penalties only ever
//! add cost, which keeps the heuristic consistent and makes the closed-set
//! rule (a settled tile is never reopened) safe.
//!
//! # Frontier ordering
//!
//! The frontier is a `BinaryHeap` keyed by `(priority, sequence)`:
//! lowest `cost_so_far + heuristic` first, equal priorities resolved
//! first-in-first-out by the order entries were pushed.  Decrease-key is
//! lazy: a cheaper route to a frontier tile pushes a fresh entry and the
//! stale one is discarded when popped, because the tile is settled by then.
//!
//! # Scratch state
//!
//! All bookkeeping (`cost_so_far`, `came_from`, `settled`, the heap) is local
//! to one call.  A single `PathFinder` can therefore be shared by reference
//! across agents and threads.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use pursuit_core::{AgentRng, SearchConfig, TileId, WorldPos};

use crate::{GridResult, Route, TileMap};

// ── StepCost trait ────────────────────────────────────────────────────────────

/// Cost of moving from `from` onto the adjacent tile `to`.
///
/// Implementations must return at least 1 for every step; the search relies
/// on strictly positive costs.
pub trait StepCost {
    fn step_cost(&self, map: &TileMap, from: TileId, to: TileId) -> u32;
}

/// Every step costs the same.
#[derive(Copy, Clone, Debug)]
pub struct UniformCost {
    pub step: u32,
}

impl StepCost for UniformCost {
    #[inline]
    fn step_cost(&self, _map: &TileMap, _from: TileId, _to: TileId) -> u32 {
        self.step
    }
}

/// Uniform step cost plus a surcharge when the destination tile lies within
/// `radius` of any position in `threats`.
///
/// The surcharge biases routes away from other agents but never forbids a
/// tile: if every alternative is dearer the agent still walks through.
#[derive(Copy, Clone, Debug)]
pub struct EvasionCost<'a> {
    pub step:    u32,
    pub penalty: u32,
    pub radius:  f32,
    pub threats: &'a [WorldPos],
}

impl EvasionCost<'_> {
    /// `true` if `tile` is strictly inside the radius of some threat.
    pub fn is_threatened(&self, map: &TileMap, tile: TileId) -> bool {
        let pos = map.position(tile);
        self.threats.iter().any(|&t| pos.within(t, self.radius))
    }
}

impl StepCost for EvasionCost<'_> {
    #[inline]
    fn step_cost(&self, map: &TileMap, _from: TileId, to: TileId) -> u32 {
        if self.is_threatened(map, to) {
            self.step.saturating_add(self.penalty)
        } else {
            self.step
        }
    }
}

// ── PathFinder ────────────────────────────────────────────────────────────────

/// Stateless path-finding service.
///
/// Holds only its cost constants; every call builds fresh search state.
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    config: SearchConfig,
}

impl PathFinder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Admissible estimate of the cost from `tile` to `goal`.
    #[inline]
    pub fn heuristic(&self, map: &TileMap, tile: TileId, goal: TileId) -> u32 {
        self.config.step_cost * map.coord(tile).manhattan(map.coord(goal))
    }

    /// Plain A* from `start` to `goal`.
    ///
    /// Returns an empty route when `goal` is unreachable or equals `start`.
    pub fn find_path(&self, map: &TileMap, start: TileId, goal: TileId) -> GridResult<Route> {
        let cost = UniformCost { step: self.config.step_cost };
        self.search(map, start, goal, &cost)
    }

    /// A* that penalises tiles near any position in `others`.
    ///
    /// With an empty `others` the result is identical to
    /// [`find_path`](Self::find_path).
    pub fn find_path_avoiding(
        &self,
        map:    &TileMap,
        start:  TileId,
        goal:   TileId,
        others: &[WorldPos],
    ) -> GridResult<Route> {
        let cost = EvasionCost {
            step:    self.config.step_cost,
            penalty: self.config.evasion_penalty,
            radius:  self.config.evasion_radius,
            threats: others,
        };
        self.search(map, start, goal, &cost)
    }

    /// A* with a caller-supplied cost model.
    pub fn search<C: StepCost>(
        &self,
        map:   &TileMap,
        start: TileId,
        goal:  TileId,
        cost:  &C,
    ) -> GridResult<Route> {
        map.check(start)?;
        map.check(goal)?;

        let n = map.tile_count();
        let mut cost_so_far = vec![u32::MAX; n];
        let mut came_from   = vec![TileId::INVALID; n];
        let mut settled     = vec![false; n];

        // Min-heap on (priority, push sequence).
        let mut frontier: BinaryHeap<Reverse<(u32, u64, TileId)>> = BinaryHeap::new();
        let mut seq: u64 = 0;

        cost_so_far[start.index()] = 0;
        frontier.push(Reverse((self.heuristic(map, start, goal), seq, start)));

        let mut expanded = 0usize;
        while let Some(Reverse((_, _, tile))) = frontier.pop() {
            if settled[tile.index()] {
                continue; // stale entry
            }
            settled[tile.index()] = true;
            expanded += 1;

            if tile == goal {
                let route = reconstruct(&came_from, goal, cost_so_far[goal.index()]);
                tracing::trace!(%start, %goal, expanded, cost = route.cost, len = route.len(), "path found");
                return Ok(route);
            }

            let g = cost_so_far[tile.index()];
            for &next in map.neighbors(tile) {
                if settled[next.index()] {
                    continue;
                }
                let new_cost = g.saturating_add(cost.step_cost(map, tile, next));
                if new_cost < cost_so_far[next.index()] {
                    cost_so_far[next.index()] = new_cost;
                    came_from[next.index()] = tile;
                    seq += 1;
                    let priority = new_cost.saturating_add(self.heuristic(map, next, goal));
                    frontier.push(Reverse((priority, seq, next)));
                }
            }
        }

        tracing::trace!(%start, %goal, expanded, "goal unreachable");
        Ok(Route::empty())
    }

    /// Random walk of up to `max_steps` tiles starting next to `start`.
    ///
    /// Each step picks uniformly among the current tile's neighbours,
    /// excluding the tile just left whenever another neighbour exists.  The
    /// walk stops early on a tile with no neighbours.  Route cost is
    /// `step_cost` per tile.
    pub fn random_walk(
        &self,
        map:       &TileMap,
        start:     TileId,
        max_steps: usize,
        rng:       &mut AgentRng,
    ) -> GridResult<Route> {
        map.check(start)?;

        let mut tiles = VecDeque::new();
        let mut candidates: Vec<TileId> = Vec::new();
        let mut previous: Option<TileId> = None;
        let mut current = start;

        for _ in 0..max_steps {
            let neighbors = map.neighbors(current);
            if neighbors.is_empty() {
                break;
            }
            candidates.clear();
            candidates.extend_from_slice(neighbors);
            rng.shuffle(&mut candidates);

            let pick = candidates
                .iter()
                .copied()
                .find(|&t| Some(t) != previous)
                .or_else(|| candidates.first().copied());
            let Some(next) = pick else { break };

            tiles.push_back(next);
            previous = Some(current);
            current = next;
        }

        let cost = self.config.step_cost.saturating_mul(tiles.len() as u32);
        Ok(Route { tiles, cost })
    }
}

/// Walk `came_from` back from `goal` and reverse.  The start tile (whose
/// predecessor is `INVALID`) is excluded.
fn reconstruct(came_from: &[TileId], goal: TileId, cost: u32) -> Route {
    let mut tiles = VecDeque::new();
    let mut cur = goal;
    while came_from[cur.index()].is_valid() {
        tiles.push_front(cur);
        cur = came_from[cur.index()];
    }
    Route { tiles, cost }
}
