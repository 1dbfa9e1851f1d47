//! Read-only state passed to every agent update.

use pursuit_core::{AgentId, TileId, WorldPos};
use pursuit_grid::{PathFinder, TileMap};

/// What agents know about the tracked target.
///
/// Owned by the target collaborator; agents only read it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetView {
    pub position: WorldPos,
    /// Tile the target currently occupies.  Chasers path to this tile.
    pub tile: TileId,
    pub goal_reached: bool,
    pub eliminated: bool,
}

impl TargetView {
    pub fn new(position: WorldPos, tile: TileId) -> Self {
        Self { position, tile, goal_reached: false, eliminated: false }
    }

    /// Agents act only while this is `true`.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.goal_reached && !self.eliminated
    }
}

/// Position of one agent at the start of the tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id:       AgentId,
    pub position: WorldPos,
}

/// A read-only snapshot of everything an agent may consult during
/// [`Agent::update`](crate::Agent::update).
///
/// Built once per tick by the scheduler and shared (immutably) by every
/// agent.  Positions in `agents` are sampled before any agent moves, so the
/// update order never changes what an agent sees.
pub struct TickContext<'a> {
    /// Elapsed time since the previous tick, in seconds.
    pub dt: f32,
    pub map: &'a TileMap,
    pub pathfinder: &'a PathFinder,
    pub target: &'a TargetView,
    pub agents: &'a [AgentSnapshot],
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(
        dt:         f32,
        map:        &'a TileMap,
        pathfinder: &'a PathFinder,
        target:     &'a TargetView,
        agents:     &'a [AgentSnapshot],
    ) -> Self {
        Self { dt, map, pathfinder, target, agents }
    }

    /// Positions of every agent except `me`: the evasion context.
    pub fn other_positions(&self, me: AgentId) -> Vec<WorldPos> {
        self.agents
            .iter()
            .filter(|s| s.id != me)
            .map(|s| s.position)
            .collect()
    }
}
