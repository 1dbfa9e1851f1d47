//! The per-agent state machine.

use pursuit_core::{AgentConfig, AgentId, AgentRng, TileId, WorldPos};
use pursuit_grid::{Route, TileMap};

use crate::{AgentState, BehaviorError, BehaviorPolicy, BehaviorResult, TickContext, Transition};

/// One autonomous agent: its policy, motion state, route, and RNG.
///
/// Mutated only by its own [`update`](Self::update) and
/// [`reset`](Self::reset); never shared between agents.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:     AgentId,
    pub policy: BehaviorPolicy,
    pub config: AgentConfig,
    pub state:  AgentState,

    /// Remaining tiles to walk.  Drained head-first; refilled by a new
    /// search once empty.
    pub route: Route,

    /// Tile the agent last stood on.  `INVALID` until placed.
    pub current_tile: TileId,

    /// Tile the agent is steering toward while `Moving`.
    pub target_tile: Option<TileId>,

    pub position: WorldPos,

    rng: AgentRng,
}

impl Agent {
    /// Create an unplaced agent.  Call [`place`](Self::place) or
    /// [`reset`](Self::reset) before the first update.
    pub fn new(id: AgentId, policy: BehaviorPolicy, config: AgentConfig, rng: AgentRng) -> Self {
        Self {
            id,
            policy,
            config,
            state: policy.initial_state(),
            route: Route::empty(),
            current_tile: TileId::INVALID,
            target_tile: None,
            position: WorldPos::ZERO,
            rng,
        }
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.current_tile.is_valid()
    }

    /// Diagnostic colour for the current state.
    #[inline]
    pub fn label_color(&self) -> &'static str {
        self.policy.label_color(self.state)
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Teleport onto `tile`, dropping any route in flight.  Walls are
    /// rejected with [`BehaviorError::Unwalkable`].
    pub fn place(&mut self, map: &TileMap, tile: TileId) -> BehaviorResult<()> {
        map.check(tile)?;
        if !map.is_walkable(tile) {
            return Err(BehaviorError::Unwalkable(tile));
        }
        self.current_tile = tile;
        self.position = map.position(tile);
        self.route.clear();
        self.target_tile = None;
        Ok(())
    }

    /// Respawn: clear the route, return to the policy's initial state, and
    /// relocate to a uniformly sampled walkable tile.
    ///
    /// Samples at most `max_attempts` tiles; a map without walkable tiles
    /// fails with [`BehaviorError::NoWalkableTile`] instead of looping, and
    /// leaves the agent unplaced.
    pub fn reset(&mut self, map: &TileMap, max_attempts: u32) -> BehaviorResult<TileId> {
        self.route.clear();
        self.target_tile = None;
        self.state = self.policy.initial_state();
        self.current_tile = TileId::INVALID;

        let tile = self.sample_walkable_tile(map, max_attempts)?;
        self.place(map, tile)?;
        tracing::info!(agent = %self.id, %tile, position = %self.position, "agent respawned");
        Ok(tile)
    }

    fn sample_walkable_tile(&mut self, map: &TileMap, max_attempts: u32) -> BehaviorResult<TileId> {
        if map.is_empty() {
            return Err(BehaviorError::NoWalkableTile { attempts: 0 });
        }
        for _ in 0..max_attempts {
            let tile = TileId::from_index(self.rng.gen_range(0..map.tile_count()));
            if map.is_walkable(tile) {
                return Ok(tile);
            }
        }
        Err(BehaviorError::NoWalkableTile { attempts: max_attempts })
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the state machine by one tick.
    ///
    /// Returns the transition taken, if the state changed.  Does nothing
    /// while the target is inactive (goal reached or eliminated).
    pub fn update(&mut self, ctx: &TickContext<'_>) -> BehaviorResult<Option<Transition>> {
        if !ctx.target.is_active() {
            return Ok(None);
        }
        if !self.is_placed() {
            return Err(BehaviorError::NotPlaced(self.id));
        }

        let from = self.state;
        let to = match from {
            AgentState::Idle    => self.tick_idle(ctx)?,
            AgentState::Moving  => self.tick_moving(ctx),
            AgentState::Chasing => self.tick_chasing(ctx)?,
        };
        self.state = to;

        if from == to {
            return Ok(None);
        }
        tracing::debug!(
            agent = %self.id,
            policy = %self.policy,
            %from,
            %to,
            tile = %self.current_tile,
            remaining = self.route.len(),
            "state transition"
        );
        Ok(Some(Transition { agent: self.id, from, to }))
    }

    fn tick_idle(&mut self, ctx: &TickContext<'_>) -> BehaviorResult<AgentState> {
        match self.policy {
            BehaviorPolicy::Wander => self.wander(ctx),
            BehaviorPolicy::DetectThenChase => {
                if self.sees_target(ctx) {
                    Ok(AgentState::Chasing)
                } else {
                    self.wander(ctx)
                }
            }
            BehaviorPolicy::FleeThenAmbush => {
                if self.sees_target(ctx) && self.route.is_empty() {
                    self.reposition(ctx)?;
                }
                self.wander(ctx)
            }
        }
    }

    /// Keep walking the current route, requesting a random walk once it is
    /// drained.
    fn wander(&mut self, ctx: &TickContext<'_>) -> BehaviorResult<AgentState> {
        if self.route.is_empty() {
            self.route = ctx.pathfinder.random_walk(
                ctx.map,
                self.current_tile,
                self.config.random_walk_steps,
                &mut self.rng,
            )?;
        }
        Ok(self.take_next_tile().unwrap_or(AgentState::Idle))
    }

    /// Route to the tile `flee_offset` units from the target on this agent's
    /// side of it.
    fn reposition(&mut self, ctx: &TickContext<'_>) -> BehaviorResult<()> {
        let away = (self.position - ctx.target.position).normalized();
        let point = ctx.target.position + away * self.config.flee_offset;
        if let Some(tile) = ctx.map.nearest_walkable_tile(point) {
            self.route = self.plan_route(ctx, tile)?;
            tracing::debug!(agent = %self.id, %point, %tile, len = self.route.len(), "repositioning");
        }
        Ok(())
    }

    fn tick_moving(&mut self, ctx: &TickContext<'_>) -> AgentState {
        let Some(target) = self.target_tile else {
            return self.policy.initial_state();
        };
        let dest = ctx.map.position(target);
        let max_step = self.config.speed * ctx.dt.max(0.0);
        self.position = self.position.step_toward(dest, max_step);

        if self.position.distance(dest) <= self.config.arrive_epsilon {
            self.current_tile = target;
            self.position = dest;
            self.target_tile = None;
            self.policy.state_after_arrival()
        } else {
            AgentState::Moving
        }
    }

    /// Fresh route to the target's current tile every time; the target moves.
    fn tick_chasing(&mut self, ctx: &TickContext<'_>) -> BehaviorResult<AgentState> {
        self.route = self.plan_route(ctx, ctx.target.tile)?;
        if self.route.is_empty() {
            tracing::trace!(agent = %self.id, goal = %ctx.target.tile, "no chase route this tick");
        }
        Ok(self.take_next_tile().unwrap_or(AgentState::Chasing))
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    #[inline]
    fn sees_target(&self, ctx: &TickContext<'_>) -> bool {
        self.position.distance(ctx.target.position) < self.config.vision_distance
    }

    fn plan_route(&self, ctx: &TickContext<'_>, goal: TileId) -> BehaviorResult<Route> {
        let route = if self.config.evade_agents {
            let others = ctx.other_positions(self.id);
            ctx.pathfinder.find_path_avoiding(ctx.map, self.current_tile, goal, &others)?
        } else {
            ctx.pathfinder.find_path(ctx.map, self.current_tile, goal)?
        };
        Ok(route)
    }

    /// Pop the route head as the motion target.  `Some(Moving)` on success.
    fn take_next_tile(&mut self) -> Option<AgentState> {
        let next = self.route.pop_next()?;
        self.target_tile = Some(next);
        Some(AgentState::Moving)
    }
}
