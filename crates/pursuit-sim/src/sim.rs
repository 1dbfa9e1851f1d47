//! The `Sim` struct and its tick loop.

use pursuit_behavior::{Agent, AgentSnapshot, BehaviorResult, TargetView, TickContext, Transition};
use pursuit_core::{AgentId, SimClock, SimConfig, TileId};
use pursuit_grid::{PathFinder, TileMap};

use crate::{SimError, SimObserver, SimResult};

/// The scheduler: owns the map, the path finder, and every agent, and
/// advances them once per [`step`](Self::step).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    pub clock: SimClock,

    /// Current map.  Replace only through [`replace_map`](Self::replace_map)
    /// so agents never hold tile ids from a previous map.
    pub map: TileMap,

    /// Shared, stateless between calls.
    pub pathfinder: PathFinder,

    /// Agents indexed by `AgentId`.
    pub agents: Vec<Agent>,

    /// Incremented by every `replace_map`.
    pub epoch: u64,

    target: Option<TargetView>,

    map_destroyed: bool,
}

impl Sim {
    pub(crate) fn from_parts(
        config:     SimConfig,
        map:        TileMap,
        pathfinder: PathFinder,
        agents:     Vec<Agent>,
        target:     Option<TargetView>,
    ) -> Self {
        Self {
            config,
            clock: SimClock::new(),
            map,
            pathfinder,
            agents,
            epoch: 0,
            target,
            map_destroyed: false,
        }
    }

    // ── Collaborator inputs ───────────────────────────────────────────────

    /// Publish the target's latest position, tile, and status.  Call before
    /// every `step` when the target moves.
    pub fn set_target(&mut self, target: TargetView) {
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<&TargetView> {
        self.target.as_ref()
    }

    /// Freeze every agent until the next [`replace_map`](Self::replace_map).
    pub fn destroy_map(&mut self) {
        self.map_destroyed = true;
        tracing::info!(epoch = self.epoch, "map destroyed; agents frozen");
    }

    pub fn is_map_destroyed(&self) -> bool {
        self.map_destroyed
    }

    /// Swap in a regenerated map.
    ///
    /// Starts a new epoch: every in-flight route is discarded and every
    /// agent respawns on a random walkable tile of `map`.  The target must
    /// be re-published with a tile from the new map.
    ///
    /// If any respawn fails the map stays marked destroyed, so agents stay
    /// frozen instead of ticking on tile ids from the previous map.
    pub fn replace_map(&mut self, map: TileMap) -> SimResult<()> {
        self.map = map;
        self.map_destroyed = true;
        self.epoch += 1;
        tracing::info!(epoch = self.epoch, tiles = self.map.tile_count(), "map replaced");
        self.respawn_all()?;
        self.map_destroyed = false;
        Ok(())
    }

    // ── Agent access ──────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> SimResult<&Agent> {
        self.agents.get(id.index()).ok_or(SimError::AgentNotFound(id))
    }

    /// Position of every agent, in `AgentId` order.
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents
            .iter()
            .map(|a| AgentSnapshot { id: a.id, position: a.position })
            .collect()
    }

    /// Respawn one agent on a random walkable tile.
    pub fn respawn(&mut self, id: AgentId) -> SimResult<TileId> {
        let max_attempts = self.config.max_spawn_attempts;
        let agent = self.agents.get_mut(id.index()).ok_or(SimError::AgentNotFound(id))?;
        Ok(agent.reset(&self.map, max_attempts)?)
    }

    pub fn respawn_all(&mut self) -> SimResult<()> {
        let max_attempts = self.config.max_spawn_attempts;
        for agent in &mut self.agents {
            agent.reset(&self.map, max_attempts)?;
        }
        Ok(())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance every agent by one tick of `dt` seconds.
    ///
    /// Returns the number of agents whose state machine ran: 0 while the map
    /// is destroyed or the target is inactive.
    ///
    /// # Errors
    ///
    /// [`SimError::TargetMissing`] if no target has been set;
    /// [`SimError::Behavior`] if an agent's update fails (unplaced agent,
    /// tile id foreign to the current map).  Such a tick is partial: every
    /// other agent has already been updated and its transition is still
    /// reported, but `on_tick_end` is skipped and the clock does not advance.
    pub fn step<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> SimResult<usize> {
        let target = self.target.ok_or(SimError::TargetMissing)?;
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let updated = if self.map_destroyed || !target.is_active() {
            0
        } else {
            let snapshots = self.snapshots();
            let mut first_err = None;
            for result in self.update_agents(dt, &target, &snapshots) {
                match result {
                    Ok(Some(tr)) => {
                        let color = self.agents[tr.agent.index()].label_color();
                        observer.on_transition(now, tr, color);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        if first_err.is_none() {
                            first_err = Some(e);
                        }
                    }
                }
            }
            if let Some(e) = first_err {
                return Err(e.into());
            }
            self.agents.len()
        };

        observer.on_tick_end(now, updated);
        self.clock.advance(dt);
        Ok(updated)
    }

    /// Run `n` ticks of `dt` seconds each.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, dt: f32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(dt, observer)?;
        }
        Ok(())
    }

    /// Update phase.  One result per agent, in ascending `AgentId` order
    /// regardless of the `parallel` feature.
    fn update_agents(
        &mut self,
        dt:        f32,
        target:    &TargetView,
        snapshots: &[AgentSnapshot],
    ) -> Vec<BehaviorResult<Option<Transition>>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = TickContext::new(dt, &self.map, &self.pathfinder, target, snapshots);
        let agents = &mut self.agents;

        #[cfg(not(feature = "parallel"))]
        let results: Vec<BehaviorResult<Option<Transition>>> =
            agents.iter_mut().map(|a| a.update(&ctx)).collect();

        #[cfg(feature = "parallel")]
        let results: Vec<BehaviorResult<Option<Transition>>> = {
            use rayon::prelude::*;
            agents.par_iter_mut().map(|a| a.update(&ctx)).collect()
        };

        results
    }
}
