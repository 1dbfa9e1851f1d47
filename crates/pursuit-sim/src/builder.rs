//! Fluent builder for constructing a [`Sim`].

use pursuit_behavior::{Agent, BehaviorPolicy, TargetView};
use pursuit_core::{AgentConfig, AgentId, AgentRng, SimConfig, TileId};
use pursuit_grid::{PathFinder, TileMap};

use crate::{Sim, SimResult};

/// One agent waiting to be built.
struct AgentSpec {
    policy: BehaviorPolicy,
    config: Option<AgentConfig>,
    spawn:  Option<TileId>,
}

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, search costs, default agent parameters
/// - [`TileMap`]: the map agents spawn on
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                                  |
/// |-------------------------------|------------------------------------------|
/// | `.agent(p)`                   | none; each call adds one agent           |
/// | `.agent_at(p, tile)`          | spawns on `tile` instead of at random    |
/// | `.agent_with_config(p, c, t)` | `SimConfig::agent` for the agent config  |
/// | `.target(v)`                  | unset; `step` fails until `set_target`   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, map)
///     .agent(BehaviorPolicy::Wander)
///     .agent_at(BehaviorPolicy::DetectThenChase, spawn)
///     .target(TargetView::new(pos, tile))
///     .build()?;
/// sim.step(dt, &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    map:    TileMap,
    agents: Vec<AgentSpec>,
    target: Option<TargetView>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, map: TileMap) -> Self {
        Self { config, map, agents: Vec::new(), target: None }
    }

    /// Add an agent that spawns on a random walkable tile.
    pub fn agent(self, policy: BehaviorPolicy) -> Self {
        self.agent_with_config(policy, None, None)
    }

    /// Add an agent that spawns on `tile`.
    pub fn agent_at(self, policy: BehaviorPolicy, tile: TileId) -> Self {
        self.agent_with_config(policy, None, Some(tile))
    }

    /// Add an agent with its own parameters.  `None` falls back to
    /// `SimConfig::agent` and to a random spawn respectively.
    pub fn agent_with_config(
        mut self,
        policy: BehaviorPolicy,
        config: Option<AgentConfig>,
        spawn:  Option<TileId>,
    ) -> Self {
        self.agents.push(AgentSpec { policy, config, spawn });
        self
    }

    pub fn target(mut self, target: TargetView) -> Self {
        self.target = Some(target);
        self
    }

    /// Validate the configuration, create and place every agent, and return
    /// a ready-to-step [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        for spec in &self.agents {
            if let Some(cfg) = &spec.config {
                cfg.validate()?;
            }
        }

        // ── Create and place agents ───────────────────────────────────────
        let mut agents = Vec::with_capacity(self.agents.len());
        for (i, spec) in self.agents.into_iter().enumerate() {
            let id = AgentId::from_index(i);
            let config = spec.config.unwrap_or_else(|| self.config.agent.clone());
            let mut agent = Agent::new(id, spec.policy, config, AgentRng::new(self.config.seed, id));
            match spec.spawn {
                Some(tile) => agent.place(&self.map, tile)?,
                None => {
                    agent.reset(&self.map, self.config.max_spawn_attempts)?;
                }
            }
            agents.push(agent);
        }

        tracing::info!(
            agents = agents.len(),
            tiles = self.map.tile_count(),
            seed = self.config.seed,
            "simulation built"
        );

        let pathfinder = PathFinder::new(self.config.search.clone());
        Ok(Sim::from_parts(self.config, self.map, pathfinder, agents, self.target))
    }
}
