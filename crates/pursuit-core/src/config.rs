//! Engine configuration.
//!
//! Typically constructed with `..Default::default()` overrides by the
//! application, or deserialized from a file when the `serde` feature is on.
//! Call [`SimConfig::validate`] before handing a config to the scheduler.

use crate::{CoreError, CoreResult};

// ── SearchConfig ──────────────────────────────────────────────────────────────

/// Cost constants shared by every search the `PathFinder` runs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Cost of one step between adjacent tiles.  Also scales the Manhattan
    /// heuristic, which keeps it admissible.  Default: 10.
    pub step_cost: u32,

    /// Surcharge added to a step whose destination tile lies within
    /// `evasion_radius` of another agent.  Default: 30.
    pub evasion_penalty: u32,

    /// World-space radius around each other agent inside which tiles are
    /// penalised (strict `<`).  Default: 5.0.
    pub evasion_radius: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_cost:       10,
            evasion_penalty: 30,
            evasion_radius:  5.0,
        }
    }
}

// ── AgentConfig ───────────────────────────────────────────────────────────────

/// Per-agent motion and perception parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Movement speed in world units per second.  Default: 1.0.
    pub speed: f32,

    /// Target detection range in world units (strict `<`).  Default: 5.0.
    pub vision_distance: f32,

    /// Length of each random-walk route requested while idle.  Default: 20.
    pub random_walk_steps: usize,

    /// Distance from the target, on the agent's own side of it, at which
    /// the flee-then-ambush policy repositions.  Default: 2.0.
    pub flee_offset: f32,

    /// Distance at which a tile counts as reached.  Default: 0.05.
    pub arrive_epsilon: f32,

    /// Chase with the evasion search so pursuers spread out instead of
    /// stacking onto the same tiles.  Default: `false`.
    pub evade_agents: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed:             1.0,
            vision_distance:   5.0,
            random_walk_steps: 20,
            flee_offset:       2.0,
            arrive_epsilon:    0.05,
            evade_agents:      false,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level scheduler configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed and inputs always produce identical
    /// agent behaviour.
    pub seed: u64,

    /// Upper bound on random tile draws when respawning an agent.  A map
    /// with no walkable tile fails after this many draws instead of looping
    /// forever.  Default: 1024.
    pub max_spawn_attempts: u32,

    pub search: SearchConfig,

    /// Defaults applied to agents that are not given their own config.
    pub agent: AgentConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:               0,
            max_spawn_attempts: 1024,
            search:             SearchConfig::default(),
            agent:              AgentConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject values that would break search or motion invariants.
    pub fn validate(&self) -> CoreResult<()> {
        self.search.validate()?;
        self.agent.validate()?;
        if self.max_spawn_attempts == 0 {
            return Err(CoreError::Config("max_spawn_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

impl SearchConfig {
    /// The closed-set simplification needs strictly positive step costs.
    pub fn validate(&self) -> CoreResult<()> {
        if self.step_cost == 0 {
            return Err(CoreError::Config("step_cost must be positive".into()));
        }
        if !(self.evasion_radius.is_finite() && self.evasion_radius >= 0.0) {
            return Err(CoreError::Config(format!(
                "evasion_radius must be finite and non-negative, got {}",
                self.evasion_radius
            )));
        }
        Ok(())
    }
}

impl AgentConfig {
    pub fn validate(&self) -> CoreResult<()> {
        let finite_non_negative = [
            ("speed", self.speed),
            ("vision_distance", self.vision_distance),
            ("flee_offset", self.flee_offset),
        ];
        for (name, value) in finite_non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CoreError::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(self.arrive_epsilon.is_finite() && self.arrive_epsilon > 0.0) {
            return Err(CoreError::Config(format!(
                "arrive_epsilon must be positive, got {}",
                self.arrive_epsilon
            )));
        }
        Ok(())
    }
}
