//! chase: a small end-to-end run of the pursuit engine.
//!
//! A scripted target walks from one corner of a walled 20 × 20 grid to the
//! other while one agent of each policy hunts it.  Halfway through, the map
//! is destroyed and regenerated with a different wall layout, which starts a
//! new epoch: every agent respawns and the target re-plans on the new map.
//!
//! Set `RUST_LOG=debug` to see every state transition, `RUST_LOG=trace` for
//! individual searches.

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};

use pursuit_behavior::{AgentState, BehaviorPolicy, TargetView, Transition};
use pursuit_core::{AgentConfig, GridCoord, SimConfig, Tick, TileId, WorldPos};
use pursuit_grid::{PathFinder, Route, TileMap, TileMapBuilder};
use pursuit_sim::{SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64   = 42;
const GRID_SIZE:     u32   = 20;
const DT:            f32   = 1.0 / 60.0;
const MAX_TICKS:     u64   = 60 * 120;  // two simulated minutes
const REGEN_TICK:    u64   = 60 * 30;
const FROZEN_TICKS:  u64   = 30;        // map stays destroyed this long
const TARGET_SPEED:  f32   = 0.8;
const CATCH_RADIUS:  f32   = 0.4;

// ── Map layouts ───────────────────────────────────────────────────────────────

/// Long vertical wall with a gap at the bottom, plus a short ledge.
fn first_layout(c: GridCoord) -> bool {
    let wall = (c.x == 10 && (2..17).contains(&c.y)) || (c.y == 10 && (2..8).contains(&c.x));
    !wall
}

/// Two staggered horizontal walls.
fn second_layout(c: GridCoord) -> bool {
    let wall = (c.y == 6 && (0..15).contains(&c.x)) || (c.y == 13 && (5..20).contains(&c.x));
    !wall
}

fn build_map(layout: fn(GridCoord) -> bool) -> TileMap {
    TileMapBuilder::grid(GRID_SIZE, GRID_SIZE, 1.0, layout)
}

fn tile_at(map: &TileMap, x: i32, y: i32) -> Result<TileId> {
    map.tile_at(GridCoord::new(x, y))
        .with_context(|| format!("no tile at ({x}, {y})"))
}

// ── Scripted target ───────────────────────────────────────────────────────────

/// Walks a shortest route to `goal` at constant speed.
struct ScriptedTarget {
    position:   WorldPos,
    tile:       TileId,
    goal:       GridCoord,
    route:      Route,
    eliminated: bool,
}

impl ScriptedTarget {
    fn new(map: &TileMap, finder: &PathFinder, start: TileId, goal: GridCoord) -> Result<Self> {
        let mut t = Self {
            position:   map.position(start),
            tile:       start,
            goal,
            route:      Route::empty(),
            eliminated: false,
        };
        t.replan(map, finder)?;
        Ok(t)
    }

    /// Route from the nearest walkable tile to the goal on `map`.
    fn replan(&mut self, map: &TileMap, finder: &PathFinder) -> Result<()> {
        self.tile = map
            .nearest_walkable_tile(self.position)
            .context("map has no walkable tile for the target")?;
        self.position = map.position(self.tile);
        let goal = tile_at(map, self.goal.x, self.goal.y)?;
        self.route = finder.find_path(map, self.tile, goal)?;
        tracing::info!(from = %self.tile, %goal, len = self.route.len(), cost = self.route.cost, "target planned");
        Ok(())
    }

    fn advance(&mut self, map: &TileMap, dt: f32) {
        let Some(next) = self.route.peek_next() else { return };
        let dest = map.position(next);
        self.position = self.position.step_toward(dest, TARGET_SPEED * dt);
        if self.position.distance(dest) <= f32::EPSILON {
            self.tile = next;
            self.route.pop_next();
        }
    }

    fn goal_reached(&self, map: &TileMap) -> bool {
        self.route.is_empty() && map.coord(self.tile) == self.goal
    }

    fn view(&self, map: &TileMap) -> TargetView {
        TargetView {
            position:     self.position,
            tile:         self.tile,
            goal_reached: self.goal_reached(map),
            eliminated:   self.eliminated,
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts transitions per (policy colour, new state) and frozen ticks.
#[derive(Default)]
struct SummaryObserver {
    transitions:  BTreeMap<(&'static str, &'static str), usize>,
    frozen_ticks: usize,
}

impl SimObserver for SummaryObserver {
    fn on_transition(&mut self, tick: Tick, tr: Transition, color: &'static str) {
        *self.transitions.entry((color, tr.to.as_str())).or_default() += 1;
        if tr.to == AgentState::Chasing {
            tracing::debug!(%tick, agent = %tr.agent, color, "pursuit started");
        }
    }

    fn on_tick_end(&mut self, _tick: Tick, updated: usize) {
        if updated == 0 {
            self.frozen_ticks += 1;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== chase: pursuit engine demo ===");
    println!("Grid: {GRID_SIZE}×{GRID_SIZE}  |  Seed: {SEED}  |  dt: {DT:.4} s");
    println!();

    // 1. Map, target, and config.
    let map = build_map(first_layout);
    let start = tile_at(&map, 1, 1)?;
    let goal = GridCoord::new(18, 18);

    let config = SimConfig { seed: SEED, ..SimConfig::default() };
    let finder = PathFinder::new(config.search.clone());
    let mut target = ScriptedTarget::new(&map, &finder, start, goal)?;
    let initial_view = target.view(&map);

    // 2. One agent per policy, plus an evading chaser.
    let evader = AgentConfig { evade_agents: true, speed: 1.2, ..AgentConfig::default() };
    let mut sim = SimBuilder::new(config, map)
        .agent(BehaviorPolicy::Wander)
        .agent(BehaviorPolicy::DetectThenChase)
        .agent(BehaviorPolicy::FleeThenAmbush)
        .agent_with_config(BehaviorPolicy::DetectThenChase, Some(evader), None)
        .target(initial_view)
        .build()?;
    println!(
        "Map: {} tiles, {} links  |  Agents: {}",
        sim.map.tile_count(),
        sim.map.link_count(),
        sim.agents.len()
    );

    // 3. Run.
    let mut obs = SummaryObserver::default();
    let t0 = Instant::now();
    let mut destroyed_at = None;

    for tick in 0..MAX_TICKS {
        if tick == REGEN_TICK {
            sim.destroy_map();
            destroyed_at = Some(tick);
        }
        if destroyed_at.is_some_and(|at| tick == at + FROZEN_TICKS) {
            sim.replace_map(build_map(second_layout))?;
            target.replan(&sim.map, &sim.pathfinder)?;
            destroyed_at = None;
        }

        if !sim.is_map_destroyed() {
            target.advance(&sim.map, DT);
            target.eliminated = sim
                .agents
                .iter()
                .any(|a| a.position.distance(target.position) < CATCH_RADIUS);
        }
        let view = target.view(&sim.map);
        sim.set_target(view);
        sim.step(DT, &mut obs)?;

        if !view.is_active() {
            tracing::info!(
                tick,
                goal_reached = view.goal_reached,
                eliminated = view.eliminated,
                "target finished"
            );
            break;
        }
    }
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Finished at {} in {:.3} s", sim.clock, elapsed.as_secs_f64());
    println!(
        "Target: {}",
        if target.eliminated {
            "caught"
        } else if target.goal_reached(&sim.map) {
            "escaped"
        } else {
            "still running"
        }
    );
    println!("Epoch: {}  |  Frozen ticks: {}", sim.epoch, obs.frozen_ticks);
    println!();

    println!("{:<8} {:<10} {:>8}", "Colour", "State", "Count");
    println!("{}", "-".repeat(28));
    for ((color, state), count) in &obs.transitions {
        println!("{color:<8} {state:<10} {count:>8}");
    }
    println!();

    println!("{:<6} {:<18} {:<8} {:<8} {:>10}", "Agent", "Policy", "State", "Tile", "Position");
    println!("{}", "-".repeat(54));
    for agent in &sim.agents {
        let c = sim.map.coord(agent.current_tile);
        println!(
            "{:<6} {:<18} {:<8} {:<8} {:>10}",
            agent.id.to_string(),
            agent.policy.as_str(),
            agent.state.as_str(),
            format!("({}, {})", c.x, c.y),
            agent.position.to_string(),
        );
    }

    Ok(())
}
