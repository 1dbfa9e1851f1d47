//! Unit tests for pursuit-behavior.

use pursuit_core::{AgentConfig, AgentId, AgentRng, GridCoord, SearchConfig, TileId};
use pursuit_grid::{PathFinder, TileMap, TileMapBuilder};

use crate::{Agent, AgentSnapshot, AgentState, BehaviorPolicy, TargetView, TickContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Open 12 × 12 grid, tile size 1.
fn open_map() -> TileMap {
    TileMapBuilder::grid(12, 12, 1.0, |_| true)
}

fn tile(map: &TileMap, x: i32, y: i32) -> TileId {
    map.tile_at(GridCoord::new(x, y)).expect("tile in grid")
}

fn target_at(map: &TileMap, x: i32, y: i32) -> TargetView {
    let t = tile(map, x, y);
    TargetView::new(map.position(t), t)
}

fn agent_at(map: &TileMap, policy: BehaviorPolicy, x: i32, y: i32) -> Agent {
    let mut a = Agent::new(AgentId(0), policy, AgentConfig::default(), AgentRng::new(42, AgentId(0)));
    a.place(map, tile(map, x, y)).unwrap();
    a
}

fn snapshot(agent: &Agent) -> AgentSnapshot {
    AgentSnapshot { id: agent.id, position: agent.position }
}

// ── Policy table ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn arrival_targets() {
        assert_eq!(BehaviorPolicy::Wander.state_after_arrival(), AgentState::Idle);
        assert_eq!(BehaviorPolicy::DetectThenChase.state_after_arrival(), AgentState::Idle);
        assert_eq!(BehaviorPolicy::FleeThenAmbush.state_after_arrival(), AgentState::Chasing);
    }

    #[test]
    fn initial_state_is_idle() {
        for p in [BehaviorPolicy::Wander, BehaviorPolicy::DetectThenChase, BehaviorPolicy::FleeThenAmbush] {
            assert_eq!(p.initial_state(), AgentState::Idle);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(AgentState::Chasing.to_string(), "chasing");
        assert_eq!(BehaviorPolicy::DetectThenChase.to_string(), "detect-then-chase");
        assert_eq!(BehaviorPolicy::DetectThenChase.label_color(AgentState::Chasing), "blue");
        assert_eq!(BehaviorPolicy::Wander.label_color(AgentState::Moving), "white");
    }
}

// ── Detect-then-chase ─────────────────────────────────────────────────────────

#[cfg(test)]
mod detect_then_chase {
    use super::*;

    #[test]
    fn distant_target_random_walks() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 10, 0); // 10 units away, vision 5
        let mut agent = agent_at(&map, BehaviorPolicy::DetectThenChase, 0, 0);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(0.1, &map, &pf, &target, &snaps);

        let tr = agent.update(&ctx).unwrap().expect("transition");
        assert_eq!((tr.from, tr.to), (AgentState::Idle, AgentState::Moving));
        assert_eq!(agent.state, AgentState::Moving);
        // 20-step walk with its head already taken as the motion target.
        assert_eq!(agent.route.len(), 19);
        let next = agent.target_tile.expect("motion target");
        assert!(map.neighbors(agent.current_tile).contains(&next));
    }

    #[test]
    fn near_target_starts_chase() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 3, 0); // 3 units away
        let mut agent = agent_at(&map, BehaviorPolicy::DetectThenChase, 0, 0);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(0.1, &map, &pf, &target, &snaps);

        let tr = agent.update(&ctx).unwrap().expect("transition");
        assert_eq!((tr.from, tr.to), (AgentState::Idle, AgentState::Chasing));
        assert!(agent.route.is_empty(), "chase planning happens next tick");

        let tr = agent.update(&ctx).unwrap().expect("transition");
        assert_eq!((tr.from, tr.to), (AgentState::Chasing, AgentState::Moving));
        assert_eq!(agent.target_tile, Some(tile(&map, 1, 0)));
        assert_eq!(agent.route.len(), 2);
        assert_eq!(agent.route.destination(), Some(target.tile));
    }

    #[test]
    fn returns_to_idle_after_each_step() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 3, 0);
        let mut agent = agent_at(&map, BehaviorPolicy::DetectThenChase, 0, 0);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(1.0, &map, &pf, &target, &snaps);

        agent.update(&ctx).unwrap(); // Idle → Chasing
        agent.update(&ctx).unwrap(); // Chasing → Moving
        let tr = agent.update(&ctx).unwrap().expect("arrival");
        assert_eq!((tr.from, tr.to), (AgentState::Moving, AgentState::Idle));
        assert_eq!(agent.current_tile, tile(&map, 1, 0));
    }

    #[test]
    fn unreachable_target_keeps_chasing() {
        // Wall at x = 2 isolates the target.
        let map = TileMapBuilder::grid(5, 1, 1.0, |c| c.x != 2);
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 3, 0);
        let mut agent = agent_at(&map, BehaviorPolicy::DetectThenChase, 0, 0);
        agent.state = AgentState::Chasing;
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(0.1, &map, &pf, &target, &snaps);

        assert_eq!(agent.update(&ctx).unwrap(), None);
        assert_eq!(agent.state, AgentState::Chasing);
    }
}

// ── Wander ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wander {
    use super::*;

    #[test]
    fn never_chases() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 1, 0);
        let mut agent = agent_at(&map, BehaviorPolicy::Wander, 0, 0);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(0.25, &map, &pf, &target, &snaps);

        for _ in 0..200 {
            agent.update(&ctx).unwrap();
            assert_ne!(agent.state, AgentState::Chasing);
        }
    }

    #[test]
    fn moves_at_configured_speed_and_snaps() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 11, 11);
        let mut agent = agent_at(&map, BehaviorPolicy::Wander, 5, 5);
        let start = agent.position;
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(0.5, &map, &pf, &target, &snaps);

        agent.update(&ctx).unwrap(); // Idle → Moving, no motion yet
        assert_eq!(agent.position, start);
        let next = agent.target_tile.expect("motion target");

        assert_eq!(agent.update(&ctx).unwrap(), None); // half-way
        assert!((agent.position.distance(start) - 0.5).abs() < 1e-5);
        assert_eq!(agent.current_tile, tile(&map, 5, 5));

        let tr = agent.update(&ctx).unwrap().expect("arrival");
        assert_eq!((tr.from, tr.to), (AgentState::Moving, AgentState::Idle));
        assert_eq!(agent.current_tile, next);
        assert_eq!(agent.position, map.position(next));
        assert_eq!(agent.target_tile, None);
    }

    #[test]
    fn large_dt_does_not_overshoot() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 11, 11);
        let mut agent = agent_at(&map, BehaviorPolicy::Wander, 5, 5);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(30.0, &map, &pf, &target, &snaps);

        agent.update(&ctx).unwrap();
        let next = agent.target_tile.expect("motion target");
        agent.update(&ctx).unwrap();
        assert_eq!(agent.position, map.position(next));
        assert_eq!(agent.state, AgentState::Idle);
    }

    #[test]
    fn isolated_tile_stays_idle() {
        let map = TileMapBuilder::grid(1, 1, 1.0, |_| true);
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 0, 0);
        let mut agent = agent_at(&map, BehaviorPolicy::Wander, 0, 0);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(0.1, &map, &pf, &target, &snaps);

        assert_eq!(agent.update(&ctx).unwrap(), None);
        assert_eq!(agent.state, AgentState::Idle);
    }
}

// ── Flee-then-ambush ──────────────────────────────────────────────────────────

#[cfg(test)]
mod flee_then_ambush {
    use super::*;

    #[test]
    fn repositions_on_near_side_then_chases() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 6, 0);
        let mut agent = agent_at(&map, BehaviorPolicy::FleeThenAmbush, 2, 0);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(1.0, &map, &pf, &target, &snaps);

        // Target 4 away: reposition to 2 units from it on the agent's side,
        // i.e. tile (4, 0).
        let tr = agent.update(&ctx).unwrap().expect("transition");
        assert_eq!((tr.from, tr.to), (AgentState::Idle, AgentState::Moving));
        assert_eq!(agent.target_tile, Some(tile(&map, 3, 0)));
        assert_eq!(agent.route.destination(), Some(tile(&map, 4, 0)));

        // Any arrival switches to the chase.
        let tr = agent.update(&ctx).unwrap().expect("arrival");
        assert_eq!((tr.from, tr.to), (AgentState::Moving, AgentState::Chasing));

        let tr = agent.update(&ctx).unwrap().expect("chase step");
        assert_eq!((tr.from, tr.to), (AgentState::Chasing, AgentState::Moving));
        assert_eq!(agent.route.destination(), Some(target.tile));
    }

    #[test]
    fn unseen_target_wanders() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 11, 11);
        let mut agent = agent_at(&map, BehaviorPolicy::FleeThenAmbush, 0, 0);
        let snaps = [snapshot(&agent)];
        let ctx = TickContext::new(0.1, &map, &pf, &target, &snaps);

        agent.update(&ctx).unwrap();
        assert_eq!(agent.state, AgentState::Moving);
        assert_eq!(agent.route.len(), 19);
    }
}

// ── Guards, evasion, respawn ──────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use pursuit_core::WorldPos;

    use crate::BehaviorError;

    use super::*;

    #[test]
    fn inactive_target_freezes_agent() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let mut agent = agent_at(&map, BehaviorPolicy::DetectThenChase, 0, 0);
        let snaps = [snapshot(&agent)];
        let before = agent.position;

        for (goal_reached, eliminated) in [(true, false), (false, true)] {
            let target = TargetView { goal_reached, eliminated, ..target_at(&map, 1, 0) };
            let ctx = TickContext::new(1.0, &map, &pf, &target, &snaps);
            assert_eq!(agent.update(&ctx).unwrap(), None);
            assert_eq!(agent.state, AgentState::Idle);
            assert_eq!(agent.position, before);
            assert!(agent.route.is_empty());
        }
    }

    #[test]
    fn unplaced_agent_errors() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 1, 0);
        let ctx = TickContext::new(1.0, &map, &pf, &target, &[]);
        let mut agent = Agent::new(AgentId(4), BehaviorPolicy::Wander, AgentConfig::default(), AgentRng::new(0, AgentId(4)));
        assert_eq!(agent.update(&ctx), Err(BehaviorError::NotPlaced(AgentId(4))));
    }

    #[test]
    fn evading_chase_ignores_own_position() {
        let map = open_map();
        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&map, 3, 0);
        let mut agent = agent_at(&map, BehaviorPolicy::DetectThenChase, 0, 0);
        agent.config.evade_agents = true;
        agent.state = AgentState::Chasing;

        // Only ourselves in the snapshot: no penalty.
        let alone = [snapshot(&agent)];
        let ctx = TickContext::new(0.1, &map, &pf, &target, &alone);
        agent.update(&ctx).unwrap();
        assert_eq!(agent.route.cost, 30);

        // Another agent next to the path: every step is penalised.
        agent.state = AgentState::Chasing;
        let crowded = [
            snapshot(&agent),
            AgentSnapshot { id: AgentId(1), position: WorldPos::new(1.0, 0.0) },
        ];
        let ctx = TickContext::new(0.1, &map, &pf, &target, &crowded);
        agent.update(&ctx).unwrap();
        assert_eq!(agent.route.cost, 3 * 40);
    }

    #[test]
    fn reset_clears_route_and_lands_on_walkable() {
        // Only the centre tile of a 3 × 3 grid is walkable.
        let map = TileMapBuilder::grid(3, 3, 1.0, |c| c == GridCoord::new(1, 1));
        let mut agent = Agent::new(AgentId(2), BehaviorPolicy::FleeThenAmbush, AgentConfig::default(), AgentRng::new(9, AgentId(2)));
        agent.state = AgentState::Chasing;
        agent.target_tile = Some(TileId(0));

        let tile = agent.reset(&map, 1024).unwrap();
        assert_eq!(tile, map.tile_at(GridCoord::new(1, 1)).unwrap());
        assert_eq!(agent.current_tile, tile);
        assert_eq!(agent.position, map.position(tile));
        assert_eq!(agent.state, AgentState::Idle);
        assert_eq!(agent.target_tile, None);
        assert!(agent.route.is_empty());
    }

    #[test]
    fn reset_on_unwalkable_map_fails() {
        let map = TileMapBuilder::grid(4, 4, 1.0, |_| false);
        let mut agent = Agent::new(AgentId(0), BehaviorPolicy::Wander, AgentConfig::default(), AgentRng::new(0, AgentId(0)));
        assert_eq!(agent.reset(&map, 64), Err(BehaviorError::NoWalkableTile { attempts: 64 }));
        assert_eq!(agent.reset(&TileMap::empty(), 64), Err(BehaviorError::NoWalkableTile { attempts: 0 }));
    }

    #[test]
    fn failed_reset_leaves_agent_unplaced() {
        let open = open_map();
        let mut agent = agent_at(&open, BehaviorPolicy::Wander, 6, 6);
        assert!(agent.is_placed());

        let walls = TileMapBuilder::grid(12, 12, 1.0, |_| false);
        assert!(agent.reset(&walls, 32).is_err());
        assert!(!agent.is_placed());

        let pf = PathFinder::new(SearchConfig::default());
        let target = target_at(&open, 1, 0);
        let ctx = TickContext::new(0.1, &walls, &pf, &target, &[]);
        assert_eq!(agent.update(&ctx), Err(BehaviorError::NotPlaced(AgentId(0))));
    }

    #[test]
    fn place_rejects_walls() {
        let map = TileMapBuilder::grid(3, 1, 1.0, |c| c.x != 1);
        let wall = tile(&map, 1, 0);
        let mut agent = agent_at(&map, BehaviorPolicy::Wander, 0, 0);
        assert_eq!(agent.place(&map, wall), Err(BehaviorError::Unwalkable(wall)));
        assert_eq!(agent.current_tile, tile(&map, 0, 0));
    }
}
