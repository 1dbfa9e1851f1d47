//! Tile map representation and builder.
//!
//! # Data layout
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format.  Given a
//! `TileId t`, its neighbours occupy the slice:
//!
//! ```text
//! adjacency[ adj_start[t] .. adj_start[t+1] ]
//! ```
//!
//! so `neighbors(t)` is an O(1) slice borrow with no allocation in the inner
//! loop of every search.  Per-tile data (`coords`, `positions`, `walkable`)
//! are parallel `Vec`s indexed by `TileId`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps world positions to the nearest tile.  The
//! flee-then-ambush policy uses it to resolve a displaced point back onto the
//! grid.
//!
//! A `TileMap` is immutable once built.  Regenerating the map means building
//! a new one; ids from the old map are meaningless against the new one.

use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use pursuit_core::{GridCoord, TileId, WorldPos};

use crate::{GridError, GridResult};

// ── R-tree tile entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct TileEntry {
    point: [f32; 2], // [x, y]
    id:    TileId,
}

impl RTreeObject for TileEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for TileEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── TileMap ───────────────────────────────────────────────────────────────────

/// Tile graph in CSR format plus lookups by grid coordinate and world
/// position.
///
/// Do not construct directly; use [`TileMapBuilder`].
pub struct TileMap {
    /// Grid coordinate of each tile.  Indexed by `TileId`.
    pub coords: Vec<GridCoord>,

    /// World-space centre of each tile.  Agents steer toward these.
    pub positions: Vec<WorldPos>,

    /// Whether agents may stand on each tile.
    pub walkable: Vec<bool>,

    /// CSR row pointer.  Length = `tile_count + 1`.
    adj_start: Vec<u32>,

    /// Neighbour lists, concatenated in tile order.
    adjacency: Vec<TileId>,

    by_coord: HashMap<GridCoord, TileId>,

    spatial_idx: RTree<TileEntry>,
}

impl TileMap {
    /// A map with no tiles.  Every search against it fails with
    /// [`GridError::TileNotFound`].
    pub fn empty() -> Self {
        TileMapBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn tile_count(&self) -> usize {
        self.coords.len()
    }

    /// Number of directed adjacency entries (each undirected link counts twice).
    pub fn link_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterator over every tile id in ascending order.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tile_count()).map(TileId::from_index)
    }

    /// `Ok(())` if `tile` belongs to this map.
    #[inline]
    pub fn check(&self, tile: TileId) -> GridResult<()> {
        if tile.index() < self.tile_count() {
            Ok(())
        } else {
            Err(GridError::TileNotFound { tile, tile_count: self.tile_count() })
        }
    }

    // ── Per-tile queries ──────────────────────────────────────────────────

    /// Adjacent tiles of `tile`.
    ///
    /// # Panics
    /// Panics if `tile` is out of range; call [`check`](Self::check) first
    /// for untrusted ids.
    #[inline]
    pub fn neighbors(&self, tile: TileId) -> &[TileId] {
        let start = self.adj_start[tile.index()] as usize;
        let end   = self.adj_start[tile.index() + 1] as usize;
        &self.adjacency[start..end]
    }

    #[inline]
    pub fn coord(&self, tile: TileId) -> GridCoord {
        self.coords[tile.index()]
    }

    #[inline]
    pub fn position(&self, tile: TileId) -> WorldPos {
        self.positions[tile.index()]
    }

    /// `false` for unknown ids as well as blocked tiles.
    #[inline]
    pub fn is_walkable(&self, tile: TileId) -> bool {
        self.walkable.get(tile.index()).copied().unwrap_or(false)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Tile at grid coordinate `coord`, if any.
    pub fn tile_at(&self, coord: GridCoord) -> Option<TileId> {
        self.by_coord.get(&coord).copied()
    }

    /// Nearest tile (walkable or not) to `pos`.  `None` only for an empty map.
    pub fn nearest_tile(&self, pos: WorldPos) -> Option<TileId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }

    /// Nearest walkable tile to `pos`.  `None` if no tile is walkable.
    pub fn nearest_walkable_tile(&self, pos: WorldPos) -> Option<TileId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .map(|e| e.id)
            .find(|&id| self.walkable[id.index()])
    }
}

// ── TileMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`TileMap`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use pursuit_core::{GridCoord, WorldPos};
/// use pursuit_grid::TileMapBuilder;
///
/// let mut b = TileMapBuilder::new();
/// let a = b.add_tile(GridCoord::new(0, 0), WorldPos::new(0.0, 0.0), true);
/// let c = b.add_tile(GridCoord::new(1, 0), WorldPos::new(1.0, 0.0), true);
/// b.add_link(a, c);
/// let map = b.build();
/// assert_eq!(map.tile_count(), 2);
/// assert_eq!(map.neighbors(a), &[c]);
/// ```
pub struct TileMapBuilder {
    coords:    Vec<GridCoord>,
    positions: Vec<WorldPos>,
    walkable:  Vec<bool>,
    links:     Vec<(TileId, TileId)>,
}

impl TileMapBuilder {
    pub fn new() -> Self {
        Self {
            coords:    Vec::new(),
            positions: Vec::new(),
            walkable:  Vec::new(),
            links:     Vec::new(),
        }
    }

    /// Add a tile and return its `TileId` (sequential from 0).
    pub fn add_tile(&mut self, coord: GridCoord, pos: WorldPos, walkable: bool) -> TileId {
        let id = TileId::from_index(self.coords.len());
        self.coords.push(coord);
        self.positions.push(pos);
        self.walkable.push(walkable);
        id
    }

    /// Make `to` a neighbour of `from` (one direction only).
    pub fn add_directed_link(&mut self, from: TileId, to: TileId) {
        self.links.push((from, to));
    }

    /// Make `a` and `b` neighbours of each other.
    pub fn add_link(&mut self, a: TileId, b: TileId) {
        self.add_directed_link(a, b);
        self.add_directed_link(b, a);
    }

    pub fn tile_count(&self) -> usize { self.coords.len() }

    /// Build a `width × height` 4-connected grid with tile centres at
    /// `(x * tile_size, y * tile_size)`.
    ///
    /// Only walkable tiles are linked, so every adjacency the search sees is
    /// already walkable.  Tile ids are assigned row-major: `y * width + x`.
    pub fn grid<F>(width: u32, height: u32, tile_size: f32, is_walkable: F) -> TileMap
    where
        F: Fn(GridCoord) -> bool,
    {
        let mut b = TileMapBuilder::new();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let coord = GridCoord::new(x, y);
                let pos = WorldPos::new(x as f32 * tile_size, y as f32 * tile_size);
                b.add_tile(coord, pos, is_walkable(coord));
            }
        }
        let at = |x: u32, y: u32| TileId::from_index((y * width + x) as usize);
        for y in 0..height {
            for x in 0..width {
                let here = at(x, y);
                if !b.walkable[here.index()] {
                    continue;
                }
                if x + 1 < width && b.walkable[at(x + 1, y).index()] {
                    b.add_link(here, at(x + 1, y));
                }
                if y + 1 < height && b.walkable[at(x, y + 1).index()] {
                    b.add_link(here, at(x, y + 1));
                }
            }
        }
        b.build()
    }

    /// Consume the builder and produce a [`TileMap`].
    ///
    /// Duplicate links are collapsed; links naming unknown tiles are dropped.
    pub fn build(self) -> TileMap {
        let tile_count = self.coords.len();

        let mut links = self.links;
        links.retain(|(a, b)| a.index() < tile_count && b.index() < tile_count);
        links.sort_unstable();
        links.dedup();

        let adjacency: Vec<TileId> = links.iter().map(|&(_, to)| to).collect();

        let mut adj_start = vec![0u32; tile_count + 1];
        for (from, _) in &links {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=tile_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[tile_count] as usize, adjacency.len());

        let by_coord = self
            .coords
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, TileId::from_index(i)))
            .collect();

        let entries: Vec<TileEntry> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| TileEntry { point: [pos.x, pos.y], id: TileId::from_index(i) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        TileMap {
            coords: self.coords,
            positions: self.positions,
            walkable: self.walkable,
            adj_start,
            adjacency,
            by_coord,
            spatial_idx,
        }
    }
}

impl Default for TileMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
