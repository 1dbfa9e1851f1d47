//! Grid and world coordinate types.
//!
//! Two coordinate systems coexist:
//!
//! - [`GridCoord`]: integer tile indices.  Used by the search heuristic
//!   (Manhattan distance) and for addressing tiles.
//! - [`WorldPos`]: continuous `f32` positions in map units.  Agents move in
//!   world space; vision and evasion radii are world-space distances.
//!
//! The map collaborator decides how one maps onto the other (tile size,
//! origin); the engine never assumes a particular scale.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ── GridCoord ─────────────────────────────────────────────────────────────────

/// Integer grid coordinate of a tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `|dx| + |dy|`, the number of 4-connected steps between two tiles on
    /// an obstacle-free grid.
    #[inline]
    pub fn manhattan(self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ── WorldPos ──────────────────────────────────────────────────────────────────

/// A continuous position (or displacement) in world units.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const ZERO: WorldPos = WorldPos { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    #[inline]
    pub fn normalized(self) -> WorldPos {
        let len = self.length();
        if len <= f32::EPSILON {
            WorldPos::ZERO
        } else {
            WorldPos::new(self.x / len, self.y / len)
        }
    }

    /// Move from `self` toward `target` by at most `max_step` units.
    ///
    /// Never passes `target`: when the remaining distance is within
    /// `max_step` the result is exactly `target`.
    pub fn step_toward(self, target: WorldPos, max_step: f32) -> WorldPos {
        let delta = target - self;
        let dist = delta.length();
        if dist <= max_step {
            target
        } else {
            self + delta.normalized() * max_step
        }
    }

    /// Cheap circle test without the square root.
    #[inline]
    pub fn within(self, center: WorldPos, radius: f32) -> bool {
        let d = self - center;
        d.x * d.x + d.y * d.y < radius * radius
    }
}

impl Add for WorldPos {
    type Output = WorldPos;
    #[inline]
    fn add(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPos {
    type Output = WorldPos;
    #[inline]
    fn sub(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for WorldPos {
    type Output = WorldPos;
    #[inline]
    fn mul(self, rhs: f32) -> WorldPos {
        WorldPos::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
