//! Strongly typed, zero-cost identifier wrappers.
//!
//! Both IDs are dense indices: `TileId(n)` is the `n`-th tile added to a
//! `TileMap`, `AgentId(n)` the `n`-th agent spawned by the scheduler.  The
//! inner integer is `pub` so hot loops can index `Vec`s directly, but callers
//! should prefer [`index`](TileId::index) for clarity.

use std::fmt;

/// Generate a typed dense-index wrapper around `u32`.
///
/// `$tag` is the short prefix used by `Display` (`t12`, `a3`) so log lines
/// stay compact.
macro_rules! dense_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(u32::MAX);

            /// Build an id from a `Vec` position.
            ///
            /// # Panics
            /// Panics in debug mode if `i` does not fit in `u32`.
            #[inline(always)]
            pub fn from_index(i: usize) -> Self {
                debug_assert!(i < u32::MAX as usize);
                $name(i as u32)
            }

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, "{}"), self.0)
                } else {
                    f.write_str(concat!($tag, "?"))
                }
            }
        }
    };
}

dense_id! {
    /// Index of an agent owned by the scheduler.
    pub struct AgentId, "a";
}

dense_id! {
    /// Index of a tile in a `TileMap`.  Only meaningful for the map that
    /// issued it; a regenerated map starts a new id space.
    pub struct TileId, "t";
}
