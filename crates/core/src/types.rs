use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate. `x` grows east, `y` grows south.
///
/// Ordering is row-major (`y` first) so positions key ordered maps in the same
/// order a grid is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Manhattan (L1) distance. Serves as both heuristic and step cost on a
    /// 4-connected unit-cost grid. Saturates at `u32::MAX`.
    pub fn distance(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    pub fn translate(self, offset: Pos) -> Pos {
        Pos { y: self.y + offset.y, x: self.x + offset.x }
    }

    pub fn step(self, dir: Dir4) -> Pos {
        self.translate(dir.offset())
    }

    /// Like [`Pos::step`], but `None` when the step leaves the `i32` range.
    pub fn checked_step(self, dir: Dir4) -> Option<Pos> {
        let offset = dir.offset();
        Some(Pos { y: self.y.checked_add(offset.y)?, x: self.x.checked_add(offset.x)? })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned step directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir4 {
    West,
    East,
    North,
    South,
}

impl Dir4 {
    /// Neighbor expansion order. Equal-cost paths are resolved by this order, so
    /// changing it changes which of several shortest paths a search returns.
    pub const ALL: [Dir4; 4] = [Dir4::West, Dir4::East, Dir4::North, Dir4::South];

    pub const fn offset(self) -> Pos {
        match self {
            Dir4::West => Pos { y: 0, x: -1 },
            Dir4::East => Pos { y: 0, x: 1 },
            Dir4::North => Pos { y: -1, x: 0 },
            Dir4::South => Pos { y: 1, x: 0 },
        }
    }
}
