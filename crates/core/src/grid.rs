//! Rectangular occupancy map and the adjacency rules the planner searches over.
//! This module exists so bounds and passability checks live in one validated type.
//! It does not own search bookkeeping or cost policy.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::types::{Dir4, Pos};

const OPEN_VALUE: i64 = 0;
const BLOCKED_VALUE: i64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Open,
    Blocked,
}

impl Cell {
    fn glyph(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Blocked => '#',
        }
    }
}

/// Validated, read-only occupancy grid stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from rows of `0` (open) and `1` (blocked).
    ///
    /// Row 0 defines the width. Fails on an empty grid, an empty first row,
    /// rows of unequal length, or any other cell value.
    pub fn new<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::NoRows);
        };
        let width = first.as_ref().len();
        if width == 0 {
            return Err(GridError::NoColumns);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedRow { row: y, expected: width, found: row.len() });
            }
            for (x, &value) in row.iter().enumerate() {
                let cell = match value {
                    OPEN_VALUE => Cell::Open,
                    BLOCKED_VALUE => Cell::Blocked,
                    _ => return Err(GridError::InvalidCell { x, y, value }),
                };
                cells.push(cell);
            }
        }

        Ok(Self { width, height: rows.len(), cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        if !self.is_in_bounds(pos) {
            return None;
        }
        Some(self.cells[self.index(pos)])
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    /// Passable positions one step away, in [`Dir4::ALL`] order
    /// (west, east, north, south). Accepts any position, in bounds or not.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir4::ALL
            .into_iter()
            .filter_map(move |dir| pos.checked_step(dir))
            .filter(move |next| self.is_passable(*next))
    }

    /// Every passable position connected to `start`, including `start` itself.
    /// Empty when `start` is not passable.
    pub fn reachable_from(&self, start: Pos) -> BTreeSet<Pos> {
        let mut visited = BTreeSet::new();
        if !self.is_passable(start) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited
    }

    /// Fewest 4-connected steps from `start` to `goal` by breadth-first search,
    /// or `None` when either endpoint is blocked or they are disconnected.
    pub fn step_distance(&self, start: Pos, goal: Pos) -> Option<u32> {
        if !self.is_passable(start) || !self.is_passable(goal) {
            return None;
        }

        let mut steps = BTreeMap::from([(start, 0_u32)]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let here = steps[&current];
            if current == goal {
                return Some(here);
            }
            for neighbor in self.neighbors(current) {
                if !steps.contains_key(&neighbor) {
                    steps.insert(neighbor, here + 1);
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }

    pub fn rows(&self) -> Vec<Vec<i64>> {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Open => OPEN_VALUE,
                        Cell::Blocked => BLOCKED_VALUE,
                    })
                    .collect()
            })
            .collect()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

impl TryFrom<Vec<Vec<i64>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Grid::new(&rows)
    }
}

impl From<Grid> for Vec<Vec<i64>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}

/// Parses a text map: `.` is open, `#` is blocked, one row per line.
/// Surrounding whitespace and blank lines are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (y, line) in s.lines().map(str::trim).filter(|line| !line.is_empty()).enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, glyph)| match glyph {
                    '.' => Ok(OPEN_VALUE),
                    '#' => Ok(BLOCKED_VALUE),
                    _ => Err(GridError::UnknownGlyph { x, y, glyph }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Grid::new(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
