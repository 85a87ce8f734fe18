//! Error types for grid construction, planner setup, and configuration loading.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::types::Pos;

/// Reasons a grid is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    NoRows,

    #[error("grid has no columns")]
    NoColumns,

    /// Row 0 defines the width; every other row must match it.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("cell ({x}, {y}) has value {value}, expected 0 (open) or 1 (blocked)")]
    InvalidCell { x: usize, y: usize, value: i64 },

    #[error("cell ({x}, {y}) has unknown glyph {glyph:?}")]
    UnknownGlyph { x: usize, y: usize, glyph: char },
}

/// Which search endpoint a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFault {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for PositionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionFault::OutOfBounds => write!(f, "is outside the grid"),
            PositionFault::Blocked => write!(f, "is on an impassable cell"),
        }
    }
}

/// Errors surfaced when setting up a search. Never raised partway through one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("{endpoint} position {pos} {fault}")]
    InvalidPosition { endpoint: Endpoint, pos: Pos, fault: PositionFault },

    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
