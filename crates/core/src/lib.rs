//! Deterministic A* shortest paths over static 4-connected occupancy grids.

pub mod config;
pub mod error;
pub mod grid;
pub mod hash;
pub mod planner;
pub mod scenario;
pub mod types;

pub use config::SearchConfig;
pub use error::{ConfigError, Endpoint, GridError, PlanError, PositionFault};
pub use grid::{Cell, Grid};
pub use planner::{NodeId, PathResult, Planner, SearchNode, SearchOutcome, find_path};
pub use scenario::Scenario;
pub use types::{Dir4, Pos};
