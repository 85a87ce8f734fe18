//! JSON scenario files: a grid plus the two endpoints of a query.
//!
//! ```json
//! { "format_version": 1, "grid": [[0, 0], [0, 1]], "start": {"x": 0, "y": 0}, "goal": {"x": 1, "y": 0} }
//! ```
//!
//! The grid is validated while loading. Endpoints are validated when a planner
//! is built from the scenario.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::PlanError;
use crate::grid::Grid;
use crate::planner::Planner;
use crate::types::Pos;

pub const SCENARIO_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub format_version: u32,
    pub grid: Grid,
    pub start: Pos,
    pub goal: Pos,
}

impl Scenario {
    pub fn new(grid: Grid, start: Pos, goal: Pos) -> Self {
        Self { format_version: SCENARIO_FORMAT_VERSION, grid, start, goal }
    }

    /// The 5x5 demonstration grid, routed from the top-left to the bottom-right corner.
    pub fn demo() -> Self {
        let rows = [
            [0, 0, 0, 0, 0],
            [0, 1, 1, 1, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 1, 0, 0],
            [0, 0, 0, 0, 0],
        ];
        let grid = Grid::new(&rows).expect("demo grid is rectangular");
        Self::new(grid, Pos::new(0, 0), Pos::new(4, 4))
    }

    pub fn planner(&self, config: SearchConfig) -> Result<Planner<'_>, PlanError> {
        Planner::with_config(&self.grid, self.start, self.goal, config)
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let scenario: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if scenario.format_version != SCENARIO_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "unsupported scenario format_version {}, expected {SCENARIO_FORMAT_VERSION}",
                    scenario.format_version
                ),
            ));
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Endpoint, PositionFault};
    use tempfile::tempdir;

    #[test]
    fn scenario_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("demo.json");
        let scenario = Scenario::demo();

        scenario.write_atomic(&path).expect("write");
        let loaded = Scenario::load(&path).expect("load");
        assert_eq!(scenario, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn load_rejects_ragged_grid() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("ragged.json");
        fs::write(
            &path,
            r#"{"format_version":1,"grid":[[0,0],[0]],"start":{"x":0,"y":0},"goal":{"x":1,"y":0}}"#,
        )
        .expect("write");

        let err = Scenario::load(&path).expect_err("ragged grid");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("row 1 has 1 cells, expected 2"), "{err}");
    }

    #[test]
    fn load_rejects_unknown_format_version() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("future.json");
        let mut scenario = Scenario::demo();
        scenario.format_version = 9;
        scenario.write_atomic(&path).expect("write");

        let err = Scenario::load(&path).expect_err("future version");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn planner_validates_endpoints() {
        let mut scenario = Scenario::demo();
        scenario.start = Pos::new(1, 1);
        let err = scenario.planner(SearchConfig::default()).err().expect("blocked start");
        assert_eq!(
            err,
            PlanError::InvalidPosition {
                endpoint: Endpoint::Start,
                pos: Pos::new(1, 1),
                fault: PositionFault::Blocked,
            }
        );
    }

    #[test]
    fn demo_scenario_has_nine_position_path() {
        let outcome = Scenario::demo().planner(SearchConfig::default()).expect("valid").search();
        assert_eq!(outcome.path().map(<[Pos]>::len), Some(9));
    }
}
