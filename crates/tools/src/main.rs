//! Command-line driver: loads a scenario (or the built-in demo), runs one
//! search, and prints the outcome.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridpath::{Cell, Grid, Pos, Scenario, SearchConfig, SearchOutcome};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a scenario JSON file. The built-in 5x5 demo is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Path to a TOML search config (for example `max_expansions = 500`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the grid with the path drawn over it
    #[arg(short, long)]
    render: bool,

    /// Print the outcome as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn format_path(path: &[Pos]) -> String {
    path.iter().map(Pos::to_string).collect::<Vec<_>>().join(" -> ")
}

/// Text map with `S`/`G` at the endpoints and `*` on the path in between.
fn render_path(grid: &Grid, path: &[Pos]) -> String {
    let on_path: BTreeSet<Pos> = path.iter().copied().collect();
    let start = path.first().copied();
    let goal = path.last().copied();

    let mut out = String::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let pos = Pos::new(x, y);
            let glyph = if Some(pos) == start {
                'S'
            } else if Some(pos) == goal {
                'G'
            } else if on_path.contains(&pos) {
                '*'
            } else if grid.cell(pos) == Some(Cell::Blocked) {
                '#'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn outcome_json(outcome: &SearchOutcome) -> serde_json::Value {
    match outcome {
        SearchOutcome::Found(result) => serde_json::json!({
            "status": "found",
            "path": result.path,
            "cost": result.cost,
            "nodes_expanded": result.nodes_expanded,
        }),
        SearchOutcome::NoPath { nodes_expanded } => serde_json::json!({
            "status": "no_path",
            "nodes_expanded": nodes_expanded,
        }),
        SearchOutcome::BudgetExhausted { nodes_expanded } => serde_json::json!({
            "status": "budget_exhausted",
            "nodes_expanded": nodes_expanded,
        }),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario file: {}", path.display()))?,
        None => Scenario::demo(),
    };
    let config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load search config: {}", path.display()))?,
        None => SearchConfig::default(),
    };

    let planner = scenario.planner(config).context("Scenario endpoints are not usable")?;
    info!(
        "searching {}x{} grid from {} to {}",
        scenario.grid.width(),
        scenario.grid.height(),
        planner.start(),
        planner.goal()
    );
    let outcome = planner.search();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
        return Ok(());
    }

    match &outcome {
        SearchOutcome::Found(result) => {
            println!("Path found: {}", format_path(&result.path));
            println!("Cost: {}", result.cost);
            println!("Nodes expanded: {}", result.nodes_expanded);
            if args.render {
                print!("{}", render_path(&scenario.grid, &result.path));
            }
        }
        SearchOutcome::NoPath { nodes_expanded } => {
            println!("No path found ({nodes_expanded} nodes expanded)");
        }
        SearchOutcome::BudgetExhausted { nodes_expanded } => {
            println!("Search budget exhausted after {nodes_expanded} nodes");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_path_as_arrow_chain() {
        assert_eq!(format_path(&[Pos::new(0, 0), Pos::new(1, 0)]), "(0, 0) -> (1, 0)");
        assert_eq!(format_path(&[]), "");
    }

    #[test]
    fn renders_demo_path_over_grid() {
        let scenario = Scenario::demo();
        let path = scenario
            .planner(SearchConfig::default())
            .expect("demo endpoints")
            .search()
            .into_path()
            .expect("demo is solvable");

        let rendered = render_path(&scenario.grid, &path);
        assert_eq!(rendered, "S****\n.###*\n....*\n..#.*\n....G\n");
    }

    #[test]
    fn outcome_json_reports_status() {
        let value = outcome_json(&SearchOutcome::NoPath { nodes_expanded: 3 });
        assert_eq!(value["status"], "no_path");
        assert_eq!(value["nodes_expanded"], 3);
    }

    #[test]
    fn args_accept_scenario_and_render_flags() {
        let args = Args::try_parse_from(["gridpath", "--scenario", "maze.json", "--render"])
            .expect("valid flags");
        assert_eq!(args.scenario, Some(PathBuf::from("maze.json")));
        assert!(args.render);
        assert!(args.config.is_none());
    }
}
