use std::hash::Hasher;

use anyhow::{Result, bail};
use clap::Parser;
use gridpath::{Grid, Planner, Pos, SearchOutcome};
use log::{debug, info};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use xxhash_rust::xxh3::Xxh3;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    cases: u32,
    /// Side length of the generated square grids
    #[arg(long, default_value_t = 16)]
    size: usize,
    /// Percentage of cells that start blocked
    #[arg(short, long, default_value_t = 30)]
    density: u64,
}

fn random_pos(rng: &mut ChaCha8Rng, size: usize) -> Pos {
    let x = rng.next_u64() % size as u64;
    let y = rng.next_u64() % size as u64;
    Pos::new(x as i32, y as i32)
}

fn random_case(rng: &mut ChaCha8Rng, size: usize, density: u64) -> Result<(Grid, Pos, Pos)> {
    let mut rows = vec![vec![0_i64; size]; size];
    for row in rows.iter_mut() {
        for cell in row.iter_mut() {
            if rng.next_u64() % 100 < density {
                *cell = 1;
            }
        }
    }
    let start = random_pos(rng, size);
    let goal = random_pos(rng, size);
    rows[start.y as usize][start.x as usize] = 0;
    rows[goal.y as usize][goal.x as usize] = 0;
    Ok((Grid::new(&rows)?, start, goal))
}

fn check_outcome(grid: &Grid, start: Pos, goal: Pos, outcome: &SearchOutcome) -> Result<()> {
    let reference = grid.step_distance(start, goal);
    match outcome {
        SearchOutcome::Found(result) => {
            let path = &result.path;
            if path.first() != Some(&start) || path.last() != Some(&goal) {
                bail!("Invariant failed: path does not run from {start} to {goal}");
            }
            if let Some(pair) = path.windows(2).find(|pair| pair[0].distance(pair[1]) != 1) {
                bail!("Invariant failed: {} -> {} is not a single step", pair[0], pair[1]);
            }
            if let Some(pos) = path.iter().find(|pos| !grid.is_passable(**pos)) {
                bail!("Invariant failed: path crosses blocked cell {pos}");
            }
            if path.len() as u32 - 1 != result.cost {
                bail!("Invariant failed: cost {} for {} positions", result.cost, path.len());
            }
            if reference != Some(result.cost) {
                bail!("Invariant failed: cost {} but BFS reports {:?}", result.cost, reference);
            }
        }
        SearchOutcome::NoPath { .. } => {
            if let Some(steps) = reference {
                bail!("Invariant failed: no path reported but BFS finds {steps} steps");
            }
            if grid.reachable_from(start).contains(&goal) {
                bail!("Invariant failed: no path reported but {goal} is reachable from {start}");
            }
        }
        SearchOutcome::BudgetExhausted { .. } => {
            bail!("Invariant failed: unbounded search exhausted a budget");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.size == 0 {
        bail!("--size must be at least 1");
    }

    info!(
        "Starting fuzz harness on seed {} for {} cases of {}x{} grids at {}% density...",
        args.seed, args.cases, args.size, args.size, args.density
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut hasher = Xxh3::new();
    let mut found = 0_u32;
    let mut expanded = 0_u64;

    for case in 0..args.cases {
        let (grid, start, goal) = random_case(&mut rng, args.size, args.density)?;
        let outcome = Planner::new(&grid, start, goal)?.search();
        if let Err(err) = check_outcome(&grid, start, goal, &outcome) {
            bail!("case {case} (seed {}): {err}\n{grid}", args.seed);
        }
        debug!("case {case}: {start} -> {goal} found={}", outcome.is_found());

        found += u32::from(outcome.is_found());
        expanded += u64::from(outcome.nodes_expanded());
        outcome.hash_into(&mut hasher);
    }

    println!("Fuzz complete.");
    println!("Cases: {} ({} found, {} unreachable)", args.cases, found, args.cases - found);
    println!("Nodes expanded: {expanded}");
    println!("Outcome fingerprint: {:016x}", hasher.finish());

    Ok(())
}
