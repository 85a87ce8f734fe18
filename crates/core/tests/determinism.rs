use std::hash::Hasher;

use gridpath::{Grid, Planner, Pos, SearchOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use xxhash_rust::xxh3::Xxh3;

const SIZE: usize = 12;

fn random_case(rng: &mut ChaCha8Rng) -> (Grid, Pos, Pos) {
    let mut rows = vec![vec![0_i64; SIZE]; SIZE];
    for row in rows.iter_mut() {
        for cell in row.iter_mut() {
            if rng.next_u64() % 100 < 28 {
                *cell = 1;
            }
        }
    }
    let mut pick = |rows: &mut Vec<Vec<i64>>| {
        let x = (rng.next_u64() % SIZE as u64) as usize;
        let y = (rng.next_u64() % SIZE as u64) as usize;
        rows[y][x] = 0;
        Pos::new(x as i32, y as i32)
    };
    let start = pick(&mut rows);
    let goal = pick(&mut rows);
    (Grid::new(&rows).expect("generated grid is rectangular"), start, goal)
}

fn run_batch(seed: u64, cases: usize) -> (Vec<SearchOutcome>, u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut hasher = Xxh3::new();
    let mut outcomes = Vec::with_capacity(cases);
    for _ in 0..cases {
        let (grid, start, goal) = random_case(&mut rng);
        let outcome = Planner::new(&grid, start, goal).expect("endpoints are open").search();
        outcome.hash_into(&mut hasher);
        outcomes.push(outcome);
    }
    (outcomes, hasher.finish())
}

#[test]
fn test_determinism_identical_seeds_produce_same_outcomes() {
    let (left, left_hash) = run_batch(12345, 64);
    let (right, right_hash) = run_batch(12345, 64);

    assert_eq!(left, right, "identical inputs must produce identical outcomes");
    assert_eq!(left_hash, right_hash, "identical runs must produce identical fingerprints");
}

#[test]
fn test_determinism_different_seeds_produce_different_fingerprints() {
    let (_, left_hash) = run_batch(123, 64);
    let (_, right_hash) = run_batch(456, 64);

    assert_ne!(left_hash, right_hash, "different grids should produce different fingerprints");
}

#[test]
fn test_determinism_batch_mixes_found_and_unreachable_cases() {
    let (outcomes, _) = run_batch(2024, 128);
    let found = outcomes.iter().filter(|outcome| outcome.is_found()).count();

    assert!(found > 0, "some random cases should be solvable");
    assert!(found < outcomes.len(), "some random cases should be walled off");
}

#[test]
fn test_determinism_path_independent_of_query_history() {
    let grid: Grid = "
        ......
        .##.#.
        ......
        .#.##.
        ......
    "
    .parse()
    .expect("valid map");
    let query = || Planner::new(&grid, Pos::new(0, 0), Pos::new(5, 4)).expect("valid").search();

    let fresh = query();
    for goal in [Pos::new(3, 0), Pos::new(2, 3), Pos::new(5, 0)] {
        let _ = Planner::new(&grid, Pos::new(0, 4), goal).expect("valid").search();
    }
    assert_eq!(query(), fresh);
    assert_eq!(query().fingerprint(), fresh.fingerprint());
}
