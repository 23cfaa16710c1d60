use std::collections::BTreeMap;

use rand::{seq::index, seq::SliceRandom as _, Rng as _};

use super::{Maze, MazeError, MazeGenerator, Random};
use crate::gameboard::{CellState, CellWall};

/// Chance of joining two neighboring sets in a row, the last row always joins.
const MERGE_CHANCE: f64 = 0.8;
/// Chance of an extra south opening from a set, past the mandatory one.
const EXTRA_DROP_CHANCE: f64 = 0.3;

/// Eller's algorithm, builds the maze one row at a time.
///
/// Each cell of the current row carries a set label. Cells opened from the row above
/// inherit its label, the rest start in a set of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllersAlgorithm;

impl MazeGenerator for EllersAlgorithm {
    fn generate_with(&self, width: i32, height: i32, rng: &mut Random) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(width, height)?;
        let height = maze.height();

        let mut next_label = 0;
        let mut labels = Vec::new();

        for row in 0..height {
            let is_last = row + 1 == height;

            if row == 0 {
                labels = partition_first_row(&mut maze, &mut next_label, rng);
                if is_last {
                    merge_sets(&mut maze, row, &mut labels, true, rng);
                }
            } else {
                labels = inherit_labels(&maze, row, &labels, &mut next_label);
                merge_sets(&mut maze, row, &mut labels, is_last, rng);
            }

            if !is_last {
                drop_down(&mut maze, row, &labels, rng);
            }

            log::trace!("Row {} sets: {:?}", row, labels);
        }

        Ok(maze)
    }
}

/// Splits the first row into a random number of contiguous sets and opens each of them.
fn partition_first_row(maze: &mut Maze, next_label: &mut usize, rng: &mut Random) -> Vec<usize> {
    let width = maze.width();

    // with more than two cells, every cell being its own set is not an option
    let set_count = if width > 2 {
        rng.gen_range(1..width)
    } else {
        rng.gen_range(1..=width)
    };

    let mut cuts = index::sample(rng, width - 1, set_count - 1)
        .into_iter()
        .map(|i| i + 1)
        .collect::<Vec<_>>();
    cuts.sort_unstable();

    let mut labels = Vec::with_capacity(width);
    let mut label = *next_label;
    for col in 0..width {
        if col > 0 {
            let joined = cuts.binary_search(&col).is_err()
                && maze.tear_down_wall(0, col - 1, CellState::OPEN_EAST).is_ok();
            if !joined {
                label += 1;
            }
        }
        labels.push(label);
    }

    *next_label = label + 1;
    labels
}

/// Labels for `row`, which only has the openings dropped from the row above.
fn inherit_labels(maze: &Maze, row: usize, above: &[usize], next_label: &mut usize) -> Vec<usize> {
    above
        .iter()
        .enumerate()
        .map(|(col, &label)| {
            if maze.is_open(row, col, CellWall::North) {
                label
            } else {
                *next_label += 1;
                *next_label - 1
            }
        })
        .collect()
}

/// Joins neighboring cells of different sets, each joined pair unifies the whole sets.
fn merge_sets(maze: &mut Maze, row: usize, labels: &mut [usize], force: bool, rng: &mut Random) {
    for col in 0..labels.len().saturating_sub(1) {
        let (left, right) = (labels[col], labels[col + 1]);
        if left == right || !(force || rng.gen_bool(MERGE_CHANCE)) {
            continue;
        }

        if maze.tear_down_wall(row, col, CellState::OPEN_EAST).is_err() {
            continue;
        }

        labels
            .iter_mut()
            .filter(|label| **label == right)
            .for_each(|label| *label = left);
    }
}

/// Opens the south wall of at least one cell in every set.
fn drop_down(maze: &mut Maze, row: usize, labels: &[usize], rng: &mut Random) {
    let mut sets = BTreeMap::<usize, Vec<usize>>::new();
    for (col, &label) in labels.iter().enumerate() {
        sets.entry(label).or_default().push(col);
    }

    for cols in sets.values() {
        let Some(&chosen) = cols.choose(rng) else {
            continue;
        };

        for &col in cols {
            if col == chosen || rng.gen_bool(EXTRA_DROP_CHANCE) {
                // never called for the last row, so south is always inside the grid
                let opened = maze.tear_down_wall(row, col, CellState::OPEN_SOUTH);
                debug_assert!(opened.is_ok(), "{:?}", opened);
                if let Err(err) = opened {
                    log::warn!("Set lost its south opening: {}", err);
                }
            }
        }
    }
}
