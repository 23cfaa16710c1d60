mod ellers;
mod recursive_backtracker;
mod rnd_kruskals;

use std::fmt;

use rand::{thread_rng, Rng as _, SeedableRng as _};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use super::{Maze, MazeError};

pub use ellers::EllersAlgorithm;
pub use recursive_backtracker::RecursiveBacktracker;
pub use rnd_kruskals::RndKruskals;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Strategy carving a fresh, fully walled maze into a perfect one.
///
/// Generators hold no state, every call builds an independent maze. Walls pointing off
/// the grid are an expected outcome of random choices and never leave `generate`,
/// only [`MazeError::InvalidSize`] does.
pub trait MazeGenerator: fmt::Debug + Sync + Send {
    fn generate_with(&self, width: i32, height: i32, rng: &mut Random) -> Result<Maze, MazeError>;

    fn generate(&self, width: i32, height: i32) -> Result<Maze, MazeError> {
        self.generate_seeded(width, height, thread_rng().gen())
    }

    fn generate_seeded(&self, width: i32, height: i32, seed: u64) -> Result<Maze, MazeError> {
        log::debug!("Generating {}x{} maze with {:?}, seed {}", width, height, self, seed);
        self.generate_with(width, height, &mut Random::seed_from_u64(seed))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Algorithm {
    #[default]
    #[value(name = "backtracker", alias = "dfs")]
    RecursiveBacktracker,
    #[value(name = "ellers")]
    EllersAlgorithm,
    #[value(name = "kruskals")]
    RndKruskals,
}

impl Algorithm {
    pub fn generator(self) -> &'static dyn MazeGenerator {
        match self {
            Algorithm::RecursiveBacktracker => &RecursiveBacktracker,
            Algorithm::EllersAlgorithm => &EllersAlgorithm,
            Algorithm::RndKruskals => &RndKruskals,
        }
    }

    pub fn all() -> [Algorithm; 3] {
        [
            Algorithm::RecursiveBacktracker,
            Algorithm::EllersAlgorithm,
            Algorithm::RndKruskals,
        ]
    }
}

/// Generates `count` mazes in parallel.
///
/// Every maze gets its own random stream, made by jumping the seeded generator, so the
/// result only depends on the seed.
pub fn generate_batch(
    generator: &dyn MazeGenerator,
    width: i32,
    height: i32,
    count: usize,
    seed: u64,
) -> Result<Vec<Maze>, MazeError> {
    // reject the size even when nothing gets generated
    Maze::new(width, height)?;

    let mut rng = Random::seed_from_u64(seed);
    let rngs = (0..count)
        .map(|_| {
            rng.jump();
            rng.clone()
        })
        .collect::<Vec<_>>();

    log::debug!("Generating {} mazes with {:?}", count, generator);

    rngs.into_par_iter()
        .map(|mut rng| generator.generate_with(width, height, &mut rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameboard::CellState;

    const SIZES: [(i32, i32); 8] = [
        (1, 1),
        (1, 7),
        (7, 1),
        (2, 2),
        (2, 3),
        (3, 2),
        (10, 10),
        (17, 6),
    ];

    #[test]
    fn every_algorithm_is_perfect() {
        for algorithm in Algorithm::all() {
            for (seed, (width, height)) in SIZES.into_iter().enumerate() {
                let maze = algorithm
                    .generator()
                    .generate_seeded(width, height, seed as u64)
                    .unwrap();

                assert_eq!(maze.height(), height as usize, "{:?}", algorithm);
                assert!(maze.rows().all(|row| row.len() == width as usize));
                assert!(maze.is_perfect(), "{:?} {}x{}\n{}", algorithm, width, height, maze);
            }
        }
    }

    #[test]
    fn no_cell_left_walled() {
        for algorithm in Algorithm::all() {
            for _ in 0..10 {
                let maze = algorithm.generator().generate(10, 10).unwrap();
                assert!(maze.rows().flatten().all(|&state| state != CellState::NO_OPEN));

                let maze = algorithm.generator().generate(2, 3).unwrap();
                assert_eq!(maze.rows().count(), 3);
                assert!(maze.rows().flatten().all(|&state| state != CellState::NO_OPEN));
            }
        }
    }

    #[test]
    fn invalid_size_propagates() {
        for algorithm in Algorithm::all() {
            assert_eq!(
                algorithm.generator().generate(0, 5),
                Err(MazeError::InvalidSize(0, 5))
            );
            assert_eq!(
                algorithm.generator().generate(4, -2),
                Err(MazeError::InvalidSize(4, -2))
            );
        }
    }

    #[test]
    fn seed_is_deterministic() {
        for algorithm in Algorithm::all() {
            let generator = algorithm.generator();
            assert_eq!(
                generator.generate_seeded(12, 9, 42).unwrap(),
                generator.generate_seeded(12, 9, 42).unwrap()
            );
        }
    }

    #[test]
    fn batch() {
        let generator = Algorithm::EllersAlgorithm.generator();
        let mazes = generate_batch(generator, 8, 5, 6, 7).unwrap();

        assert_eq!(mazes.len(), 6);
        assert!(mazes.iter().all(Maze::is_perfect));
        assert_eq!(mazes, generate_batch(generator, 8, 5, 6, 7).unwrap());
        assert!(generate_batch(generator, 0, 5, 3, 7).is_err());
        assert_eq!(generate_batch(generator, 8, 5, 0, 7), Ok(Vec::new()));
        assert_eq!(
            generate_batch(generator, 0, 5, 0, 7),
            Err(MazeError::InvalidSize(0, 5))
        );
    }
}
