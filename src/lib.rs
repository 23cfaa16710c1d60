pub mod array;
pub mod gameboard;
pub mod settings;

pub use gameboard::{
    algorithms::{
        generate_batch, Algorithm, EllersAlgorithm, MazeGenerator, Random, RecursiveBacktracker,
        RndKruskals,
    },
    CellState, CellWall, Maze, MazeError, SerializableMaze, SerializeError,
};
