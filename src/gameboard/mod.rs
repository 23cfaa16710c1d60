pub mod maze;
pub use maze::{Maze, MazeError};
pub mod cell;
pub use cell::{CellState, CellWall};
pub mod ser;
pub use ser::{SerializableMaze, SerializeError};

pub mod algorithms;
