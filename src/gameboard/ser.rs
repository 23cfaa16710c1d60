use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gameboard::{
    cell::CellState,
    maze::{Maze, MazeError},
};

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Invalid maze: {0}")]
    Maze(#[from] MazeError),
    #[error("Maze has {0} rows, expected {1}")]
    RowCount(usize, usize),
    #[error("Row {0} has {1} cells, expected {2}")]
    RowLength(usize, usize, usize),
    #[error("Cell at ({0}, {1}) has unknown state {2:#x}")]
    UnknownState(usize, usize, u8),
    #[error("Walls of the maze don't match between neighbors or open the boundary")]
    Inconsistent,
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Write error: {0}")]
    Write(#[from] ron::Error),
}

/// Plain representation of a maze, each cell stored as its raw nibble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableMaze {
    #[serde(default)]
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<u8>>,
}

impl SerializableMaze {
    pub fn new(maze: &Maze, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: maze.width(),
            height: maze.height(),
            cells: maze
                .rows()
                .map(|row| row.iter().map(|state| state.bits()).collect())
                .collect(),
        }
    }

    pub fn to_ron(&self) -> Result<String, SerializeError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn from_ron(text: &str) -> Result<Self, SerializeError> {
        Ok(ron::from_str(text)?)
    }

    /// Rebuilds the maze, refusing data that breaks any wall invariant.
    pub fn into_maze(self) -> Result<Maze, SerializeError> {
        if self.width == 0 || self.height == 0 {
            let (width, height) = (self.width as i32, self.height as i32);
            return Err(MazeError::InvalidSize(width, height).into());
        }

        // declared size is only trusted once the rows back it up
        if self.cells.len() != self.height {
            return Err(SerializeError::RowCount(self.cells.len(), self.height));
        }

        for (row, states) in self.cells.iter().enumerate() {
            if states.len() != self.width {
                return Err(SerializeError::RowLength(row, states.len(), self.width));
            }
        }

        let mut cells = Maze::new(self.width as i32, self.height as i32)?.cells;

        for (row, states) in self.cells.iter().enumerate() {
            for (col, &bits) in states.iter().enumerate() {
                cells[(row, col)] = CellState::from_bits(bits)
                    .ok_or(SerializeError::UnknownState(row, col, bits))?;
            }
        }

        let maze = Maze { cells };
        if !maze.is_consistent() {
            return Err(SerializeError::Inconsistent);
        }

        Ok(maze)
    }
}

impl From<&Maze> for SerializableMaze {
    fn from(maze: &Maze) -> Self {
        Self::new(maze, String::new())
    }
}

impl TryFrom<SerializableMaze> for Maze {
    type Error = SerializeError;

    fn try_from(value: SerializableMaze) -> Result<Self, Self::Error> {
        value.into_maze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Maze {
        let mut maze = Maze::new(3, 2).unwrap();
        maze.tear_down_wall(0, 0, CellState::OPEN_SOUTH_EAST).unwrap();
        maze.tear_down_wall(1, 1, CellState::OPEN_EAST).unwrap();
        maze.tear_down_wall(0, 2, CellState::OPEN_SOUTH).unwrap();
        maze
    }

    #[test]
    fn through_ron() {
        let maze = sample();
        let text = SerializableMaze::new(&maze, "sample").to_ron().unwrap();
        let loaded = SerializableMaze::from_ron(&text).unwrap();

        assert_eq!(loaded.title, "sample");
        assert_eq!(loaded.cells[0], vec![0x6, 0x1, 0x2]);
        assert_eq!(Maze::try_from(loaded).unwrap(), maze);
    }

    #[test]
    fn rejects_broken_data() {
        let mut data = SerializableMaze::from(&sample());
        data.cells[0][0] = 0x4; // south opening no longer mirrored
        assert!(matches!(data.into_maze(), Err(SerializeError::Inconsistent)));

        let mut data = SerializableMaze::from(&sample());
        data.cells[1][0] = 0x18;
        assert!(matches!(
            data.into_maze(),
            Err(SerializeError::UnknownState(1, 0, 0x18))
        ));

        let mut data = SerializableMaze::from(&sample());
        data.cells[1].pop();
        assert!(matches!(
            data.into_maze(),
            Err(SerializeError::RowLength(1, 2, 3))
        ));

        let mut data = SerializableMaze::from(&sample());
        data.width = 0;
        assert!(matches!(
            data.into_maze(),
            Err(SerializeError::Maze(MazeError::InvalidSize(0, 2)))
        ));
    }

    #[test]
    fn declared_size_needs_matching_rows() {
        let data =
            SerializableMaze::from_ron("(width: 2000000000, height: 2000000000, cells: [])")
                .unwrap();
        assert!(matches!(
            data.into_maze(),
            Err(SerializeError::RowCount(0, 2000000000))
        ));

        let data = SerializableMaze::from_ron("(width: 4000000000, height: 1, cells: [[0, 0]])")
            .unwrap();
        assert!(matches!(
            data.into_maze(),
            Err(SerializeError::RowLength(0, 2, 4000000000))
        ));
    }

    #[test]
    fn missing_title_defaults() {
        let loaded = SerializableMaze::from_ron("(width: 1, height: 1, cells: [[0]])").unwrap();

        assert!(loaded.title.is_empty());
        assert_eq!(loaded.into_maze().unwrap(), Maze::new(1, 1).unwrap());
    }
}
