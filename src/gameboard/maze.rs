use std::{collections::VecDeque, fmt};

use hashbrown::HashSet;
use thiserror::Error;

use crate::array::{Array2D, Coord};
use crate::gameboard::cell::{CellState, CellWall};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("Invalid maze size {0}x{1}, both dimensions must be positive")]
    InvalidSize(i32, i32),
    #[error("Can't {2} for cell at ({0}, {1})")]
    CantTearWall(usize, usize, CellState),
}

/// Rectangular grid of cells, row 0 is the north edge and column 0 the west edge.
///
/// Walls are always torn in pairs, so an opening in a cell implies the matching
/// opening in its neighbor. The outer boundary can never be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub(crate) cells: Array2D<CellState>,
}

impl Maze {
    /// Creates a fully walled maze.
    pub fn new(width: i32, height: i32) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidSize(width, height));
        }

        Ok(Maze {
            cells: Array2D::new(CellState::NO_OPEN, width as usize, height as usize),
        })
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_state(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get((row, col)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.rows()
    }

    pub fn is_in_bounds(&self, row: isize, col: isize) -> bool {
        0 <= row && row < self.height() as isize && 0 <= col && col < self.width() as isize
    }

    /// Coordinate of the neighbor behind `wall`, if there is one.
    fn neighbor(&self, cell: Coord, wall: CellWall) -> Option<Coord> {
        let (dr, dc) = wall.to_coord();
        let (row, col) = (cell.0 as isize + dr, cell.1 as isize + dc);

        (self.is_in_bounds(cell.0 as isize, cell.1 as isize) && self.is_in_bounds(row, col))
            .then(|| (row as usize, col as usize))
    }

    pub fn move_towards(&self, row: usize, col: usize, wall: CellWall) -> Result<Coord, MazeError> {
        self.neighbor((row, col), wall)
            .ok_or(MazeError::CantTearWall(row, col, wall.to_state()))
    }

    /// Translates every direction in `mask` into the coordinate of the neighbor in that
    /// direction. Doesn't look at the walls at all.
    pub fn move_to_opening(
        &self,
        row: usize,
        col: usize,
        mask: CellState,
    ) -> Result<HashSet<Coord>, MazeError> {
        mask.walls()
            .map(|wall| {
                self.neighbor((row, col), wall)
                    .ok_or(MazeError::CantTearWall(row, col, mask))
            })
            .collect()
    }

    /// Coordinates of all cells sharing a wall with the given one, open or not.
    pub fn get_adjacent(&self, row: usize, col: usize) -> HashSet<Coord> {
        CellWall::get_in_order()
            .into_iter()
            .filter_map(|wall| self.neighbor((row, col), wall))
            .collect()
    }

    /// Opens every direction in `mask` for the given cell and its neighbors.
    ///
    /// The effect is cumulative, opening an already open wall does nothing. Either the
    /// whole mask is applied, or nothing is when some direction points off the grid.
    pub fn tear_down_wall(
        &mut self,
        row: usize,
        col: usize,
        mask: CellState,
    ) -> Result<(), MazeError> {
        let neighbors = mask
            .walls()
            .map(|wall| Some((wall, self.neighbor((row, col), wall)?)))
            .collect::<Option<Vec<_>>>()
            .ok_or(MazeError::CantTearWall(row, col, mask))?;

        if let Some(cell) = self.cells.get_mut((row, col)) {
            *cell |= mask;
        } else {
            // only reachable with an empty mask outside of the grid
            return Ok(());
        }

        for (wall, pos) in neighbors {
            self.cells[pos] |= wall.reverse_wall().to_state();
        }

        Ok(())
    }

    pub fn is_open(&self, row: usize, col: usize, wall: CellWall) -> bool {
        self.cell_state(row, col)
            .is_some_and(|state| state.is_open(wall))
    }

    /// Number of torn internal walls, each counted once.
    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|state| {
                state
                    .intersection(CellState::OPEN_SOUTH_EAST)
                    .bits()
                    .count_ones() as usize
            })
            .sum()
    }

    /// Checks that no boundary wall is open and that every opening is mirrored by the neighbor.
    pub fn is_consistent(&self) -> bool {
        self.cells.iter_pos().all(|pos| {
            self.cells[pos].walls().all(|wall| {
                self.neighbor(pos, wall)
                    .is_some_and(|other| self.cells[other].is_open(wall.reverse_wall()))
            })
        })
    }

    /// Checks that every cell can be reached from the north-west corner through openings.
    pub fn is_connected(&self) -> bool {
        let mut visited = Array2D::new(false, self.width(), self.height());
        let mut queue = VecDeque::from([(0, 0)]);
        visited[(0, 0)] = true;
        let mut reached = 1;

        while let Some(pos) = queue.pop_front() {
            for wall in self.cells[pos].walls() {
                let Some(next) = self.neighbor(pos, wall) else {
                    continue;
                };

                if !visited[next] {
                    visited[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == self.cell_count()
    }

    /// A perfect maze is a spanning tree, connected and without any cycle.
    pub fn is_perfect(&self) -> bool {
        self.is_consistent()
            && self.open_edge_count() + 1 == self.cell_count()
            && self.is_connected()
    }

    pub fn render(&self) -> String {
        let width = self.width();
        let mut out = String::with_capacity((width * 2 + 2) * (self.height() + 1));

        out.push(' ');
        out.extend(std::iter::repeat('_').take(width * 2 - 1));
        out.push('\n');

        for row in self.rows() {
            out.push('|');
            for (col, state) in row.iter().enumerate() {
                out.push(if state.is_open(CellWall::South) { ' ' } else { '_' });

                if state.is_open(CellWall::East) {
                    let next = row.get(col + 1).copied().unwrap_or_default();
                    let floor = (*state | next).is_open(CellWall::South);
                    out.push(if floor { ' ' } else { '_' });
                } else {
                    out.push('|');
                }
            }
            out.push('\n');
        }

        out
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
