use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// State of a single cell, one bit per direction (MSB to LSB: N E S W).
    ///
    /// A set bit means the wall in that direction was torn down.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellState: u8 {
        const OPEN_WEST = 0x1;
        const OPEN_SOUTH = 0x2;
        const OPEN_EAST = 0x4;
        const OPEN_NORTH = 0x8;
    }
}

impl CellState {
    pub const NO_OPEN: Self = Self::empty();
    pub const OPEN_SOUTH_WEST: Self = Self::OPEN_SOUTH.union(Self::OPEN_WEST);
    pub const OPEN_EAST_WEST: Self = Self::OPEN_EAST.union(Self::OPEN_WEST);
    pub const OPEN_SOUTH_EAST: Self = Self::OPEN_SOUTH.union(Self::OPEN_EAST);
    pub const OPEN_EAST_SOUTH_WEST: Self = Self::OPEN_EAST.union(Self::OPEN_SOUTH_WEST);
    pub const OPEN_NORTH_WEST: Self = Self::OPEN_NORTH.union(Self::OPEN_WEST);
    pub const OPEN_NORTH_SOUTH: Self = Self::OPEN_NORTH.union(Self::OPEN_SOUTH);
    pub const OPEN_NORTH_SOUTH_WEST: Self = Self::OPEN_NORTH_SOUTH.union(Self::OPEN_WEST);
    pub const OPEN_NORTH_EAST: Self = Self::OPEN_NORTH.union(Self::OPEN_EAST);
    pub const OPEN_NORTH_EAST_WEST: Self = Self::OPEN_NORTH_EAST.union(Self::OPEN_WEST);
    pub const OPEN_NORTH_EAST_SOUTH: Self = Self::OPEN_NORTH_EAST.union(Self::OPEN_SOUTH);
    pub const OPEN_NORTH_EAST_SOUTH_WEST: Self = Self::all();

    /// Walls which are open in this state, in [`CellWall::get_in_order`] order.
    pub fn walls(self) -> impl Iterator<Item = CellWall> {
        CellWall::get_in_order()
            .into_iter()
            .filter(move |wall| self.contains(wall.to_state()))
    }

    pub fn is_open(self, wall: CellWall) -> bool {
        self.contains(wall.to_state())
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NO_OPEN");
        }

        write!(f, "OPEN")?;
        for wall in self.walls() {
            write!(f, "_{}", wall.label())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWall {
    North,
    East,
    South,
    West,
}

impl CellWall {
    /// Offset of the neighbor behind this wall, as `(row, col)` delta.
    pub fn to_coord(&self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    pub fn reverse_wall(&self) -> CellWall {
        use CellWall::*;

        match self {
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    pub fn to_state(&self) -> CellState {
        match self {
            Self::North => CellState::OPEN_NORTH,
            Self::East => CellState::OPEN_EAST,
            Self::South => CellState::OPEN_SOUTH,
            Self::West => CellState::OPEN_WEST,
        }
    }

    pub fn get_in_order() -> [CellWall; 4] {
        use CellWall::*;
        [North, East, South, West]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }
}

impl From<CellWall> for CellState {
    fn from(wall: CellWall) -> Self {
        wall.to_state()
    }
}
