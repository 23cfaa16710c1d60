use hashbrown::HashSet;
use rand::Rng as _;

use super::{Maze, MazeError, MazeGenerator, Random};
use crate::array::Coord;
use crate::gameboard::CellWall;

/// Randomized depth first search with an explicit stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveBacktracker;

/// Outcome of a single attempt to carve from a cell.
enum Carve {
    Opened(Coord),
    Blocked,
}

impl MazeGenerator for RecursiveBacktracker {
    fn generate_with(&self, width: i32, height: i32, rng: &mut Random) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(width, height)?;
        let cell_count = maze.cell_count();

        let mut visited = HashSet::with_capacity(cell_count);
        let mut stack = Vec::with_capacity(cell_count);

        let mut current = (rng.gen_range(0..maze.height()), rng.gen_range(0..maze.width()));
        visited.insert(current);
        stack.push(current);

        loop {
            // backtrack until there is somewhere to go
            while are_neighbors_visited(&maze, current, &visited) {
                match stack.pop() {
                    Some(previous) => current = previous,
                    None => {
                        log::trace!("Visited {} of {} cells", visited.len(), cell_count);
                        return Ok(maze);
                    }
                }
            }

            let next = loop {
                if let Carve::Opened(next) = carve_randomly(&mut maze, current, &visited, rng) {
                    break next;
                }
            };

            advance(&maze, &mut stack, &mut visited, current, next);
            current = next;
        }
    }
}

/// Tries to tear a random wall of `cell`, leading into an unvisited cell.
fn carve_randomly(
    maze: &mut Maze,
    cell: Coord,
    visited: &HashSet<Coord>,
    rng: &mut Random,
) -> Carve {
    let wall = CellWall::get_in_order()[rng.gen_range(0..4)];
    let (row, col) = cell;

    let next = match maze.move_towards(row, col, wall) {
        Ok(next) if !visited.contains(&next) => next,
        _ => return Carve::Blocked,
    };

    match maze.tear_down_wall(row, col, wall.to_state()) {
        Ok(()) => Carve::Opened(next),
        Err(_) => Carve::Blocked,
    }
}

/// Moves the search into `next`, keeping `current` only if it still has somewhere to go.
fn advance(
    maze: &Maze,
    stack: &mut Vec<Coord>,
    visited: &mut HashSet<Coord>,
    current: Coord,
    next: Coord,
) {
    visited.insert(next);
    if !are_neighbors_visited(maze, current, visited) {
        stack.push(current);
    }
    stack.push(next);
}

fn are_neighbors_visited(maze: &Maze, cell: Coord, visited: &HashSet<Coord>) -> bool {
    maze.get_adjacent(cell.0, cell.1)
        .iter()
        .all(|pos| visited.contains(pos))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::gameboard::CellState;

    #[test]
    fn carving_only_enters_unvisited_cells() {
        let mut maze = Maze::new(2, 1).unwrap();
        let mut rng = Random::seed_from_u64(3);
        let visited = [(0, 0), (0, 1)].into_iter().collect();

        for _ in 0..32 {
            assert!(matches!(
                carve_randomly(&mut maze, (0, 0), &visited, &mut rng),
                Carve::Blocked
            ));
        }
        assert_eq!(maze, Maze::new(2, 1).unwrap());
    }

    #[test]
    fn carving_finds_the_only_way_out() {
        let mut maze = Maze::new(3, 3).unwrap();
        let mut rng = Random::seed_from_u64(11);
        let visited = [(0, 0), (1, 1), (0, 1)].into_iter().collect();

        let next = loop {
            if let Carve::Opened(next) = carve_randomly(&mut maze, (0, 0), &visited, &mut rng) {
                break next;
            }
        };

        assert_eq!(next, (1, 0));
        assert_eq!(maze.cell_state(0, 0), Some(CellState::OPEN_SOUTH));
        assert_eq!(maze.cell_state(1, 0), Some(CellState::OPEN_NORTH));
    }

    #[test]
    fn exhausted_cells_are_not_stacked_again() {
        let maze = Maze::new(2, 1).unwrap();
        let mut stack = vec![(0, 0)];
        let mut visited = [(0, 0)].into_iter().collect();

        advance(&maze, &mut stack, &mut visited, (0, 0), (0, 1));

        assert_eq!(stack, vec![(0, 0), (0, 1)]);
        assert!(visited.contains(&(0, 1)));

        let maze = Maze::new(3, 1).unwrap();
        let mut stack = vec![(0, 1)];
        let mut visited = [(0, 1)].into_iter().collect();

        advance(&maze, &mut stack, &mut visited, (0, 1), (0, 0));

        assert_eq!(stack, vec![(0, 1), (0, 1), (0, 0)]);
    }

    #[test]
    fn long_corridor() {
        let maze = RecursiveBacktracker.generate_seeded(1, 12, 5).unwrap();

        assert!(maze.is_perfect());
        assert_eq!(maze.cell_state(0, 0), Some(CellState::OPEN_SOUTH));
        assert_eq!(maze.cell_state(11, 0), Some(CellState::OPEN_NORTH));
        for row in 1..11 {
            assert_eq!(maze.cell_state(row, 0), Some(CellState::OPEN_NORTH_SOUTH));
        }
    }

    #[test]
    fn large_maze() {
        let maze = RecursiveBacktracker.generate_seeded(60, 40, 1).unwrap();
        assert!(maze.is_perfect());
    }
}
