use rand::seq::SliceRandom;

use super::{Maze, MazeError, MazeGenerator, Random};
use crate::array::{Array2D, Coord};
use crate::gameboard::CellWall::{self, *};

/// Randomized Kruskal's algorithm, every internal wall is visited in random order and torn
/// when it separates two different components.
#[derive(Debug, Clone, Copy, Default)]
pub struct RndKruskals;

impl MazeGenerator for RndKruskals {
    fn generate_with(&self, width: i32, height: i32, rng: &mut Random) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(width, height)?;
        let (wu, hu) = (maze.width(), maze.height());

        let mut walls: Vec<(Coord, CellWall)> = Vec::with_capacity(2 * wu * hu);
        for row in 0..hu {
            for col in 0..wu {
                if col + 1 < wu {
                    walls.push(((row, col), East));
                }

                if row + 1 < hu {
                    walls.push(((row, col), South));
                }
            }
        }

        let mut sets = DisjointSets::new(wu, hu);
        let mut torn = 0;

        walls.shuffle(rng);
        while let Some((from, wall)) = walls.pop() {
            let Ok(to) = maze.move_towards(from.0, from.1, wall) else {
                continue;
            };

            if !sets.union(from, to) {
                continue;
            }

            if maze.tear_down_wall(from.0, from.1, wall.to_state()).is_ok() {
                torn += 1;
            }
        }

        log::trace!("Tore {} walls", torn);

        Ok(maze)
    }
}

/// Union-find over the cells of a grid.
struct DisjointSets {
    parents: Array2D<Coord>,
    ranks: Array2D<u8>,
}

impl DisjointSets {
    fn new(width: usize, height: usize) -> Self {
        let mut parents = Array2D::new((0, 0), width, height);
        let cells = parents.iter_pos().collect::<Vec<_>>();
        for pos in cells {
            parents[pos] = pos;
        }

        Self {
            parents,
            ranks: Array2D::new(0, width, height),
        }
    }

    fn find(&mut self, mut pos: Coord) -> Coord {
        while self.parents[pos] != pos {
            // path halving
            let grandparent = self.parents[self.parents[pos]];
            self.parents[pos] = grandparent;
            pos = grandparent;
        }

        pos
    }

    /// Joins the sets of both cells, returns `false` when they already were one set.
    fn union(&mut self, a: Coord, b: Coord) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }

        let (root, child) = if self.ranks[a] < self.ranks[b] { (b, a) } else { (a, b) };
        self.parents[child] = root;
        if self.ranks[root] == self.ranks[child] {
            self.ranks[root] = self.ranks[root].saturating_add(1);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_find() {
        let mut sets = DisjointSets::new(3, 2);

        assert!(sets.union((0, 0), (0, 1)));
        assert!(sets.union((1, 2), (0, 1)));
        assert!(!sets.union((1, 2), (0, 0)));
        assert_eq!(sets.find((0, 0)), sets.find((1, 2)));
        assert_ne!(sets.find((0, 0)), sets.find((1, 0)));
    }

    #[test]
    fn carves_spanning_tree() {
        for seed in 0..10 {
            let maze = RndKruskals.generate_seeded(15, 11, seed).unwrap();

            assert!(maze.is_perfect());
            assert_eq!(maze.open_edge_count(), 15 * 11 - 1);
        }
    }
}
