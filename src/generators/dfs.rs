use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    error::Result,
    maze::{Direction, Maze},
};

/// A cell on the carving stack with the directions it has left to try.
struct Frame {
    cell: usize,
    directions: [Direction; 4],
    cursor: usize,
}

impl Frame {
    fn new(cell: usize, rng: &mut StdRng) -> Self {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Frame {
            cell,
            directions,
            cursor: 0,
        }
    }

    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.directions.get(self.cursor).copied();
        self.cursor += 1;
        direction
    }
}

/// Randomized depth-first carving from the start cell, with an explicit stack.
///
/// Walking a shuffled direction list and skipping visited neighbors picks uniformly among the
/// unvisited ones. Only unvisited cells are carved into, so the result has no cycles.
pub fn randomized_dfs(maze: &mut Maze, rng: &mut StdRng) -> Result<()> {
    let start = maze.start();
    maze.set_visited(start);

    let mut stack = vec![Frame::new(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.next_direction() else {
            // Backtrack
            stack.pop();
            continue;
        };
        let cell = frame.cell;

        let Some(neighbor) = maze.neighbor_in_direction(cell, direction) else {
            continue;
        };
        if maze.is_visited(neighbor) {
            continue;
        }

        maze.carve_between(cell, neighbor)?;
        maze.set_visited(neighbor);
        maze.step();
        stack.push(Frame::new(neighbor, rng));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_single_cell_carves_nothing() {
        let mut maze = Maze::new(1, None).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        randomized_dfs(&mut maze, &mut rng).unwrap();
        assert_eq!(maze.open_passages(), 0);
        assert!(maze.is_visited(0));
    }

    #[test]
    fn test_visits_every_cell() {
        let mut maze = Maze::new(9, None).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        randomized_dfs(&mut maze, &mut rng).unwrap();
        assert!((0..maze.cell_count()).all(|c| maze.is_visited(c)));
        assert_eq!(maze.open_passages(), maze.cell_count() - 1);
    }

    #[test]
    fn test_large_maze_does_not_recurse() {
        // A long corridor-heavy carve; would be deep recursion if done recursively
        let mut maze = Maze::new(300, None).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        randomized_dfs(&mut maze, &mut rng).unwrap();
        assert_eq!(maze.open_passages(), maze.cell_count() - 1);
    }

    #[test]
    fn test_starts_from_custom_start() {
        let mut maze = Maze::with_endpoints(4, 5, 0, None).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        randomized_dfs(&mut maze, &mut rng).unwrap();
        assert_eq!(maze.open_passages(), 15);
    }
}
