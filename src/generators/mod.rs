use rand::{SeedableRng, rngs::StdRng};

mod dfs;
mod wilson;

use dfs::randomized_dfs;
use wilson::wilson;

use crate::{
    error::{MazeError, Result},
    maze::{Maze, grid::Phase},
};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Generator {
    /// Randomized depth-first carving. Long winding corridors.
    RandomDfs,
    /// Loop-erased random walks. Uniform over all spanning trees.
    Wilson,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::RandomDfs, Generator::Wilson];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RandomDfs => write!(f, "Randomized Depth-First Search"),
            Generator::Wilson => write!(f, "Wilson's Algorithm"),
        }
    }
}

/// Carve a perfect maze: the open walls form a spanning tree over every cell.
///
/// Both overlays are cleared once carving is done.
///
/// # Errors
/// [`MazeError::AlreadyGenerated`] if the maze was generated before and its walls were not reset.
pub fn generate_maze(maze: &mut Maze, generator: Generator, seed: Option<u64>) -> Result<()> {
    if maze.is_generated() {
        return Err(MazeError::AlreadyGenerated);
    }
    tracing::debug!(
        "Generating {}x{} maze with {} (seed: {:?})",
        maze.size(),
        maze.size(),
        generator,
        seed
    );

    let mut rng = get_rng(seed);
    maze.reset_visited();
    maze.reset_path();
    match generator {
        Generator::RandomDfs => randomized_dfs(maze, &mut rng)?,
        Generator::Wilson => wilson(maze, &mut rng)?,
    }
    maze.reset_visited();
    maze.reset_path();
    maze.set_generated();
    maze.complete(Phase::Generated(generator));

    tracing::info!(
        "{} carved {} passages over {} cells",
        generator,
        maze.open_passages(),
        maze.cell_count()
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Flood fill over open walls from the start cell.
    /// Returns the number of cells reached and the number of tree edges used.
    pub(crate) fn flood_fill(maze: &Maze) -> (usize, usize) {
        let mut seen = vec![false; maze.cell_count()];
        let mut queue = VecDeque::from([maze.start()]);
        seen[maze.start()] = true;
        let (mut reached, mut edges) = (1, 0);
        while let Some(cell) = queue.pop_front() {
            for (_, neighbor) in maze.neighbors(cell) {
                if maze.is_open(cell, neighbor) && !seen[neighbor] {
                    seen[neighbor] = true;
                    reached += 1;
                    edges += 1;
                    queue.push_back(neighbor);
                }
            }
        }
        (reached, edges)
    }

    pub(crate) fn assert_perfect(maze: &Maze) {
        let cells = maze.cell_count();
        assert_eq!(maze.open_passages(), cells - 1, "spanning tree has N² - 1 edges");
        let (reached, edges) = flood_fill(maze);
        assert_eq!(reached, cells, "every cell is reachable");
        assert_eq!(edges, cells - 1);
        // Border walls never open
        for col in 0..maze.size() {
            assert!(!maze.walls(col).open_top);
        }
        for row in 0..maze.size() {
            assert!(!maze.walls(row * maze.size()).open_left);
        }
    }

    #[test]
    fn test_generators_build_spanning_trees() {
        for generator in Generator::ALL {
            for size in [1, 2, 3, 7, 16] {
                for seed in 0..4 {
                    let mut maze = Maze::new(size, None).unwrap();
                    generate_maze(&mut maze, generator, Some(seed)).unwrap();
                    assert!(maze.is_generated());
                    assert_perfect(&maze);
                }
            }
        }
    }

    #[test]
    fn test_overlays_cleared_after_generation() {
        for generator in Generator::ALL {
            let mut maze = Maze::new(8, None).unwrap();
            generate_maze(&mut maze, generator, Some(7)).unwrap();
            assert!((0..maze.cell_count()).all(|c| !maze.is_visited(c)));
            assert!(
                (0..maze.cell_count())
                    .all(|c| maze.path_mark(c) == crate::maze::PathMark::Unmarked)
            );
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        for generator in Generator::ALL {
            let mut a = Maze::new(10, None).unwrap();
            let mut b = Maze::new(10, None).unwrap();
            generate_maze(&mut a, generator, Some(42)).unwrap();
            generate_maze(&mut b, generator, Some(42)).unwrap();
            assert!((0..a.cell_count()).all(|c| a.walls(c) == b.walls(c)));
        }
    }

    #[test]
    fn test_generate_twice_requires_reset() {
        let mut maze = Maze::new(5, None).unwrap();
        generate_maze(&mut maze, Generator::Wilson, Some(1)).unwrap();
        assert_eq!(
            generate_maze(&mut maze, Generator::RandomDfs, Some(1)),
            Err(MazeError::AlreadyGenerated)
        );
        maze.reset_walls();
        generate_maze(&mut maze, Generator::RandomDfs, Some(1)).unwrap();
        assert_perfect(&maze);
    }

    #[test]
    fn test_generation_is_observable() {
        let (tx, rx) = std::sync::mpsc::sync_channel(100_000);
        let mut maze = Maze::new(6, Some(tx)).unwrap();
        generate_maze(&mut maze, Generator::RandomDfs, Some(3)).unwrap();
        drop(maze);

        let events = rx.iter().collect::<Vec<_>>();
        let steps = events
            .iter()
            .filter(|e| matches!(e, crate::maze::grid::GridEvent::Step))
            .count();
        // One step per carved passage
        assert_eq!(steps, 35);
        assert_eq!(
            events.last(),
            Some(&crate::maze::grid::GridEvent::Completed(Phase::Generated(
                Generator::RandomDfs
            )))
        );
    }
}
