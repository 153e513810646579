use rand::{Rng, rngs::StdRng};

use crate::{
    error::Result,
    maze::{Maze, PathMark},
};

/// Wilson's algorithm. The visited overlay is the set of cells already in the tree.
///
/// From every cell outside the tree, a random walk runs until it steps onto the tree. Whenever
/// the walk steps onto one of its own cells, everything after the first occurrence of that cell
/// is erased. The surviving walk is then carved into the tree. The live walk is shown in the
/// path overlay.
pub fn wilson(maze: &mut Maze, rng: &mut StdRng) -> Result<()> {
    let start = maze.start();
    maze.set_visited(start);

    // Position of each cell in the current walk
    let mut walk_index: Vec<Option<usize>> = vec![None; maze.cell_count()];
    let mut walk: Vec<usize> = Vec::new();

    for origin in 0..maze.cell_count() {
        if maze.is_visited(origin) {
            continue;
        }

        walk.clear();
        walk.push(origin);
        walk_index[origin] = Some(0);
        maze.mark_path(origin, PathMark::OnPath);

        let mut current = origin;
        while !maze.is_visited(current) {
            let Some(next) = random_neighbor(maze, current, rng) else {
                break;
            };

            match walk_index[next] {
                Some(loop_start) => {
                    // Erase the loop, keep `next` as the walk's head
                    for erased in walk.drain(loop_start + 1..) {
                        walk_index[erased] = None;
                        maze.mark_path(erased, PathMark::Unmarked);
                    }
                }
                None => {
                    walk_index[next] = Some(walk.len());
                    walk.push(next);
                    if !maze.is_visited(next) {
                        maze.mark_path(next, PathMark::OnPath);
                    }
                }
            }
            current = next;
            maze.step();
        }

        // The walk ends on a tree cell: commit it
        for pair in walk.windows(2) {
            maze.carve_between(pair[0], pair[1])?;
        }
        for &cell in &walk {
            walk_index[cell] = None;
            maze.set_visited(cell);
            maze.mark_path(cell, PathMark::Unmarked);
        }
        maze.step();
    }
    Ok(())
}

/// A uniformly chosen in-bounds neighbor.
fn random_neighbor(maze: &Maze, cell: usize, rng: &mut StdRng) -> Option<usize> {
    let mut neighbors = [0; 4];
    let mut count = 0;
    for (_, neighbor) in maze.neighbors(cell) {
        neighbors[count] = neighbor;
        count += 1;
    }
    (count > 0).then(|| neighbors[rng.random_range(0..count)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::tests::assert_perfect;
    use rand::SeedableRng;

    #[test]
    fn test_random_neighbor_is_adjacent() {
        let maze = Maze::new(4, None).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let corner = random_neighbor(&maze, 0, &mut rng).unwrap();
            assert!(corner == 1 || corner == 4);
            let middle = random_neighbor(&maze, 5, &mut rng).unwrap();
            assert!([1, 4, 6, 9].contains(&middle));
        }
        let single = Maze::new(1, None).unwrap();
        assert_eq!(random_neighbor(&single, 0, &mut rng), None);
    }

    #[test]
    fn test_wilson_spanning_tree() {
        for seed in 0..10 {
            let mut maze = Maze::new(12, None).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            wilson(&mut maze, &mut rng).unwrap();
            assert!((0..maze.cell_count()).all(|c| maze.is_visited(c)));
            assert_perfect(&maze);
        }
    }

    #[test]
    fn test_walk_trail_is_cleared() {
        let mut maze = Maze::new(6, None).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        wilson(&mut maze, &mut rng).unwrap();
        assert!((0..maze.cell_count()).all(|c| maze.path_mark(c) == PathMark::Unmarked));
    }

    #[test]
    fn test_tree_rooted_anywhere() {
        let mut maze = Maze::with_endpoints(5, 12, 0, None).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        wilson(&mut maze, &mut rng).unwrap();
        assert_eq!(maze.open_passages(), 24);
    }
}
