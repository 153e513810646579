use std::collections::{HashMap, VecDeque};

use super::Solution;
use crate::maze::{Direction, Maze, PathMark};

/// One side of the bidirectional search.
struct Side {
    queue: VecDeque<usize>,
    /// Cells discovered by this side and the cell they were reached from
    parents: HashMap<usize, Option<usize>>,
}

impl Side {
    fn new(origin: usize) -> Self {
        Side {
            queue: VecDeque::from([origin]),
            parents: HashMap::from([(origin, None)]),
        }
    }

    /// Expand one cell. Returns `(own, other)` when an open neighbor `other` of the expanded
    /// cell `own` was already discovered by the other side.
    fn expand(&mut self, maze: &mut Maze, other: &Side) -> Option<(usize, usize)> {
        let cell = self.queue.pop_front()?;
        for direction in Direction::ALL {
            let Some(next) = maze.open_neighbor(cell, direction) else {
                continue;
            };
            if other.parents.contains_key(&next) {
                return Some((cell, next));
            }
            if self.parents.contains_key(&next) {
                continue;
            }
            self.parents.insert(next, Some(cell));
            self.queue.push_back(next);
            maze.set_visited(next);
        }
        None
    }

    /// The chain from `cell` back to this side's origin, `cell` first.
    fn chain(&self, cell: usize) -> Vec<usize> {
        let mut chain = vec![cell];
        let mut current = cell;
        while let Some(&Some(parent)) = self.parents.get(&current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }
}

/// Two breadth-first searches, one from the start and one from the goal, taking turns one
/// expansion at a time until they touch.
pub fn solve_bidirectional(maze: &mut Maze) -> Solution {
    let (start, goal) = (maze.start(), maze.goal());
    maze.set_visited(start);
    maze.set_visited(goal);

    if start == goal {
        maze.mark_path(start, PathMark::OnPath);
        return Solution::reached(vec![start], 0);
    }

    let mut forward = Side::new(start);
    let mut backward = Side::new(goal);
    let mut expanded = 0;

    let meeting = loop {
        if forward.queue.is_empty() || backward.queue.is_empty() {
            break None;
        }

        expanded += 1;
        if let Some((near, far)) = forward.expand(maze, &backward) {
            break Some((near, far));
        }
        expanded += 1;
        if let Some((near, far)) = backward.expand(maze, &forward) {
            break Some((far, near));
        }
        maze.step();
    };

    let Some((forward_cell, backward_cell)) = meeting else {
        return Solution::unreached(expanded);
    };

    let mut route = forward.chain(forward_cell);
    route.reverse();
    route.extend(backward.chain(backward_cell));

    for &cell in &route {
        maze.mark_path(cell, PathMark::OnPath);
        maze.step();
    }
    Solution::reached(route, expanded)
}
