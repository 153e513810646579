use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, VecDeque},
};

use super::Solution;
use crate::maze::{Direction, Maze, PathMark};

/// A frontier entry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrackedCell {
    /// Index of the cell in the maze
    cell: usize,
    /// The cell from which this cell was reached
    parent: Option<usize>,
    /// Cost to reach this cell from the start
    traveling_cost: usize,
    /// Estimated cost to reach the goal from this cell (for A* algorithm)
    heuristic_cost: usize,
    /// Insertion counter, breaks the remaining ties first-in first-out
    order: usize,
}

impl TrackedCell {
    fn total_cost(&self) -> usize {
        self.traveling_cost + self.heuristic_cost
    }
}

impl Ord for TrackedCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cost()
            .cmp(&other.total_cost())
            .then(self.heuristic_cost.cmp(&other.heuristic_cost))
            .then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for TrackedCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TrackedCell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TrackedCell {}

/// Discovered-but-not-yet-expanded cells. The pop order is the whole difference between
/// depth-first, breadth-first and best-first search.
pub(crate) trait Frontier {
    fn push(&mut self, cell: TrackedCell);
    fn pop(&mut self) -> Option<TrackedCell>;
}

/// Last in, first out.
impl Frontier for Vec<TrackedCell> {
    fn push(&mut self, cell: TrackedCell) {
        Vec::push(self, cell);
    }

    fn pop(&mut self) -> Option<TrackedCell> {
        Vec::pop(self)
    }
}

/// First in, first out.
impl Frontier for VecDeque<TrackedCell> {
    fn push(&mut self, cell: TrackedCell) {
        self.push_back(cell);
    }

    fn pop(&mut self) -> Option<TrackedCell> {
        self.pop_front()
    }
}

/// Lowest cost first. `Reverse` turns the max-heap into a min-heap.
impl Frontier for BinaryHeap<Reverse<TrackedCell>> {
    fn push(&mut self, cell: TrackedCell) {
        BinaryHeap::push(self, Reverse(cell));
    }

    fn pop(&mut self) -> Option<TrackedCell> {
        BinaryHeap::pop(self).map(|Reverse(cell)| cell)
    }
}

/// Manhattan distance between two cells.
pub(crate) fn manhattan(maze: &Maze, a: usize, b: usize) -> usize {
    let (row_a, col_a) = maze.row_col(a);
    let (row_b, col_b) = maze.row_col(b);
    row_a.abs_diff(row_b) + col_a.abs_diff(col_b)
}

/// Frontier-driven search from the start cell to the goal cell.
///
/// A popped cell that is already visited is skipped. Otherwise it is marked visited and its
/// parent is written into the path overlay. Reaching the goal rebuilds the route from those
/// parent marks.
pub(crate) fn traverse<F, H>(maze: &mut Maze, mut frontier: F, heuristic: H) -> Solution
where
    F: Frontier,
    H: Fn(&Maze, usize) -> usize,
{
    let (start, goal) = (maze.start(), maze.goal());
    let mut order = 0;
    let mut expanded = 0;

    frontier.push(TrackedCell {
        cell: start,
        parent: None,
        traveling_cost: 0,
        heuristic_cost: heuristic(maze, start),
        order,
    });

    while let Some(current) = frontier.pop() {
        if maze.is_visited(current.cell) {
            continue;
        }
        maze.set_visited(current.cell);
        maze.mark_path(current.cell, PathMark::Parent(current.parent));
        expanded += 1;
        maze.step();

        if current.cell == goal {
            let route = mark_route(maze, goal);
            return Solution::reached(route, expanded);
        }

        for direction in Direction::ALL {
            let Some(next) = maze.open_neighbor(current.cell, direction) else {
                continue;
            };
            if maze.is_visited(next) {
                continue;
            }
            order += 1;
            frontier.push(TrackedCell {
                cell: next,
                parent: Some(current.cell),
                traveling_cost: current.traveling_cost + 1,
                heuristic_cost: heuristic(maze, next),
                order,
            });
        }
    }

    Solution::unreached(expanded)
}

/// Follow the parent marks back from `goal`, then mark that chain as the route.
/// Returns the route in start-to-goal order.
fn mark_route(maze: &mut Maze, goal: usize) -> Vec<usize> {
    let mut route = vec![goal];
    let mut current = goal;
    while let PathMark::Parent(Some(parent)) = maze.path_mark(current) {
        route.push(parent);
        current = parent;
    }
    route.reverse();

    for &cell in &route {
        maze.mark_path(cell, PathMark::OnPath);
        maze.step();
    }
    route
}

pub fn solve_dfs(maze: &mut Maze) -> Solution {
    traverse(maze, Vec::<TrackedCell>::new(), |_, _| 0)
}

pub fn solve_bfs(maze: &mut Maze) -> Solution {
    traverse(maze, VecDeque::<TrackedCell>::new(), |_, _| 0)
}

pub fn solve_dijkstra(maze: &mut Maze) -> Solution {
    let frontier: BinaryHeap<Reverse<TrackedCell>> = BinaryHeap::new();
    traverse(maze, frontier, |_, _| 0)
}

pub fn solve_astar(maze: &mut Maze) -> Solution {
    let goal = maze.goal();
    let frontier: BinaryHeap<Reverse<TrackedCell>> = BinaryHeap::new();
    traverse(maze, frontier, move |maze, cell| manhattan(maze, cell, goal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked(cell: usize, traveling_cost: usize, heuristic_cost: usize, order: usize) -> TrackedCell {
        TrackedCell {
            cell,
            parent: None,
            traveling_cost,
            heuristic_cost,
            order,
        }
    }

    #[test]
    fn test_priority_order() {
        let mut heap: BinaryHeap<Reverse<TrackedCell>> = BinaryHeap::new();
        Frontier::push(&mut heap, tracked(1, 4, 2, 0));
        Frontier::push(&mut heap, tracked(2, 2, 3, 1));
        Frontier::push(&mut heap, tracked(3, 3, 2, 2));
        Frontier::push(&mut heap, tracked(4, 1, 3, 3));
        // Totals: 6, 5, 5, 4
        let popped = std::iter::from_fn(|| Frontier::pop(&mut heap))
            .map(|t| t.cell)
            .collect::<Vec<_>>();
        // Equal totals prefer the smaller heuristic
        assert_eq!(popped, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_priority_ties_are_fifo() {
        let mut heap: BinaryHeap<Reverse<TrackedCell>> = BinaryHeap::new();
        Frontier::push(&mut heap, tracked(7, 1, 1, 5));
        Frontier::push(&mut heap, tracked(8, 1, 1, 2));
        assert_eq!(Frontier::pop(&mut heap).map(|t| t.cell), Some(8));
    }

    #[test]
    fn test_stack_and_queue() {
        let mut stack: Vec<TrackedCell> = Vec::new();
        let mut queue: VecDeque<TrackedCell> = VecDeque::new();
        for cell in 0..3 {
            Frontier::push(&mut stack, tracked(cell, 0, 0, cell));
            Frontier::push(&mut queue, tracked(cell, 0, 0, cell));
        }
        assert_eq!(Frontier::pop(&mut stack).map(|t| t.cell), Some(2));
        assert_eq!(Frontier::pop(&mut queue).map(|t| t.cell), Some(0));
    }

    #[test]
    fn test_manhattan() {
        let maze = Maze::new(5, None).unwrap();
        assert_eq!(manhattan(&maze, 0, 24), 8);
        assert_eq!(manhattan(&maze, 7, 7), 0);
        assert_eq!(manhattan(&maze, 4, 20), 8);
        assert_eq!(manhattan(&maze, 12, 13), 1);
    }

    #[test]
    fn test_parent_marks_left_behind() {
        // Only the top row of a 4x4 grid is connected
        let mut maze = Maze::from_passages(4, &[(0, 1), (1, 2), (2, 3)], None).unwrap();
        let solution = solve_bfs(&mut maze);
        assert!(!solution.goal_reached);
        assert_eq!(solution.expanded, 4);
        assert_eq!(maze.path_mark(0), PathMark::Parent(None));
        assert_eq!(maze.path_mark(3), PathMark::Parent(Some(2)));
    }
}
