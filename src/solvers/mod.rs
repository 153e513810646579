mod bidirectional;
mod search;
mod wall_follower;

use bidirectional::solve_bidirectional;
use search::{solve_astar, solve_bfs, solve_dfs, solve_dijkstra};
use wall_follower::solve_wall_follower;

use crate::{
    error::{MazeError, Result},
    maze::{Maze, grid::Phase},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Solver {
    Dfs,
    Bfs,
    Dijkstra,
    AStar,
    WallFollower,
    Bidirectional,
}

impl Solver {
    pub const ALL: [Solver; 6] = [
        Solver::Dfs,
        Solver::Bfs,
        Solver::Dijkstra,
        Solver::AStar,
        Solver::WallFollower,
        Solver::Bidirectional,
    ];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::AStar => write!(f, "A* Search"),
            Solver::WallFollower => write!(f, "Right-Hand Wall Follower"),
            Solver::Bidirectional => write!(f, "Bidirectional BFS"),
        }
    }
}

/// Outcome of one solver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub goal_reached: bool,
    /// Cells from start to goal in walking order. Empty when the goal was not reached.
    /// For the wall follower this is the full walk, revisits included.
    pub route: Vec<usize>,
    /// Number of cells taken off the frontier (or moves made, for the wall follower)
    pub expanded: usize,
}

impl Solution {
    fn reached(route: Vec<usize>, expanded: usize) -> Self {
        Solution {
            goal_reached: true,
            route,
            expanded,
        }
    }

    fn unreached(expanded: usize) -> Self {
        Solution {
            goal_reached: false,
            route: Vec::new(),
            expanded,
        }
    }

    /// Route length in edges.
    pub fn length(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

/// Solve the maze from its start to its goal, marking the route in the path overlay.
///
/// Both overlays are cleared first, so each run starts from the same state.
///
/// # Errors
/// [`MazeError::NotGenerated`] if the maze has not been carved yet.
pub fn solve_maze(maze: &mut Maze, solver: Solver) -> Result<Solution> {
    if !maze.is_generated() {
        return Err(MazeError::NotGenerated);
    }
    tracing::debug!(
        "Solving {}x{} maze from {} to {} with {}",
        maze.size(),
        maze.size(),
        maze.start(),
        maze.goal(),
        solver
    );

    maze.reset_visited();
    maze.reset_path();
    let solution = match solver {
        Solver::Dfs => solve_dfs(maze),
        Solver::Bfs => solve_bfs(maze),
        Solver::Dijkstra => solve_dijkstra(maze),
        Solver::AStar => solve_astar(maze),
        Solver::WallFollower => solve_wall_follower(maze),
        Solver::Bidirectional => solve_bidirectional(maze),
    };
    maze.complete(Phase::Solved {
        solver,
        goal_reached: solution.goal_reached,
    });

    if solution.goal_reached {
        tracing::info!(
            "{} reached the goal: route length {}, {} cells expanded",
            solver,
            solution.length(),
            solution.expanded
        );
    } else {
        tracing::info!(
            "{} found no path after expanding {} cells",
            solver,
            solution.expanded
        );
    }
    Ok(solution)
}
