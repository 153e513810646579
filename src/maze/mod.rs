pub mod cell;
pub mod direction;
pub mod grid;

use std::sync::mpsc::SyncSender;

pub use cell::{CellGlyph, PathMark, Walls};
pub use direction::Direction;
use grid::{Grid, GridEvent};

use crate::error::{MazeError, Result};

/// A square maze of `size * size` cells indexed in row-major order.
///
/// Owns the wall state, the visited overlay and the path overlay. Generators write walls,
/// solvers only write the overlays.
pub struct Maze {
    grid: Grid,
    size: usize,
    start: usize,
    goal: usize,
    generated: bool,
}

impl Maze {
    /// Creates a maze with every wall closed, the start at the top-left cell and the goal at
    /// the bottom-right cell.
    pub fn new(size: usize, event_tx: Option<SyncSender<GridEvent>>) -> Result<Self> {
        let cell_count = Maze::cell_count_for(size)?;
        Maze::with_endpoints(size, 0, cell_count - 1, event_tx)
    }

    /// Creates a maze with every wall closed and the given start and goal cells.
    pub fn with_endpoints(
        size: usize,
        start: usize,
        goal: usize,
        event_tx: Option<SyncSender<GridEvent>>,
    ) -> Result<Self> {
        let cell_count = Maze::cell_count_for(size)?;
        if start >= cell_count || goal >= cell_count {
            return Err(MazeError::invalid_config(format!(
                "start ({}) and goal ({}) must be below {} for a {}x{} maze",
                start, goal, cell_count, size, size
            )));
        }
        let maze = Maze {
            grid: Grid::new(cell_count, event_tx),
            size,
            start,
            goal,
            generated: false,
        };
        maze.grid.emit(GridEvent::Initial { size, start, goal });
        Ok(maze)
    }

    /// Builds a maze from an explicit list of open passages and treats it as generated.
    /// The passages do not have to form a spanning tree.
    pub fn from_passages(
        size: usize,
        passages: &[(usize, usize)],
        event_tx: Option<SyncSender<GridEvent>>,
    ) -> Result<Self> {
        let mut maze = Maze::new(size, event_tx)?;
        for &(a, b) in passages {
            maze.carve_between(a, b)?;
        }
        maze.generated = true;
        Ok(maze)
    }

    fn cell_count_for(size: usize) -> Result<usize> {
        if size == 0 {
            return Err(MazeError::invalid_config("maze size must be at least 1"));
        }
        size.checked_mul(size).ok_or_else(|| {
            MazeError::invalid_config(format!("maze size {} is too large", size))
        })
    }

    /// Side length of the maze in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn goal(&self) -> usize {
        self.goal
    }

    /// Whether a generator has finished carving this maze.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub(crate) fn set_generated(&mut self) {
        self.generated = true;
    }

    /// Splits a cell index into `(row, col)`.
    pub fn row_col(&self, cell: usize) -> (usize, usize) {
        (cell / self.size, cell % self.size)
    }

    /// Returns the cell one step away in `direction`, or `None` when the move would leave the
    /// grid (or `cell` itself is outside it).
    pub fn neighbor_in_direction(&self, cell: usize, direction: Direction) -> Option<usize> {
        if cell >= self.cell_count() {
            return None;
        }
        let (row, col) = self.row_col(cell);
        match direction {
            Direction::Up => (row > 0).then(|| cell - self.size),
            Direction::Right => (col + 1 < self.size).then(|| cell + 1),
            Direction::Down => (row + 1 < self.size).then(|| cell + self.size),
            Direction::Left => (col > 0).then(|| cell - 1),
        }
    }

    /// In-bounds neighbors of a cell, in scan order.
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor_in_direction(cell, d).map(|n| (d, n)))
    }

    fn direction_between(&self, from: usize, to: usize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor_in_direction(from, d) == Some(to))
    }

    /// Whether the wall between `cell` and its neighbor in `direction` is open.
    /// The neighbor must exist.
    fn is_open_towards(&self, cell: usize, neighbor: usize, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.grid.walls(cell).open_top,
            Direction::Down => self.grid.walls(neighbor).open_top,
            Direction::Left => self.grid.walls(cell).open_left,
            Direction::Right => self.grid.walls(neighbor).open_left,
        }
    }

    /// Checks if no wall separates two cells. Cells that are not grid-adjacent are never open.
    pub fn is_open(&self, a: usize, b: usize) -> bool {
        match self.direction_between(a, b) {
            Some(direction) => self.is_open_towards(a, b, direction),
            None => false,
        }
    }

    /// Returns the neighbor in `direction` if it exists and the wall towards it is open.
    /// This is the legal-move test used by every solver.
    pub fn open_neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        self.neighbor_in_direction(cell, direction)
            .filter(|&neighbor| self.is_open_towards(cell, neighbor, direction))
    }

    /// Removes the wall between two grid-adjacent cells. Carving an open wall does nothing.
    ///
    /// # Errors
    /// [`MazeError::NotAdjacent`] if the cells do not share a wall.
    pub fn carve_between(&mut self, a: usize, b: usize) -> Result<()> {
        let direction = self
            .direction_between(a, b)
            .ok_or(MazeError::NotAdjacent(a, b))?;
        // The flag always lives on the lower or right cell of the pair
        let (owner, vertical) = match direction {
            Direction::Up => (a, true),
            Direction::Down => (b, true),
            Direction::Left => (a, false),
            Direction::Right => (b, false),
        };
        let mut walls = self.grid.walls(owner);
        if vertical {
            walls.open_top = true;
        } else {
            walls.open_left = true;
        }
        self.grid.set_walls(owner, walls);
        Ok(())
    }

    /// Returns the wall flags stored on a cell.
    ///
    /// # Panics
    /// If `cell` is out of bounds.
    pub fn walls(&self, cell: usize) -> Walls {
        self.grid.walls(cell)
    }

    /// Number of open interior walls. A perfect maze has `cell_count() - 1` of them.
    pub fn open_passages(&self) -> usize {
        (0..self.cell_count())
            .map(|cell| {
                let walls = self.grid.walls(cell);
                walls.open_top as usize + walls.open_left as usize
            })
            .sum()
    }

    /// Closes every wall so the maze can be generated again.
    pub fn reset_walls(&mut self) {
        self.grid.close_walls();
        self.generated = false;
    }

    /// # Panics
    /// If `cell` is out of bounds.
    pub fn is_visited(&self, cell: usize) -> bool {
        self.grid.is_visited(cell)
    }

    /// # Panics
    /// If `cell` is out of bounds.
    pub fn set_visited(&mut self, cell: usize) {
        self.grid.set_visited(cell, true);
    }

    /// Clears the visited overlay.
    pub fn reset_visited(&mut self) {
        self.grid.reset_visited();
    }

    /// # Panics
    /// If `cell` is out of bounds.
    pub fn path_mark(&self, cell: usize) -> PathMark {
        self.grid.path(cell)
    }

    /// Sets the path overlay entry of a cell.
    ///
    /// # Panics
    /// If `cell` is out of bounds.
    pub fn mark_path(&mut self, cell: usize, mark: PathMark) {
        self.grid.set_path(cell, mark);
    }

    /// Clears the path overlay.
    pub fn reset_path(&mut self) {
        self.grid.reset_path();
    }

    /// Signals that an algorithm step has been taken.
    pub fn step(&self) {
        self.grid.emit(GridEvent::Step);
    }

    pub(crate) fn complete(&self, phase: grid::Phase) {
        self.grid.emit(GridEvent::Completed(phase));
    }

    /// What a renderer should draw inside a cell.
    pub fn glyph(&self, cell: usize) -> CellGlyph {
        if cell == self.start {
            CellGlyph::Start
        } else if cell == self.goal {
            CellGlyph::Goal
        } else if self.grid.path(cell) == PathMark::OnPath {
            CellGlyph::Route
        } else if self.grid.is_visited(cell) {
            CellGlyph::Visited
        } else {
            CellGlyph::Empty
        }
    }

    /// Checks whether the goal can be reached from the start with a depth-first search.
    /// Both overlays are cleared afterwards.
    pub fn is_solvable(&mut self) -> Result<bool> {
        let solution = crate::solvers::solve_maze(self, crate::solvers::Solver::Dfs)?;
        self.reset_visited();
        self.reset_path();
        Ok(solution.goal_reached)
    }

    /// Replays an event emitted by another maze onto this one.
    ///
    /// `Initial` rebuilds the maze with the announced dimensions and endpoints; the other
    /// events are applied to the matching cell. Watchers use this to keep a mirror of a maze
    /// that lives on another thread.
    pub fn apply(&mut self, event: &GridEvent) -> Result<()> {
        match *event {
            GridEvent::Initial { size, start, goal } => {
                *self = Maze::with_endpoints(size, start, goal, None)?;
            }
            GridEvent::Walls { cell, walls } => self.grid.set_walls(cell, walls),
            GridEvent::Visited { cell, visited } => self.grid.set_visited(cell, visited),
            GridEvent::Path { cell, mark } => self.grid.set_path(cell, mark),
            GridEvent::ResetVisited => self.grid.reset_visited(),
            GridEvent::ResetPath => self.grid.reset_path(),
            GridEvent::Completed(grid::Phase::Generated(_)) => self.generated = true,
            GridEvent::Step | GridEvent::Completed(_) => {}
        }
        Ok(())
    }
}
