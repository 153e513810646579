use std::fmt;
use std::sync::mpsc::SyncSender;

use super::cell::{PathMark, Walls};
use crate::{generators::Generator, solvers::Solver};

/// A finished stage of work on a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generated(Generator),
    Solved { solver: Solver, goal_reached: bool },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Generated(generator) => write!(f, "Generated with {}", generator),
            Phase::Solved {
                solver,
                goal_reached: true,
            } => write!(f, "Solved with {}", solver),
            Phase::Solved {
                solver,
                goal_reached: false,
            } => write!(f, "{} found no path", solver),
        }
    }
}

/// A change to the grid state, streamed to whoever watches the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    Initial {
        size: usize,
        start: usize,
        goal: usize,
    },
    Walls {
        cell: usize,
        walls: Walls,
    },
    Visited {
        cell: usize,
        visited: bool,
    },
    Path {
        cell: usize,
        mark: PathMark,
    },
    ResetVisited,
    ResetPath,
    /// One algorithm step has been taken.
    Step,
    Completed(Phase),
}

/// Per-cell storage for walls and the two overlays.
pub struct Grid {
    walls: Box<[Walls]>,
    visited: Box<[bool]>,
    path: Box<[PathMark]>,
    sender: Option<SyncSender<GridEvent>>,
}

impl Grid {
    pub fn new(cell_count: usize, sender: Option<SyncSender<GridEvent>>) -> Self {
        Grid {
            walls: vec![Walls::CLOSED; cell_count].into_boxed_slice(),
            visited: vec![false; cell_count].into_boxed_slice(),
            path: vec![PathMark::Unmarked; cell_count].into_boxed_slice(),
            sender,
        }
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Send an event to the watcher, if any. A disconnected watcher is ignored.
    pub fn emit(&self, event: GridEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }

    pub fn walls(&self, cell: usize) -> Walls {
        self.walls[cell]
    }

    pub fn set_walls(&mut self, cell: usize, walls: Walls) {
        if self.walls[cell] != walls {
            self.walls[cell] = walls;
            self.emit(GridEvent::Walls { cell, walls });
        }
    }

    pub fn is_visited(&self, cell: usize) -> bool {
        self.visited[cell]
    }

    pub fn set_visited(&mut self, cell: usize, visited: bool) {
        if self.visited[cell] != visited {
            self.visited[cell] = visited;
            self.emit(GridEvent::Visited { cell, visited });
        }
    }

    pub fn reset_visited(&mut self) {
        self.visited.fill(false);
        self.emit(GridEvent::ResetVisited);
    }

    pub fn path(&self, cell: usize) -> PathMark {
        self.path[cell]
    }

    pub fn set_path(&mut self, cell: usize, mark: PathMark) {
        if self.path[cell] != mark {
            self.path[cell] = mark;
            self.emit(GridEvent::Path { cell, mark });
        }
    }

    pub fn reset_path(&mut self) {
        self.path.fill(PathMark::Unmarked);
        self.emit(GridEvent::ResetPath);
    }

    /// Close every wall. Emits one event per cell that changed.
    pub fn close_walls(&mut self) {
        (0..self.len()).for_each(|cell| self.set_walls(cell, Walls::CLOSED));
    }
}
