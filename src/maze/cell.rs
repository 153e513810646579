use crossterm::style::{Color, Stylize};

use std::fmt;

/// Wall state owned by a single cell.
///
/// A passage between vertically adjacent cells is stored in the lower cell's `open_top`,
/// a passage between horizontally adjacent cells in the right cell's `open_left`.
/// Border walls are never stored and always closed.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    /// No wall between this cell and the cell above it.
    pub open_top: bool,
    /// No wall between this cell and the cell to its left.
    pub open_left: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls {
        open_top: false,
        open_left: false,
    };
}

/// Path overlay entry. Its meaning is local to one solver run.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMark {
    /// Nothing recorded for this cell.
    #[default]
    Unmarked,
    /// The cell is part of the reported route (or the live walk during Wilson's algorithm).
    OnPath,
    /// The cell was reached from the given predecessor. `None` marks the search root.
    Parent(Option<usize>),
}

/// What a renderer shows inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellGlyph {
    Start,
    Goal,
    Route,
    Visited,
    Empty,
}

impl CellGlyph {
    /// The width of each cell interior when rendered, in character widths.
    pub const CELL_WIDTH: usize = 3;

    /// Unstyled interior, used for plain-text rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            CellGlyph::Start => " S ",
            CellGlyph::Goal => " G ",
            CellGlyph::Route => " o ",
            CellGlyph::Visited => " . ",
            CellGlyph::Empty => "   ",
        }
    }
}

impl fmt::Display for CellGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol();
        let styled_symbol = match self {
            CellGlyph::Start => symbol.with(Color::Green).bold(),
            CellGlyph::Goal => symbol.with(Color::Red).bold(),
            CellGlyph::Route => symbol.with(Color::Yellow),
            CellGlyph::Visited => symbol.with(Color::Blue),
            CellGlyph::Empty => symbol.with(Color::Reset),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                CellGlyph::CELL_WIDTH,
                "Each cell must occupy exactly three character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
