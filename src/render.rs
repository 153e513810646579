//! Text depiction of a maze.
//!
//! Each cell takes four columns: a wall column followed by a three-column interior.
//! Border walls are always drawn closed.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Color, Stylize},
};

use crate::maze::{CellGlyph, Maze};

const CORNER: &str = "+";
const WALL_SEGMENT: &str = "---";
const OPEN_SEGMENT: &str = "   ";
const WALL_SIDE: &str = "|";
const OPEN_SIDE: &str = " ";

enum Token {
    Wall(&'static str),
    Cell(CellGlyph),
    LineEnd,
}

/// The maze as a sequence of drawing tokens, row by row.
fn tokens(maze: &Maze) -> Vec<Token> {
    let size = maze.size();
    let mut tokens = Vec::with_capacity((size * 4 + 2) * (size * 2 + 1));

    for row in 0..size {
        // Wall line above the row
        for col in 0..size {
            let cell = row * size + col;
            tokens.push(Token::Wall(CORNER));
            tokens.push(Token::Wall(if maze.walls(cell).open_top {
                OPEN_SEGMENT
            } else {
                WALL_SEGMENT
            }));
        }
        tokens.push(Token::Wall(CORNER));
        tokens.push(Token::LineEnd);

        // Cell line
        for col in 0..size {
            let cell = row * size + col;
            tokens.push(Token::Wall(if maze.walls(cell).open_left {
                OPEN_SIDE
            } else {
                WALL_SIDE
            }));
            tokens.push(Token::Cell(maze.glyph(cell)));
        }
        tokens.push(Token::Wall(WALL_SIDE));
        tokens.push(Token::LineEnd);
    }

    // Bottom border
    for _ in 0..size {
        tokens.push(Token::Wall(CORNER));
        tokens.push(Token::Wall(WALL_SEGMENT));
    }
    tokens.push(Token::Wall(CORNER));
    tokens.push(Token::LineEnd);
    tokens
}

/// Render the maze as plain text, one line per wall row and cell row.
pub fn render_text(maze: &Maze) -> String {
    tokens(maze)
        .into_iter()
        .map(|token| match token {
            Token::Wall(s) => s,
            Token::Cell(glyph) => glyph.symbol(),
            Token::LineEnd => "\n",
        })
        .collect()
}

/// Queue a styled rendering of the maze, preceded by a header line, and flush it.
pub fn draw(maze: &Maze, header: &str, out: &mut impl Write) -> std::io::Result<()> {
    queue!(
        out,
        style::PrintStyledContent(
            header
                .with(Color::Yellow)
                .attribute(Attribute::Bold)
        ),
        style::Print("\n"),
    )?;
    for token in tokens(maze) {
        match token {
            Token::Wall(s) => queue!(out, style::PrintStyledContent(s.with(Color::DarkGrey)))?,
            Token::Cell(glyph) => queue!(out, style::Print(glyph))?,
            Token::LineEnd => queue!(out, style::Print("\n"))?,
        }
    }
    out.flush()
}
