//! Grid renderer using crossterm
//!
//! Turns the game state into a [`Frame`] and draws it to the console.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use tracing::debug;

use crate::config::{CellStyle, Palette};
use crate::core::{Game, MoveSet, Position};

/// Glyph marking the player
pub const PLAYER_GLYPH: char = '@';

/// What a single grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCell {
    Player,
    /// Consumed cell
    Empty,
    /// Fuel digit lying on a legal run
    Highlight(u8),
    /// Any other fuel digit
    Fuel(u8),
}

/// Renderable snapshot of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Vec<FrameCell>>,
}

impl Frame {
    /// Snapshot `game` with the cells of `moves` highlighted
    pub fn build(game: &Game, moves: &MoveSet) -> Self {
        let player = game.position();
        let rows = game
            .grid()
            .rows()
            .enumerate()
            .map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(|(col, &value)| {
                        let pos = Position::new(row, col);
                        if pos == player {
                            FrameCell::Player
                        } else if value == 0 {
                            FrameCell::Empty
                        } else if moves.contains(pos) {
                            FrameCell::Highlight(value)
                        } else {
                            FrameCell::Fuel(value)
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

/// Status line under the grid
pub fn status_line(game: &Game) -> String {
    format!(
        "Score: {}   Percentage: {:.2}%",
        game.score(),
        game.percentage()
    )
}

/// Message shown once no legal move remains
pub const GAME_OVER_MESSAGE: &str = "   Game over! Press any key to quit.";

/// Terminal renderer
pub struct Renderer<W: Write> {
    out: W,
    palette: Palette,
    /// Whether raw mode is active
    initialized: bool,
}

impl Renderer<io::Stdout> {
    /// Renderer on standard output
    pub fn stdout(palette: Palette) -> Self {
        Self::new(io::stdout(), palette)
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self {
            out,
            palette,
            initialized: false,
        }
    }

    /// Initialize the terminal for rendering
    ///
    /// Frames draw on the main screen so the last one stays visible on exit.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, Hide, Clear(ClearType::All), MoveTo(0, 0))?;
        self.initialized = true;
        debug!("Terminal initialized");
        Ok(())
    }

    /// Cleanup the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        // Reset all attributes first
        let _ = execute!(self.out, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(self.out, Show);
        let _ = self.out.flush();

        // Disable raw mode - this is the most important part
        terminal::disable_raw_mode()?;
        debug!("Terminal restored");
        Ok(())
    }

    /// Draw the grid, the status line and, when `game_over`, the final message
    pub fn render(&mut self, frame: &Frame, status: &str, game_over: bool) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        for row in &frame.rows {
            for cell in row {
                self.draw_cell(*cell)?;
            }
            queue!(self.out, Print("\r\n"))?;
        }

        queue!(self.out, ResetColor, Print(status))?;
        if game_over {
            queue!(self.out, Print(GAME_OVER_MESSAGE))?;
        }
        self.out.flush()
    }

    fn draw_cell(&mut self, cell: FrameCell) -> io::Result<()> {
        match cell {
            FrameCell::Player => queue!(self.out, Print(PLAYER_GLYPH)),
            FrameCell::Empty => queue!(self.out, Print(' ')),
            FrameCell::Highlight(value) => {
                let style = self.palette.highlight();
                self.draw_digit(style, value)
            }
            FrameCell::Fuel(value) => {
                let style = self.palette.digit(value);
                self.draw_digit(style, value)
            }
        }
    }

    fn draw_digit(&mut self, style: CellStyle, value: u8) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(style.fg))?;
        if let Some(bg) = style.bg {
            queue!(self.out, SetBackgroundColor(bg))?;
        }
        queue!(self.out, Print(char::from(b'0' + value.min(9))), ResetColor)
    }

    /// Leave the terminal with a trailing newline after the last frame
    pub fn finish(&mut self) -> io::Result<()> {
        self.cleanup()?;
        writeln!(self.out)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Drop for Renderer<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
