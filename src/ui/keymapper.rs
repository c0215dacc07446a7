//! Key mapping for game input
//!
//! Converts key events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::{ConfigError, KeyConfig};
use crate::core::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Candidate move, still to be checked against the legal moves
    Move(Direction),
    Quit,
}

/// Key mapper for converting key events to commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapper {
    /// Move keys in direction order
    moves: [char; 8],
    quit: char,
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self {
            moves: ['q', 'w', 'e', 'a', 'd', 'z', 'x', 'c'],
            quit: ' ',
        }
    }
}

impl KeyMapper {
    /// Build a mapper from configured key strings
    pub fn from_config(config: &KeyConfig) -> Result<Self, ConfigError> {
        let keys: Vec<char> = config.moves.chars().collect();
        let moves: [char; 8] = keys
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::MoveKeyCount(keys.len()))?;

        let mut quit_chars = config.quit.chars();
        let quit = match (quit_chars.next(), quit_chars.next()) {
            (Some(ch), None) => ch,
            _ => return Err(ConfigError::QuitKey(config.quit.clone())),
        };

        for (i, &key) in moves.iter().enumerate() {
            if key == quit || moves[..i].contains(&key) {
                return Err(ConfigError::DuplicateKey(key));
            }
        }

        Ok(Self { moves, quit })
    }

    /// Map a crossterm KeyEvent to a command
    pub fn map(&self, event: &KeyEvent) -> Option<Command> {
        // Only process key press events
        if event.kind != KeyEventKind::Press {
            return None;
        }

        match event.code {
            // Raw mode swallows SIGINT
            KeyCode::Char('c') | KeyCode::Char('C')
                if event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Command::Quit)
            }
            KeyCode::Char(ch) => self.map_char(ch),
            _ => None,
        }
    }

    fn map_char(&self, ch: char) -> Option<Command> {
        if ch == self.quit {
            return Some(Command::Quit);
        }
        self.moves
            .iter()
            .position(|&key| key == ch)
            .and_then(Direction::from_index)
            .map(Command::Move)
    }
}
