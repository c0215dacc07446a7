//! Blocking key input
//!
//! The game loop reads through [`KeySource`] so it can be driven by the
//! terminal or by a scripted sequence of keys.

use std::io;

use crossterm::event::{self, Event, KeyEvent};

/// Source of key events, one blocking read at a time
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

/// Reads keys from the terminal, skipping mouse, focus and resize events
#[derive(Debug, Default)]
pub struct TerminalInput;

impl KeySource for TerminalInput {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                return Ok(key_event);
            }
        }
    }
}
