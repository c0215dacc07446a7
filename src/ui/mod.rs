//! User interface rendering and input handling.
//!
//! This module provides the presentation shell around the grid engine:
//!
//! - **renderer**: Frame snapshot and crossterm drawing
//! - **keymapper**: Key events to game commands
//! - **input**: Blocking key sources

pub mod input;
pub mod keymapper;
pub mod renderer;

pub use input::{KeySource, TerminalInput};
pub use keymapper::*;
pub use renderer::*;
