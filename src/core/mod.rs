//! Grid engine.
//!
//! This module contains the gameplay rules, independent of any terminal:
//!
//! - **direction**: The eight move directions and grid coordinates
//! - **grid**: Fuel grid storage and random generation
//! - **moves**: Legal move computation (the completion rule)
//! - **game**: Session state, move application and scoring
//!
//! # Architecture
//!
//! ```text
//! Game
//! ├── Grid (fuel values, 0 = consumed)
//! ├── Position (player)
//! └── score
//!     └── MoveSet (recomputed every turn, one slot per Direction)
//! ```

pub mod direction;
pub mod error;
pub mod game;
pub mod grid;
pub mod moves;

pub use direction::{Direction, Position};
pub use error::GameError;
pub use game::Game;
pub use grid::Grid;
pub use moves::MoveSet;
