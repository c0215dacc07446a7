//! Main game loop
//!
//! ```text
//! AWAIT_MOVE ──(moves)──> AWAIT_INPUT ──(legal key)──> APPLY_MOVE ─┐
//!     ^                        │ (quit key)                        │
//!     └────────────────────────┼───────────────────────────────────┘
//!     │ (no moves)             v
//!     └──> GAME_OVER ──(any key)──> exit
//! ```

use std::io::Write;

use crossterm::event::KeyEventKind;
use tracing::{debug, info};

use crate::core::{Direction, Game, MoveSet};
use crate::ui::{status_line, Command, Frame, KeyMapper, KeySource, Renderer};

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    GameOver,
}

/// Final result of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub score: usize,
    pub percentage: f64,
    pub reason: EndReason,
}

impl Outcome {
    fn new(game: &Game, reason: EndReason) -> Self {
        Self {
            score: game.score(),
            percentage: game.percentage(),
            reason,
        }
    }
}

/// Play until the player quits or no legal move remains
pub fn run_game<W: Write, K: KeySource>(
    game: &mut Game,
    renderer: &mut Renderer<W>,
    input: &mut K,
    keys: &KeyMapper,
) -> anyhow::Result<Outcome> {
    loop {
        let moves = game.legal_moves();
        debug!(
            "{} legal moves: {:?}",
            moves.len(),
            moves.directions().map(Direction::name).collect::<Vec<_>>()
        );
        let frame = Frame::build(game, &moves);
        renderer.render(&frame, &status_line(game), moves.is_empty())?;

        if moves.is_empty() {
            info!(
                "Game over: score {}, {} cells left",
                game.score(),
                game.grid().remaining()
            );
            wait_for_press(input)?;
            return Ok(Outcome::new(game, EndReason::GameOver));
        }

        let dir = match read_move(input, keys, &moves)? {
            Some(dir) => dir,
            None => {
                info!("Quit with score {}", game.score());
                return Ok(Outcome::new(game, EndReason::Quit));
            }
        };
        game.apply(&moves, dir)?;
    }
}

/// Read keys until one names a legal move; `None` on quit
fn read_move<K: KeySource>(
    input: &mut K,
    keys: &KeyMapper,
    moves: &MoveSet,
) -> anyhow::Result<Option<Direction>> {
    loop {
        let key_event = input.next_key()?;
        match keys.map(&key_event) {
            Some(Command::Quit) => return Ok(None),
            Some(Command::Move(dir)) if moves.get(dir).is_some() => return Ok(Some(dir)),
            Some(Command::Move(dir)) => debug!("Ignoring blocked direction {}", dir),
            None => {}
        }
    }
}

fn wait_for_press<K: KeySource>(input: &mut K) -> anyhow::Result<()> {
    while input.next_key()?.kind != KeyEventKind::Press {}
    Ok(())
}
