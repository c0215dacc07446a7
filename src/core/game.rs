//! Game state: grid, player position and score

use rand::Rng;
use tracing::debug;

use super::direction::{Direction, Position};
use super::error::{GameError, Result};
use super::grid::Grid;
use super::moves::MoveSet;

/// A single Greed session
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    position: Position,
    score: usize,
}

impl Game {
    /// Random board with the player dropped on a random cell
    pub fn new<R: Rng>(height: usize, width: usize, rng: &mut R) -> Result<Self> {
        let grid = Grid::random(height, width, rng)?;
        let position = Position::new(rng.random_range(0..height), rng.random_range(0..width));
        Self::from_parts(grid, position)
    }

    /// Start from a known board; the player's cell is cleared
    pub fn from_parts(mut grid: Grid, position: Position) -> Result<Self> {
        if !grid.contains(position) {
            return Err(GameError::OutOfBounds {
                row: position.row,
                col: position.col,
            });
        }
        grid.clear(position);
        Ok(Self {
            grid,
            position,
            score: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Cells consumed so far
    pub fn score(&self) -> usize {
        self.score
    }

    /// Score as a percentage of all cells
    pub fn percentage(&self) -> f64 {
        self.score as f64 * 100.0 / self.grid.cell_count() as f64
    }

    /// Legal moves from the current position
    pub fn legal_moves(&self) -> MoveSet {
        MoveSet::compute(&self.grid, self.position)
    }

    #[allow(dead_code)]
    pub fn is_over(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Consume the run for `dir` from `moves` and jump to its far end
    ///
    /// `moves` must have been computed from the current state. Returns the
    /// number of cells consumed; a direction with no run leaves the state
    /// untouched.
    pub fn apply(&mut self, moves: &MoveSet, dir: Direction) -> Result<usize> {
        let run = moves.get(dir).ok_or(GameError::IllegalMove(dir))?;
        let landing = *run.first().ok_or(GameError::IllegalMove(dir))?;

        for &pos in run {
            self.grid.clear(pos);
        }
        self.position = landing;
        self.score += run.len();

        debug!(
            "Moved {} by {} to ({}, {}), score {}",
            dir,
            run.len(),
            landing.row,
            landing.col,
            self.score
        );
        Ok(run.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(rows: &[&[u8]], row: usize, col: usize) -> Game {
        let grid = Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap();
        Game::from_parts(grid, Position::new(row, col)).unwrap()
    }

    #[test]
    fn test_new_clears_player_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let game = Game::new(22, 79, &mut rng).unwrap();
        let pos = game.position();
        assert!(pos.row < 22 && pos.col < 79);
        assert_eq!(game.grid().get(pos), Some(0));
        assert_eq!(game.score(), 0);
        let zeros = game.grid().rows().flatten().filter(|&&v| v == 0).count();
        assert_eq!(zeros, 1);
    }

    #[test]
    fn test_from_parts_rejects_outside_position() {
        let grid = Grid::from_rows(vec![vec![1, 2]]).unwrap();
        assert_eq!(
            Game::from_parts(grid, Position::new(1, 0)).unwrap_err(),
            GameError::OutOfBounds { row: 1, col: 0 }
        );
    }

    #[test]
    fn test_apply_diagonal_run() {
        let mut game = game(
            &[
                &[2, 9, 9],
                &[9, 2, 9],
                &[9, 9, 2],
            ],
            0,
            0,
        );
        let moves = game.legal_moves();
        assert_eq!(
            moves.get(Direction::DownRight),
            Some(&[Position::new(2, 2), Position::new(1, 1)][..])
        );

        assert_eq!(game.apply(&moves, Direction::DownRight), Ok(2));
        assert_eq!(game.grid().get(Position::new(2, 2)), Some(0));
        assert_eq!(game.grid().get(Position::new(1, 1)), Some(0));
        assert_eq!(game.position(), Position::new(2, 2));
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_apply_illegal_direction_is_noop() {
        let mut game = game(&[&[0, 3], &[2, 5]], 0, 0);
        let moves = game.legal_moves();
        assert!(moves.is_empty());
        assert!(game.is_over());

        let before = game.grid().clone();
        assert_eq!(
            game.apply(&moves, Direction::Right),
            Err(GameError::IllegalMove(Direction::Right))
        );
        assert_eq!(game.grid(), &before);
        assert_eq!(game.position(), Position::new(0, 0));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_random_playthrough_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut game = Game::new(10, 12, &mut rng).unwrap();

        loop {
            let moves = game.legal_moves();
            assert_eq!(moves, game.legal_moves());
            let Some(dir) = moves.directions().next() else {
                break;
            };
            let before = game.score();
            let expected = moves.get(dir).map(<[Position]>::len).unwrap();
            let consumed = game.apply(&moves, dir).unwrap();

            assert_eq!(consumed, expected);
            assert_eq!(game.score(), before + consumed);
            assert!(game.grid().contains(game.position()));
        }

        assert!(game.is_over());
        assert!(game.score() < game.grid().cell_count());
    }

    #[test]
    fn test_percentage() {
        let mut game = game(&[&[0, 1, 1, 1]], 0, 0);
        let moves = game.legal_moves();
        game.apply(&moves, Direction::Right).unwrap();
        assert_eq!(format!("{:.2}", game.percentage()), "25.00");
    }
}
