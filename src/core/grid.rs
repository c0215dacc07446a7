//! Fuel grid storage
//!
//! Cells hold a fuel value 1-9, or 0 once consumed. Consumed cells never
//! come back.

use rand::Rng;

use super::direction::Position;
use super::error::{GameError, Result};

/// Largest fuel value a cell can hold
pub const MAX_FUEL: u8 = 9;

/// Row-major grid of fuel values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Fill a `height` x `width` grid with values drawn uniformly from 1..=9
    pub fn random<R: Rng>(height: usize, width: usize, rng: &mut R) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::InvalidDimensions { height, width });
        }
        let cells = (0..height * width)
            .map(|_| rng.random_range(1..=MAX_FUEL))
            .collect();
        Ok(Self { height, width, cells })
    }

    /// Build a grid from explicit rows
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GameError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(GameError::RaggedGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| **v > MAX_FUEL) {
                return Err(GameError::InvalidCell { row, col, value });
            }
            cells.extend(values);
        }

        Ok(Self { height, width, cells })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Fuel value at `pos`, `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<u8> {
        if self.contains(pos) {
            Some(self.cells[pos.row * self.width + pos.col])
        } else {
            None
        }
    }

    /// Mark a cell consumed
    pub(crate) fn clear(&mut self, pos: Position) {
        if self.contains(pos) {
            self.cells[pos.row * self.width + pos.col] = 0;
        }
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }

    /// Number of cells not yet consumed
    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(22, 79, &mut rng).unwrap();
        assert_eq!(grid.cell_count(), 22 * 79);
        assert!(grid.rows().flatten().all(|&v| (1..=MAX_FUEL).contains(&v)));
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let a = Grid::random(5, 6, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::random(5, 6, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_rejects_zero_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Grid::random(0, 4, &mut rng),
            Err(GameError::InvalidDimensions { height: 0, width: 4 })
        );
    }

    #[test]
    fn test_from_rows_validation() {
        assert_eq!(Grid::from_rows(vec![]), Err(GameError::EmptyGrid));
        assert_eq!(
            Grid::from_rows(vec![vec![1, 2], vec![3]]),
            Err(GameError::RaggedGrid { row: 1, expected: 2, found: 1 })
        );
        assert_eq!(
            Grid::from_rows(vec![vec![1, 12]]),
            Err(GameError::InvalidCell { row: 0, col: 1, value: 12 })
        );
    }

    #[test]
    fn test_get_and_clear() {
        let mut grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.get(Position::new(1, 2)), Some(6));
        assert_eq!(grid.get(Position::new(2, 0)), None);

        grid.clear(Position::new(1, 2));
        assert_eq!(grid.get(Position::new(1, 2)), Some(0));
        assert_eq!(grid.remaining(), 5);
    }
}
