//! Legal move computation
//!
//! From the player's cell, the first cell in a direction holds the jump
//! length `n`. The move is legal only when all `n` cells along that line are
//! inside the grid and unconsumed. A shorter walk is never a legal move.

use super::direction::{Direction, Position};
use super::grid::Grid;

/// Legal runs for the current position, one slot per direction
///
/// Each run is ordered farthest cell first, so `run[0]` is where the player
/// lands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSet {
    runs: [Option<Vec<Position>>; 8],
}

impl MoveSet {
    /// Compute every legal move from `from`
    pub fn compute(grid: &Grid, from: Position) -> Self {
        let mut set = MoveSet::default();
        for dir in Direction::ALL {
            set.runs[dir.index()] = walk(grid, from, dir);
        }
        set
    }

    /// Run for `dir`, if it is legal
    pub fn get(&self, dir: Direction) -> Option<&[Position]> {
        self.runs[dir.index()].as_deref()
    }

    /// True when no direction is legal (game over)
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.runs.iter().filter(|r| r.is_some()).count()
    }

    /// Legal directions in index order
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.iter().map(|(dir, _)| dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &[Position])> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.get(dir).map(|run| (dir, run)))
    }

    /// Whether `pos` lies on any legal run
    pub fn contains(&self, pos: Position) -> bool {
        self.iter().any(|(_, run)| run.contains(&pos))
    }
}

/// Walk from the neighbour of `from`; `None` unless the walk completes
fn walk(grid: &Grid, from: Position, dir: Direction) -> Option<Vec<Position>> {
    let (height, width) = (grid.height(), grid.width());
    let mut cursor = from.offset(dir, height, width)?;
    let length = grid.get(cursor)?;
    if length == 0 {
        return None;
    }

    let mut run = Vec::with_capacity(length as usize);
    for step in 0..length {
        if step > 0 {
            cursor = cursor.offset(dir, height, width)?;
        }
        if grid.get(cursor)? == 0 {
            return None;
        }
        run.push(cursor);
    }

    run.reverse();
    Some(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_two_by_two_has_no_moves() {
        let g = grid(&[&[0, 3], &[2, 5]]);
        let moves = MoveSet::compute(&g, Position::new(0, 0));
        assert!(moves.is_empty());
        assert_eq!(moves.len(), 0);
    }

    #[test]
    fn test_complete_walk_is_legal_and_farthest_first() {
        let g = grid(&[
            &[0, 2, 9, 9],
            &[9, 9, 9, 9],
        ]);
        let moves = MoveSet::compute(&g, Position::new(0, 0));
        assert_eq!(
            moves.get(Direction::Right),
            Some(&[Position::new(0, 2), Position::new(0, 1)][..])
        );
        assert_eq!(moves.directions().collect::<Vec<_>>(), vec![Direction::Right]);
    }

    #[test]
    fn test_walk_hitting_consumed_cell_is_illegal() {
        let g = grid(&[&[0, 3, 0, 5, 5]]);
        let moves = MoveSet::compute(&g, Position::new(0, 0));
        assert_eq!(moves.get(Direction::Right), None);
    }

    #[test]
    fn test_walk_hitting_edge_is_illegal() {
        // Two cells to the right, but the neighbour asks for three
        let g = grid(&[&[0, 3, 1]]);
        assert!(MoveSet::compute(&g, Position::new(0, 0)).is_empty());

        let g = grid(&[&[0, 2, 1]]);
        let moves = MoveSet::compute(&g, Position::new(0, 0));
        assert_eq!(moves.get(Direction::Right).map(<[Position]>::len), Some(2));
    }

    #[test]
    fn test_neighbour_of_one_is_single_cell_run() {
        let g = grid(&[
            &[1, 1, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        let moves = MoveSet::compute(&g, Position::new(1, 1));
        assert_eq!(moves.len(), 8);
        for (dir, run) in moves.iter() {
            assert_eq!(run.len(), 1);
            assert_eq!(Some(run[0]), Position::new(1, 1).offset(dir, 3, 3));
        }
    }

    #[test]
    fn test_contains_marks_run_cells() {
        let g = grid(&[&[0, 2, 9, 9]]);
        let moves = MoveSet::compute(&g, Position::new(0, 0));
        assert!(moves.contains(Position::new(0, 1)));
        assert!(moves.contains(Position::new(0, 2)));
        assert!(!moves.contains(Position::new(0, 3)));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let g = grid(&[
            &[2, 1, 3, 1],
            &[1, 0, 1, 2],
            &[4, 1, 1, 1],
        ]);
        let a = MoveSet::compute(&g, Position::new(1, 1));
        let b = MoveSet::compute(&g, Position::new(1, 1));
        assert_eq!(a, b);
    }
}
