//! Game state and the directional move.
//!
//! A swipe is resolved in a single pass: cells are ordered by how far along
//! the direction of travel they already sit, so every cell ahead of the one
//! being moved has settled before it is considered.

use std::cmp::Reverse;
use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::coords::AxialCoord;
use crate::direction::Direction;
use crate::error::GameError;
use crate::events::MoveEvent;
use crate::grid::Grid;
use crate::tile::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    score: u64,
    cells: Vec<Cell>,
    max_cell_id: u64,
}

/// Summary of one swipe. `moves == 0` means nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub direction: Direction,
    pub moves: u32,
    pub merges: u32,
    pub score_delta: u64,
    pub events: Vec<MoveEvent>,
}

impl MoveReport {
    fn unchanged(direction: Direction) -> Self {
        Self {
            direction,
            moves: 0,
            merges: 0,
            score_delta: 0,
            events: Vec::new(),
        }
    }

    pub fn changed(&self) -> bool {
        self.moves > 0
    }

    pub fn spawned(&self) -> Option<Cell> {
        self.events.iter().find_map(|e| match *e {
            MoveEvent::Spawned { id, at } => Some(Cell::spawn(id, at)),
            _ => None,
        })
    }
}

struct Resolution {
    cells: Vec<Cell>,
    moves: u32,
    merges: u32,
    score_delta: u64,
    events: Vec<MoveEvent>,
}

impl GameState {
    /// Fresh game: a single 2 at a uniformly random position.
    pub fn new_game<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let at = grid.positions()[rng.gen_range(0..grid.len())];
        Self {
            score: 0,
            cells: vec![Cell::spawn(0, at)],
            max_cell_id: 0,
        }
    }

    pub fn restart<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        Self::new_game(grid, rng)
    }

    /// Builds a state from an explicit layout. `max_cell_id` becomes the
    /// highest id present so later spawns never reuse one.
    pub fn from_cells(grid: &Grid, cells: Vec<Cell>, score: u64) -> Result<Self, GameError> {
        let max_cell_id = cells.iter().map(|c| c.id).max().unwrap_or(0);
        let state = Self {
            score,
            cells,
            max_cell_id,
        };
        state.validate(grid)?;
        Ok(state)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn max_cell_id(&self) -> u64 {
        self.max_cell_id
    }

    pub fn cell_at(&self, c: AxialCoord) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.axial == c)
    }

    pub fn best_value(&self) -> u64 {
        self.cells.iter().map(|c| c.value).max().unwrap_or(0)
    }

    /// Checks the layout invariants: every cell on the board, no shared
    /// positions or ids, values are powers of two from 2 up to what the board
    /// can hold, and no id above `max_cell_id`.
    pub fn validate(&self, grid: &Grid) -> Result<(), GameError> {
        let mut positions = HashSet::with_capacity(self.cells.len());
        let mut ids = HashSet::with_capacity(self.cells.len());
        for cell in &self.cells {
            if !grid.contains(cell.axial) {
                return Err(GameError::OutOfGrid(cell.axial));
            }
            if !positions.insert(cell.axial) {
                return Err(GameError::Overlap(cell.axial));
            }
            if !ids.insert(cell.id) || cell.id > self.max_cell_id {
                return Err(GameError::DuplicateId(cell.id));
            }
            if !Cell::is_valid_value(cell.value) || cell.value > grid.max_value() {
                return Err(GameError::InvalidValue(cell.value));
            }
        }
        Ok(())
    }

    /// Resolves one move. When nothing slides or merges the returned state
    /// equals `self` and nothing spawns; otherwise the new state carries the
    /// moved cells, one freshly spawned 2 and the updated score.
    pub fn swipe<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        direction: Direction,
        rng: &mut R,
    ) -> (GameState, MoveReport) {
        let resolution = resolve(grid, &self.cells, direction);
        if resolution.moves == 0 {
            return (self.clone(), MoveReport::unchanged(direction));
        }

        let mut next = GameState {
            score: self.score.saturating_add(resolution.score_delta),
            cells: resolution.cells,
            max_cell_id: self.max_cell_id,
        };
        let mut events = resolution.events;
        if let Some(cell) = next.spawn_cell(grid, rng) {
            events.push(MoveEvent::Spawned {
                id: cell.id,
                at: cell.axial,
            });
        }
        debug_assert!(next.validate(grid).is_ok(), "swipe broke board invariants");

        let report = MoveReport {
            direction,
            moves: resolution.moves,
            merges: resolution.merges,
            score_delta: resolution.score_delta,
            events,
        };
        (next, report)
    }

    /// True when at least one of the six directions would change the board.
    pub fn has_legal_move(&self, grid: &Grid) -> bool {
        Direction::ALL
            .into_iter()
            .any(|d| resolve(grid, &self.cells, d).moves > 0)
    }

    fn spawn_cell<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Cell> {
        let occupied: HashSet<AxialCoord> = self.cells.iter().map(|c| c.axial).collect();
        let free: Vec<AxialCoord> = grid
            .positions()
            .iter()
            .copied()
            .filter(|p| !occupied.contains(p))
            .collect();
        let at = *free.choose(rng)?;
        self.max_cell_id += 1;
        let cell = Cell::spawn(self.max_cell_id, at);
        self.cells.push(cell);
        Some(cell)
    }
}

fn resolve(grid: &Grid, cells: &[Cell], direction: Direction) -> Resolution {
    let step = direction.vector();

    let mut sorted = cells.to_vec();
    sorted.sort_by_key(|c| Reverse(c.axial.dot(step)));
    let mut working: Vec<Option<Cell>> = sorted.into_iter().map(Some).collect();

    // Dense position -> index into `working`.
    let mut occupant: Vec<Option<usize>> = vec![None; grid.slot_count()];
    for (i, cell) in working.iter().enumerate() {
        if let Some(slot) = cell.and_then(|c| grid.slot(c.axial)) {
            occupant[slot] = Some(i);
        }
    }

    let mut spent: HashSet<u64> = HashSet::new();
    let mut moves = 0u32;
    let mut merges = 0u32;
    let mut score_delta = 0u64;
    let mut events = Vec::new();

    for i in 0..working.len() {
        let Some(mut cell) = working[i] else {
            continue;
        };
        let origin = cell.axial;

        loop {
            if spent.contains(&cell.id) {
                break;
            }
            let Some(here) = grid.slot(cell.axial) else {
                break;
            };
            let next = cell.axial + step;
            let Some(there) = grid.slot(next) else {
                break;
            };

            match occupant[there] {
                None => {
                    occupant[here] = None;
                    occupant[there] = Some(i);
                    cell.axial = next;
                    moves += 1;
                }
                Some(j) => {
                    // Cells ahead always sort earlier, so `j` has settled.
                    let Some(other) = working[j] else {
                        break;
                    };
                    // A tile that already merged this move blocks like a
                    // different value: 2,2,4 settles as 4,4, never 8.
                    if !cell.can_merge_with(&other) || spent.contains(&other.id) {
                        break;
                    }
                    let Some(doubled) = cell.value.checked_mul(2) else {
                        break;
                    };
                    working[j] = None;
                    occupant[here] = None;
                    occupant[there] = Some(i);
                    cell.axial = next;
                    cell.value = doubled;
                    score_delta = score_delta.saturating_add(cell.value);
                    spent.insert(cell.id);
                    moves += 1;
                    merges += 1;
                    events.push(MoveEvent::Merged {
                        id: cell.id,
                        absorbed: other.id,
                        at: next,
                        value: cell.value,
                    });
                }
            }
        }

        if cell.axial != origin {
            events.push(MoveEvent::Moved {
                id: cell.id,
                from: origin,
                to: cell.axial,
            });
        }
        working[i] = Some(cell);
    }

    Resolution {
        cells: working.into_iter().flatten().collect(),
        moves,
        merges,
        score_delta,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cell(id: u64, q: i32, r: i32, value: u64) -> Cell {
        Cell {
            id,
            axial: AxialCoord::new(q, r),
            value,
        }
    }

    fn value_at(s: &GameState, q: i32, r: i32) -> Option<u64> {
        s.cell_at(AxialCoord::new(q, r)).map(|c| c.value)
    }

    #[test]
    fn new_game_has_single_two() {
        let grid = Grid::default();
        let mut rng = StdRng::seed_from_u64(1);
        let s = GameState::new_game(&grid, &mut rng);
        assert_eq!(s.score(), 0);
        assert_eq!(s.max_cell_id(), 0);
        assert_eq!(s.cells().len(), 1);
        assert_eq!(s.cells()[0].value, 2);
        assert!(grid.contains(s.cells()[0].axial));
    }

    #[test]
    fn radius_two_pair_merges_against_edge() {
        let grid = Grid::new(2).unwrap();
        let s = GameState::from_cells(&grid, vec![cell(1, -1, 0, 2), cell(2, 0, 0, 2)], 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let (next, report) = s.swipe(&grid, Direction::DownRight, &mut rng);

        assert!(report.moves >= 1);
        assert_eq!(report.merges, 1);
        assert_eq!(report.score_delta, 4);
        assert_eq!(next.score(), 4);
        assert_eq!(value_at(&next, 1, 0), Some(4));
        assert_eq!(next.cells().len(), 2);

        let spawned = report.spawned().unwrap();
        assert_eq!(spawned.value, 2);
        assert_eq!(spawned.id, 3);
        assert_ne!(spawned.axial, AxialCoord::new(1, 0));
        assert_eq!(next.max_cell_id(), 3);
    }

    #[test]
    fn three_equal_in_a_row_merge_once() {
        let grid = Grid::default();
        let s = GameState::from_cells(
            &grid,
            vec![cell(1, -2, 0, 2), cell(2, -1, 0, 2), cell(3, 0, 0, 2)],
            0,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let (next, report) = s.swipe(&grid, Direction::DownRight, &mut rng);

        assert_eq!(report.merges, 1);
        assert_eq!(value_at(&next, 2, 0), Some(4));
        assert_eq!(value_at(&next, 1, 0), Some(2));
        assert_eq!(next.score(), 4);
    }

    #[test]
    fn merged_cell_does_not_absorb_again() {
        let grid = Grid::default();
        let s = GameState::from_cells(
            &grid,
            vec![cell(1, 2, 0, 2), cell(2, 1, 0, 2), cell(3, 0, 0, 4)],
            0,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let (next, report) = s.swipe(&grid, Direction::DownRight, &mut rng);

        assert_eq!(report.merges, 1);
        assert_eq!(value_at(&next, 2, 0), Some(4));
        assert_eq!(value_at(&next, 1, 0), Some(4));
        assert_eq!(next.score(), 4);
    }

    #[test]
    fn trailing_cell_survives_merge() {
        let grid = Grid::new(2).unwrap();
        let s = GameState::from_cells(&grid, vec![cell(5, 0, 1, 8), cell(9, 0, 0, 8)], 10).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let (next, report) = s.swipe(&grid, Direction::Down, &mut rng);

        let merged = next.cell_at(AxialCoord::new(0, 1)).unwrap();
        assert_eq!(merged.id, 9);
        assert_eq!(merged.value, 16);
        assert_eq!(next.score(), 26);
        assert!(report.events.contains(&MoveEvent::Merged {
            id: 9,
            absorbed: 5,
            at: AxialCoord::new(0, 1),
            value: 16,
        }));
    }

    #[test]
    fn slides_travel_multiple_steps() {
        let grid = Grid::default();
        let s = GameState::from_cells(&grid, vec![cell(1, 0, 2, 2)], 0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let (next, report) = s.swipe(&grid, Direction::Up, &mut rng);

        assert_eq!(report.moves, 4);
        assert_eq!(report.merges, 0);
        assert_eq!(next.cell_at(AxialCoord::new(0, -2)).map(|c| c.id), Some(1));
        assert_eq!(report.events[0], MoveEvent::Moved {
            id: 1,
            from: AxialCoord::new(0, 2),
            to: AxialCoord::new(0, -2),
        });
        assert!(matches!(report.events[1], MoveEvent::Spawned { id: 2, .. }));
    }

    #[test]
    fn blocked_swipe_is_a_no_op() {
        let grid = Grid::default();
        let s = GameState::from_cells(&grid, vec![cell(1, 0, -2, 2), cell(2, 0, -1, 4)], 6).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let (next, report) = s.swipe(&grid, Direction::Up, &mut rng);

        assert!(!report.changed());
        assert!(report.events.is_empty());
        assert_eq!(next, s);
    }

    #[test]
    fn full_board_without_pairs_is_stuck() {
        let grid = Grid::new(2).unwrap();
        let ring = [(1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1)];
        let mut cells = vec![cell(0, 0, 0, 2)];
        for (i, (q, r)) in ring.into_iter().enumerate() {
            let value = if i % 2 == 0 { 4 } else { 8 };
            cells.push(cell(i as u64 + 1, q, r, value));
        }
        let s = GameState::from_cells(&grid, cells, 0).unwrap();
        assert!(!s.has_legal_move(&grid));

        let mut rng = StdRng::seed_from_u64(0);
        for d in Direction::ALL {
            let (next, report) = s.swipe(&grid, d, &mut rng);
            assert!(!report.changed());
            assert_eq!(next, s);
        }
    }

    #[test]
    fn full_board_with_a_pair_can_move() {
        let grid = Grid::new(2).unwrap();
        let ring = [(1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1)];
        let mut cells = vec![cell(0, 0, 0, 4)];
        for (i, (q, r)) in ring.into_iter().enumerate() {
            let value = if i % 2 == 0 { 4 } else { 8 };
            cells.push(cell(i as u64 + 1, q, r, value));
        }
        let s = GameState::from_cells(&grid, cells, 0).unwrap();
        assert!(s.has_legal_move(&grid));
    }

    #[test]
    fn restart_resets_everything() {
        let grid = Grid::default();
        let mut rng = StdRng::seed_from_u64(21);
        let mut s = GameState::new_game(&grid, &mut rng);
        for d in Direction::ALL.into_iter().cycle().take(30) {
            s = s.swipe(&grid, d, &mut rng).0;
        }
        assert!(s.cells().len() > 1);
        let s = GameState::restart(&grid, &mut rng);
        assert_eq!(s.score(), 0);
        assert_eq!(s.cells().len(), 1);
        assert_eq!(s.cells()[0].value, 2);
        assert_eq!(s.max_cell_id(), 0);
    }

    #[test]
    fn from_cells_rejects_bad_layouts() {
        let grid = Grid::new(2).unwrap();
        assert!(matches!(
            GameState::from_cells(&grid, vec![cell(1, 2, 0, 2)], 0),
            Err(GameError::OutOfGrid(_))
        ));
        assert!(matches!(
            GameState::from_cells(&grid, vec![cell(1, 0, 0, 2), cell(2, 0, 0, 4)], 0),
            Err(GameError::Overlap(_))
        ));
        assert!(matches!(
            GameState::from_cells(&grid, vec![cell(1, 0, 0, 2), cell(1, 1, 0, 4)], 0),
            Err(GameError::DuplicateId(1))
        ));
        assert!(matches!(
            GameState::from_cells(&grid, vec![cell(1, 0, 0, 3)], 0),
            Err(GameError::InvalidValue(3))
        ));
    }

    #[test]
    fn from_cells_rejects_values_the_board_cannot_reach() {
        let grid = Grid::new(2).unwrap();
        let huge = 1u64 << 63;
        assert!(matches!(
            GameState::from_cells(&grid, vec![cell(1, 0, 0, huge), cell(2, 1, 0, huge)], 0),
            Err(GameError::InvalidValue(v)) if v == huge
        ));
        assert!(GameState::from_cells(&grid, vec![cell(1, 0, 0, grid.max_value())], 0).is_ok());
        assert!(matches!(
            GameState::from_cells(&grid, vec![cell(1, 0, 0, grid.max_value() * 2)], 0),
            Err(GameError::InvalidValue(_))
        ));
    }

    #[test]
    fn top_value_pair_blocks_instead_of_overflowing() {
        let grid = Grid::new(2).unwrap();
        let huge = 1u64 << 63;
        let cells = [cell(1, 0, 0, huge), cell(2, 1, 0, huge)];
        let resolution = resolve(&grid, &cells, Direction::DownRight);
        assert_eq!(resolution.moves, 0);
        assert_eq!(resolution.merges, 0);
        assert_eq!(resolution.cells.len(), 2);
    }

    #[test]
    fn score_saturates_near_the_limit() {
        let grid = Grid::new(2).unwrap();
        let s = GameState::from_cells(&grid, vec![cell(1, -1, 0, 2), cell(2, 0, 0, 2)], u64::MAX - 1).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let (next, report) = s.swipe(&grid, Direction::DownRight, &mut rng);
        assert_eq!(report.merges, 1);
        assert_eq!(next.score(), u64::MAX);
    }
}
