use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Smallest side length the size formula is allowed to produce.
pub const MIN_BOARD_SIZE: Coord = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: u8,
    pub difficulty: u8,
}

impl GameConfig {
    pub const fn new_unchecked(players: u8, difficulty: u8) -> Self {
        Self {
            players,
            difficulty,
        }
    }

    pub fn new(players: u8, difficulty: u8) -> Self {
        Self::new_unchecked(players.clamp(1, 10), difficulty.clamp(1, 10))
    }

    /// Side length of the square board, scaled up by difficulty and by the
    /// square root of the player count.
    pub fn board_size(&self) -> Coord {
        let scale = 1.0 + (f64::from(self.difficulty) - 1.0) * 0.15;
        let side = (scale * f64::from(self.players).sqrt() * 10.0).round() as Coord;
        side.max(MIN_BOARD_SIZE)
    }

    /// Correction term keeping entity counts proportional to the player count.
    pub fn player_modifier(&self) -> CellCount {
        (f64::from(self.players).sqrt() * 10.0).round() as CellCount
    }

    pub fn ladder_count(&self) -> CellCount {
        let raw =
            (f64::from(self.difficulty) * f64::from(self.board_size()) / 7.5).floor() as i64;
        (raw - self.player_modifier() as i64).unsigned_abs() as CellCount
    }

    pub fn snake_count(&self) -> CellCount {
        let raw =
            (f64::from(self.difficulty) * f64::from(self.board_size()) / 10.0).floor() as CellCount;
        raw + self.player_modifier()
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.board_size())
    }
}

/// One placed entity. `start` is the lower endpoint (a ladder's foot or a
/// snake's tail) and `end` the upper one (top or head); drawn paths never
/// descend in `y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transit {
    pub start: Coord2,
    pub end: Coord2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Coord2,
}

/// A fully generated board: the labeled grid, the placed entities, and the
/// players. Player positions are mutated by the play engine only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Cell>,
    ladders: Vec<Transit>,
    snakes: Vec<Transit>,
    players: Vec<Player>,
}

impl Board {
    pub(crate) fn new(
        grid: Array2<Cell>,
        ladders: Vec<Transit>,
        snakes: Vec<Transit>,
        players: Vec<Player>,
    ) -> Self {
        Self {
            grid,
            ladders,
            snakes,
            players,
        }
    }

    pub fn board_size(&self) -> Coord {
        self.grid.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.board_size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.board_size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    pub fn grid(&self) -> &Array2<Cell> {
        &self.grid
    }

    pub fn ladders(&self) -> &[Transit] {
        &self.ladders
    }

    pub fn snakes(&self) -> &[Transit] {
        &self.snakes
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// The ladder whose foot sits at `coords`, if any.
    pub fn ladder_from(&self, coords: Coord2) -> Option<Transit> {
        self.ladders.iter().copied().find(|l| l.start == coords)
    }

    /// The snake whose head sits at `coords`, if any.
    pub fn snake_from(&self, coords: Coord2) -> Option<Transit> {
        self.snakes.iter().copied().find(|s| s.end == coords)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.grid[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_size_matches_documented_formula() {
        // round((1 + 4 * 0.15) * sqrt(2) * 10) = round(22.63) = 23
        let config = GameConfig::new(2, 5);
        assert_eq!(config.board_size(), 23);
        assert_eq!(config.total_cells(), 529);
    }

    #[test]
    fn board_size_is_deterministic() {
        for players in 1..=10 {
            for difficulty in 1..=10 {
                let a = GameConfig::new(players, difficulty);
                let b = GameConfig::new(players, difficulty);
                assert_eq!(a.board_size(), b.board_size());
            }
        }
    }

    #[test]
    fn board_size_never_drops_below_minimum() {
        assert_eq!(GameConfig::new_unchecked(0, 0).board_size(), MIN_BOARD_SIZE);
        for players in 1..=10 {
            for difficulty in 1..=10 {
                assert!(GameConfig::new(players, difficulty).board_size() >= MIN_BOARD_SIZE);
            }
        }
    }

    #[test]
    fn new_clamps_out_of_range_inputs() {
        let config = GameConfig::new(0, 42);
        assert_eq!(config.players, 1);
        assert_eq!(config.difficulty, 10);
    }

    #[test]
    fn entity_counts_for_reference_config() {
        let config = GameConfig::new(2, 5);
        assert_eq!(config.player_modifier(), 14);
        // |floor(5 * 23 / 7.5) - 14| = |15 - 14|
        assert_eq!(config.ladder_count(), 1);
        // floor(5 * 23 / 10) + 14 = 11 + 14
        assert_eq!(config.snake_count(), 25);
    }

    #[test]
    fn validate_coords_rejects_out_of_bounds() {
        let board = RandomBoardGenerator::new(1).generate(GameConfig::new(1, 1));
        let size = board.board_size();
        assert_eq!(board.validate_coords((0, 0)), Ok((0, 0)));
        assert_eq!(
            board.validate_coords((size, 0)),
            Err(GameError::InvalidCoords)
        );
    }
}
