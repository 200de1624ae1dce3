use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won { winner: usize },
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won { .. })
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// What a single move did to the player that made it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Advanced,
    ClimbedLadder,
    SlidDownSnake,
    Won,
}

/// Sequential turn resolution over a generated board. The console loop that
/// prompts for rolls and renders the grid stays outside this crate; it feeds
/// rolls in through [`PlayEngine::advance`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    state: EngineState,
    turns_taken: u32,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            state: Default::default(),
            turns_taken: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Moves `player` forward by `steps` labels, then applies the landing
    /// cell's effect: a ladder foot climbs to the ladder's top, a snake head
    /// slides down to its tail. Overshooting the final label is clamped onto
    /// it, and landing there wins the game.
    pub fn advance(&mut self, player: usize, steps: CellCount) -> Result<TurnOutcome> {
        self.check_not_finished()?;

        let board_size = self.board.board_size();
        let last_index = self.board.total_cells() - 1;

        let position = self
            .board
            .players()
            .get(player)
            .ok_or(GameError::UnknownPlayer)?
            .position;

        let target = linear_index(position, board_size)
            .saturating_add(steps)
            .min(last_index);
        let mut landed = coords_at(target, board_size);

        let mut outcome = TurnOutcome::Advanced;
        match self.board.cell_at(landed).role {
            Role::LadderFoot => {
                if let Some(ladder) = self.board.ladder_from(landed) {
                    landed = ladder.end;
                    outcome = TurnOutcome::ClimbedLadder;
                }
            }
            Role::SnakeHead => {
                if let Some(snake) = self.board.snake_from(landed) {
                    landed = snake.start;
                    outcome = TurnOutcome::SlidDownSnake;
                }
            }
            _ => {}
        }

        self.board.players_mut()[player].position = landed;
        self.turns_taken += 1;
        self.mark_started();

        if linear_index(landed, board_size) == last_index {
            self.state = EngineState::Won { winner: player };
            return Ok(TurnOutcome::Won);
        }

        Ok(outcome)
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::labeled_grid;

    /// 5x5 board with one ladder from (1, 0) to (1, 2) and one snake whose
    /// head is (3, 3) and tail (3, 1).
    fn fixture_board(player_count: usize) -> Board {
        let mut grid = labeled_grid(5);

        grid[(1, 0).to_nd_index()].role = Role::LadderFoot;
        grid[(1, 1).to_nd_index()].role = Role::LadderRung;
        grid[(1, 2).to_nd_index()].role = Role::LadderTop;

        grid[(3, 1).to_nd_index()].role = Role::SnakeTail;
        grid[(3, 2).to_nd_index()].role = Role::SnakeBody;
        grid[(3, 3).to_nd_index()].role = Role::SnakeHead;

        Board::new(
            grid,
            vec![Transit {
                start: (1, 0),
                end: (1, 2),
            }],
            vec![Transit {
                start: (3, 1),
                end: (3, 3),
            }],
            vec![
                Player { position: (0, 0) };
                player_count
            ],
        )
    }

    #[test]
    fn landing_on_a_ladder_foot_climbs_to_its_top() {
        let mut engine = PlayEngine::new(fixture_board(2));

        let outcome = engine.advance(0, 1).unwrap();

        assert_eq!(outcome, TurnOutcome::ClimbedLadder);
        assert_eq!(engine.board().players()[0].position, (1, 2));
        assert_eq!(engine.state(), EngineState::Active);
    }

    #[test]
    fn landing_on_a_snake_head_slides_to_its_tail() {
        let mut engine = PlayEngine::new(fixture_board(1));

        // label index of (3, 3) is 18
        let outcome = engine.advance(0, 18).unwrap();

        assert_eq!(outcome, TurnOutcome::SlidDownSnake);
        assert_eq!(engine.board().players()[0].position, (3, 1));
    }

    #[test]
    fn plain_moves_just_advance() {
        let mut engine = PlayEngine::new(fixture_board(1));

        assert_eq!(engine.advance(0, 2).unwrap(), TurnOutcome::Advanced);
        assert_eq!(engine.board().players()[0].position, (2, 0));
        assert_eq!(engine.turns_taken(), 1);
    }

    #[test]
    fn reaching_the_final_label_wins() {
        let mut engine = PlayEngine::new(fixture_board(2));

        // overshoot clamps onto the last cell
        let outcome = engine.advance(1, 1000).unwrap();

        assert_eq!(outcome, TurnOutcome::Won);
        assert_eq!(engine.state(), EngineState::Won { winner: 1 });
        assert!(engine.is_finished());
    }

    #[test]
    fn moves_after_the_game_ended_are_rejected() {
        let mut engine = PlayEngine::new(fixture_board(2));
        engine.advance(0, 1000).unwrap();

        assert_eq!(engine.advance(1, 3), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn unknown_player_index_is_an_error() {
        let mut engine = PlayEngine::new(fixture_board(1));
        assert_eq!(engine.advance(5, 1), Err(GameError::UnknownPlayer));
    }
}
