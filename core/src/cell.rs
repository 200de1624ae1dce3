use serde::{Deserialize, Serialize};

use crate::CellCount;

/// Classification of a board square. Assigned during generation, read-only
/// afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Empty,
    LadderFoot,
    LadderRung,
    LadderTop,
    SnakeTail,
    SnakeBody,
    SnakeHead,
}

impl Role {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_ladder(self) -> bool {
        matches!(self, Self::LadderFoot | Self::LadderRung | Self::LadderTop)
    }

    pub const fn is_snake(self) -> bool {
        matches!(self, Self::SnakeTail | Self::SnakeBody | Self::SnakeHead)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Empty
    }
}

/// A single board square: a fixed player-visible label plus the role
/// generation stamped onto it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub label: CellCount,
    pub role: Role,
}
