use crate::*;
pub use geometry::*;
pub use random::*;

mod geometry;
mod random;

/// Builds a complete board from a validated config. Infallible: placement
/// that cannot be satisfied degrades to a partial entity set (logged), and
/// allocation failure aborts the process.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}

/// Which entity a placement pass is stamping onto the grid. Ladders and
/// snakes place identically; only the role triple differs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Ladder,
    Snake,
}

impl EntityKind {
    /// Role of the first (lowest) cell of the path.
    pub const fn start_role(self) -> Role {
        match self {
            Self::Ladder => Role::LadderFoot,
            Self::Snake => Role::SnakeTail,
        }
    }

    /// Role of the interior path cells.
    pub const fn path_role(self) -> Role {
        match self {
            Self::Ladder => Role::LadderRung,
            Self::Snake => Role::SnakeBody,
        }
    }

    /// Role of the last (highest) cell of the path.
    pub const fn end_role(self) -> Role {
        match self {
            Self::Ladder => Role::LadderTop,
            Self::Snake => Role::SnakeHead,
        }
    }
}
