use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// Projections tried for a single entity before the attempt is abandoned.
const END_POINT_RETRIES: u32 = 32;

/// Attempt budget per requested entity; when it runs out the placer returns
/// whatever it managed to place.
const ATTEMPTS_PER_ENTITY: u32 = 64;

/// Generation strategy that samples entity start points, lengths, and slopes
/// uniformly at random, rejecting any candidate that would touch or cross an
/// already placed entity.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let board_size = config.board_size();
        let mut grid = labeled_grid(board_size);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let ladders = place_entities(
            &mut rng,
            &mut grid,
            EntityKind::Ladder,
            config.ladder_count(),
        );
        let snakes = place_entities(
            &mut rng,
            &mut grid,
            EntityKind::Snake,
            config.snake_count(),
        );

        let players = vec![Player { position: (0, 0) }; usize::from(config.players)];

        Board::new(grid, ladders, snakes, players)
    }
}

/// Allocates the square grid with row-major labels `1..=board_size²`.
pub(crate) fn labeled_grid(board_size: Coord) -> Array2<Cell> {
    let side = usize::from(board_size);
    Array2::from_shape_fn((side, side), |(row, col)| Cell {
        label: (row * side + col) as CellCount + 1,
        role: Role::Empty,
    })
}

/// Inclusive uniform draw from `[min, max]`. `random_range` rejects instead
/// of taking a modulus, so the distribution stays flat even when the span
/// does not divide the RNG's output range.
fn random_between<R: Rng>(rng: &mut R, min: Coord, max: Coord) -> Coord {
    rng.random_range(min..=max)
}

/// True when `coords` or any in-bounds cardinal neighbor already belongs to
/// an entity. Out-of-bounds neighbors are skipped.
fn neighbors_occupied(grid: &Array2<Cell>, coords: Coord2) -> bool {
    if !grid[coords.to_nd_index()].role.is_empty() {
        return true;
    }
    grid.iter_neighbors(coords)
        .any(|pos| !grid[pos.to_nd_index()].role.is_empty())
}

/// Places up to `count` entities of `kind` onto the grid.
///
/// A shrinking window spreads entities out: every third placement raises the
/// minimum start row and shortens the maximum length. All retry loops are
/// bounded, so a board too crowded for the requested count terminates with a
/// partial result instead of spinning.
fn place_entities<R: Rng>(
    rng: &mut R,
    grid: &mut Array2<Cell>,
    kind: EntityKind,
    count: CellCount,
) -> Vec<Transit> {
    let board_size = grid.nrows() as Coord;
    let mut placed: Vec<Transit> = Vec::with_capacity(count as usize);

    if count == 0 || board_size < 2 {
        return placed;
    }

    let mut minimum_start_y: Coord = 0;
    let mut maximum_length: Coord = board_size / 2;
    let mut attempts_left = count.saturating_mul(ATTEMPTS_PER_ENTITY);

    while (placed.len() as CellCount) < count {
        if attempts_left == 0 {
            log::warn!(
                "Placement budget exhausted, placed {} of {} requested {:?} entities",
                placed.len(),
                count,
                kind
            );
            break;
        }
        attempts_left -= 1;

        // board_size - 2 keeps the start off the last column and row
        let start = (
            random_between(rng, 0, board_size - 2),
            random_between(rng, minimum_start_y, board_size - 2),
        );

        if neighbors_occupied(grid, start) {
            continue;
        }

        let length = random_between(rng, 2, maximum_length.max(2));

        let Some(suggested_end) = suggest_end_point(rng, grid, start, length) else {
            continue;
        };

        let Some(end) = draw_path(grid, kind, start, suggested_end) else {
            continue;
        };

        placed.push(Transit { start, end });

        // Push later entities higher up the board and shorten them.
        if placed.len() % 3 == 0 {
            minimum_start_y = (minimum_start_y + 1).min(board_size - 2);
            maximum_length = maximum_length.saturating_sub(1).max(2);
        }
    }

    placed
}

/// Projects candidate end points until one clears the occupancy check, up to
/// [`END_POINT_RETRIES`] tries.
fn suggest_end_point<R: Rng>(
    rng: &mut R,
    grid: &Array2<Cell>,
    start: Coord2,
    length: Coord,
) -> Option<Coord2> {
    let board_size = grid.nrows() as Coord;
    for _ in 0..END_POINT_RETRIES {
        let slope = Slope::ALL[usize::from(random_between(rng, 0, 6))];
        let suggested = project(board_size, start, slope, length);
        if suggested != start && !neighbors_occupied(grid, suggested) {
            return Some(suggested);
        }
    }
    None
}

/// Walks the line from `start` toward `suggested_end`, stamping the entity's
/// roles: start role on the first cell, end role on the last, path role in
/// between. Drawing stops short of the first cell another entity owns, and
/// the last stamped cell becomes the real end point. A path truncated below
/// two cells is rolled back and rejected.
fn draw_path(
    grid: &mut Array2<Cell>,
    kind: EntityKind,
    start: Coord2,
    suggested_end: Coord2,
) -> Option<Coord2> {
    let mut marked: Vec<Coord2> = Vec::new();

    for pos in LinePoints::new(start, suggested_end) {
        if !grid[pos.to_nd_index()].role.is_empty() {
            break;
        }
        grid[pos.to_nd_index()].role = kind.path_role();
        marked.push(pos);
    }

    if marked.len() < 2 {
        for pos in marked {
            grid[pos.to_nd_index()].role = Role::Empty;
        }
        return None;
    }

    let end = *marked.last()?;
    grid[start.to_nd_index()].role = kind.start_role();
    grid[end.to_nd_index()].role = kind.end_role();
    Some(end)
}
