use crate::types::{Coord, Coord2};

/// The seven slopes an entity path may take. None of them decreases `y`:
/// ladders and snakes only extend upward from their start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slope {
    Up,
    UpRight,
    UpRightSteep,
    RightShallow,
    UpLeftSteep,
    LeftShallow,
    LeftLow,
}

impl Slope {
    pub const ALL: [Slope; 7] = [
        Slope::Up,
        Slope::UpRight,
        Slope::UpRightSteep,
        Slope::RightShallow,
        Slope::UpLeftSteep,
        Slope::LeftShallow,
        Slope::LeftLow,
    ];

    /// Offset `(dx, dy)` produced by following this slope for `length`
    /// cells. The shallow axis of an uneven diagonal advances by half the
    /// length; `LeftLow` rises by a single cell regardless of length.
    pub const fn offset(self, length: Coord) -> (i32, i32) {
        let len = length as i32;
        let half = len / 2;
        match self {
            Self::Up => (0, len),
            Self::UpRight => (len, len),
            Self::UpRightSteep => (half, len),
            Self::RightShallow => (len, half),
            Self::UpLeftSteep => (-half, len),
            Self::LeftShallow => (-len, half),
            Self::LeftLow => (-len, 1),
        }
    }
}

/// Projects `start` along `slope` for `length` cells, clamping both axes
/// into `[0, board_size - 1]`.
pub fn project(board_size: Coord, start: Coord2, slope: Slope, length: Coord) -> Coord2 {
    let (dx, dy) = slope.offset(length);
    let max = i32::from(board_size) - 1;
    let x = (i32::from(start.0) + dx).clamp(0, max);
    let y = (i32::from(start.1) + dy).clamp(0, max);
    (x as Coord, y as Coord)
}

/// Integer incremental (Bresenham) walk from `start` to `end`, inclusive of
/// both endpoints. A degenerate line yields its single point once.
#[derive(Clone, Debug)]
pub struct LinePoints {
    current: (i32, i32),
    end: (i32, i32),
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    error: i32,
    done: bool,
}

impl LinePoints {
    pub fn new(start: Coord2, end: Coord2) -> Self {
        let current = (i32::from(start.0), i32::from(start.1));
        let end = (i32::from(end.0), i32::from(end.1));
        let dx = (end.0 - current.0).abs();
        let dy = -(end.1 - current.1).abs();
        Self {
            current,
            end,
            dx,
            dy,
            sx: if current.0 < end.0 { 1 } else { -1 },
            sy: if current.1 < end.1 { 1 } else { -1 },
            error: dx + dy,
            done: false,
        }
    }

    fn advance(&mut self) {
        if self.current == self.end {
            self.done = true;
            return;
        }

        let e2 = 2 * self.error;

        if e2 >= self.dy {
            if self.current.0 == self.end.0 {
                self.done = true;
                return;
            }
            self.error += self.dy;
            self.current.0 += self.sx;
        }

        if e2 <= self.dx {
            if self.current.1 == self.end.1 {
                self.done = true;
                return;
            }
            self.error += self.dx;
            self.current.1 += self.sy;
        }
    }
}

impl Iterator for LinePoints {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = (self.current.0 as Coord, self.current.1 as Coord);
        self.advance();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_line_yields_exactly_its_point() {
        let points: Vec<_> = LinePoints::new((3, 3), (3, 3)).collect();
        assert_eq!(points, vec![(3, 3)]);
    }

    #[test]
    fn vertical_line_visits_every_row() {
        let points: Vec<_> = LinePoints::new((2, 0), (2, 3)).collect();
        assert_eq!(points, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn diagonal_line_steps_both_axes() {
        let points: Vec<_> = LinePoints::new((0, 0), (3, 3)).collect();
        assert_eq!(points, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn leftward_line_ends_at_its_endpoint() {
        let points: Vec<_> = LinePoints::new((4, 1), (0, 3)).collect();
        assert_eq!(points.first(), Some(&(4, 1)));
        assert_eq!(points.last(), Some(&(0, 3)));
    }

    #[test]
    fn no_slope_decreases_y() {
        for slope in Slope::ALL {
            for length in 2..10 {
                let (_, dy) = slope.offset(length);
                assert!(dy >= 1, "{slope:?} must rise, got dy {dy}");
            }
        }
    }

    #[test]
    fn projection_clamps_into_bounds() {
        for slope in Slope::ALL {
            let low = project(5, (0, 0), slope, 4);
            let high = project(5, (4, 3), slope, 4);
            for point in [low, high] {
                assert!(point.0 <= 4 && point.1 <= 4, "{slope:?} escaped: {point:?}");
            }
        }
        // leftward overshoot lands on the 0 column, not wrapped high
        assert_eq!(project(5, (1, 0), Slope::LeftShallow, 4), (0, 2));
    }
}
