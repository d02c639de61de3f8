use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and side lengths.
pub type Coord = u8;

/// Count type used for tile counts.
pub type CellCount = u16;

/// Piece type index, always in `[0, piece_types)`.
pub type PieceType = u8;

/// Counter bumped every time the session replaces its board.
pub type BoardVersion = u64;

/// Grid position, ordered row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: Coord,
    pub col: Coord,
}

impl Point {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Steps once in `direction`, returning a value only when it remains inside `bounds` (rows, cols).
    pub fn step(self, direction: Direction, bounds: (Coord, Coord)) -> Option<Point> {
        let (d_row, d_col) = direction.delta();
        let row = self.row.checked_add_signed(d_row)?;
        if row >= bounds.0 {
            return None;
        }
        let col = self.col.checked_add_signed(d_col)?;
        if col >= bounds.1 {
            return None;
        }
        Some(Point { row, col })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self { row, col }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Point {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Orthogonal travel direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Iteration order of the path search, which decides which of several equal paths is found first.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Direction of travel from `from` to `to` when both share a row or a column.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        use core::cmp::Ordering::*;
        match (from.row.cmp(&to.row), from.col.cmp(&to.col)) {
            (Greater, Equal) => Some(Self::Up),
            (Less, Equal) => Some(Self::Down),
            (Equal, Greater) => Some(Self::Left),
            (Equal, Less) => Some(Self::Right),
            _ => None,
        }
    }
}
