use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Largest interior side length, leaving room for the frame on both sides.
pub const MAX_SIDE: Coord = Coord::MAX - 2;

/// Rectangular grid of tiles surrounded by a one-cell frame of permanently empty cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Tile>,
}

impl Board {
    /// Builds a framed board from row-major interior piece types.
    pub fn from_kinds(width: Coord, height: Coord, kinds: &[PieceType]) -> Result<Self> {
        check_dimensions(width, height)?;
        if kinds.len() != usize::from(mult(width, height)) {
            return Err(GameError::InvalidDimensions { width, height });
        }

        let rows = height + 2;
        let cols = width + 2;
        let grid = Array2::from_shape_fn([usize::from(rows), usize::from(cols)], |(r, c)| {
            let pos = Point::new(r as Coord, c as Coord);
            let id = TileId(mult(pos.row, cols) + CellCount::from(pos.col));
            let is_border = pos.row == 0 || pos.row == rows - 1 || pos.col == 0 || pos.col == cols - 1;
            if is_border {
                Tile::border(id, pos)
            } else {
                let index = usize::from(pos.row - 1) * usize::from(width) + usize::from(pos.col - 1);
                Tile::piece(id, pos, kinds[index])
            }
        });

        Ok(Self { grid })
    }

    /// Parses an interior layout where each character is a base-36 piece type and `.` is an
    /// already removed cell.
    pub fn from_layout(rows: &[&str]) -> Result<Self> {
        let height: Coord = rows.len().try_into().map_err(|_| GameError::InvalidCoords)?;
        let width: Coord = rows
            .first()
            .map_or(0, |row| row.chars().count())
            .try_into()
            .map_err(|_| GameError::InvalidCoords)?;

        let mut kinds = Vec::with_capacity(usize::from(mult(width, height)));
        let mut removed = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != usize::from(width) {
                return Err(GameError::InvalidDimensions { width, height });
            }
            for (c, ch) in row.chars().enumerate() {
                if ch == '.' {
                    removed.push(Point::new(r as Coord + 1, c as Coord + 1));
                    kinds.push(0);
                } else {
                    let kind = ch.to_digit(36).ok_or(GameError::InvalidCoords)?;
                    kinds.push(kind as PieceType);
                }
            }
        }

        let mut board = Self::from_kinds(width, height, &kinds)?;
        for pos in removed {
            board.grid[pos.to_nd_index()].mark_removed();
        }
        Ok(board)
    }

    /// Framed size as `(rows, cols)`.
    pub fn size(&self) -> (Coord, Coord) {
        let dim = self.grid.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    /// Playable size as `(width, height)`.
    pub fn interior_size(&self) -> (Coord, Coord) {
        let (rows, cols) = self.size();
        (cols - 2, rows - 2)
    }

    pub fn validate_coords(&self, pos: Point) -> Result<Point> {
        let (rows, cols) = self.size();
        if pos.row < rows && pos.col < cols {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, pos: Point) -> Option<&Tile> {
        self.grid.get(pos.to_nd_index())
    }

    pub fn is_border(&self, pos: Point) -> bool {
        let (rows, cols) = self.size();
        pos.row == 0 || pos.col == 0 || pos.row + 1 == rows || pos.col + 1 == cols
    }

    /// All cells in row-major order, frame included.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter()
    }

    /// Tiles still in play, in row-major order.
    pub fn active_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter().filter(|tile| tile.is_active())
    }

    pub fn active_count(&self) -> CellCount {
        self.active_tiles().count() as CellCount
    }

    pub fn is_cleared(&self) -> bool {
        self.active_tiles().next().is_none()
    }

    /// Number of active tiles per piece type.
    pub fn kind_counts(&self) -> BTreeMap<PieceType, CellCount> {
        let mut counts = BTreeMap::new();
        for tile in self.active_tiles() {
            *counts.entry(tile.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Whether every piece type among active tiles occurs an even number of times.
    pub fn is_paired(&self) -> bool {
        self.kind_counts().values().all(|count| count % 2 == 0)
    }

    pub fn stats(&self) -> BoardStats {
        let mut stats = BoardStats::default();
        for tile in self.tiles() {
            stats.total += 1;
            if tile.is_empty() {
                stats.empty += 1;
            } else {
                stats.active += 1;
                *stats.kind_distribution.entry(tile.kind).or_insert(0) += 1;
            }
            if tile.is_removed() {
                stats.matched += 1;
            }
        }
        stats
    }

    pub(crate) fn set_selected(&mut self, pos: Point, selected: bool) {
        self.grid[pos.to_nd_index()].set_selected(selected);
    }

    pub(crate) fn clear_selected(&mut self) {
        for tile in self.grid.iter_mut() {
            tile.set_selected(false);
        }
    }

    pub(crate) fn remove_pair(&mut self, a: Point, b: Point) {
        self.grid[a.to_nd_index()].mark_removed();
        self.grid[b.to_nd_index()].mark_removed();
    }

    /// Reassigns piece types to active tiles in row-major order, clearing their selection.
    pub(crate) fn assign_active_kinds(&mut self, kinds: &[PieceType]) {
        let mut kinds = kinds.iter().copied();
        for tile in self.grid.iter_mut().filter(|tile| tile.is_active()) {
            if let Some(kind) = kinds.next() {
                tile.kind = kind;
            }
            tile.set_selected(false);
        }
    }
}

impl Index<Point> for Board {
    type Output = Tile;

    fn index(&self, pos: Point) -> &Self::Output {
        &self.grid[pos.to_nd_index()]
    }
}

/// Renders the interior in the `from_layout` format, selected tiles in upper case.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size();
        for row in 1..rows - 1 {
            for col in 1..cols - 1 {
                let tile = &self[Point::new(row, col)];
                let ch = if tile.is_empty() {
                    '.'
                } else {
                    let ch = char::from_digit(tile.kind.into(), 36).unwrap_or('?');
                    if tile.is_selected() {
                        ch.to_ascii_uppercase()
                    } else {
                        ch
                    }
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub total: CellCount,
    pub active: CellCount,
    pub matched: CellCount,
    pub empty: CellCount,
    pub kind_distribution: BTreeMap<PieceType, CellCount>,
}

pub(crate) fn check_dimensions(width: Coord, height: Coord) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
        return Err(GameError::InvalidDimensions { width, height });
    }
    if mult(width, height) % 2 != 0 {
        return Err(GameError::OddCellCount { width, height });
    }
    Ok(())
}
