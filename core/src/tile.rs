use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TileFlags: u8 {
        const SELECTED = 1;
        const REMOVED  = 1 << 1;
        /// Never occupiable, set on border cells and on removed tiles.
        const EMPTY    = 1 << 2;
    }
}

/// Row-major index of a cell inside the framed grid, unique per board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub CellCount);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: PieceType,
    pub pos: Point,
    pub flags: TileFlags,
}

impl Tile {
    pub const fn piece(id: TileId, pos: Point, kind: PieceType) -> Self {
        Self {
            id,
            kind,
            pos,
            flags: TileFlags::empty(),
        }
    }

    pub const fn border(id: TileId, pos: Point) -> Self {
        Self {
            id,
            kind: 0,
            pos,
            flags: TileFlags::EMPTY,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.flags.contains(TileFlags::EMPTY)
    }

    pub const fn is_removed(&self) -> bool {
        self.flags.contains(TileFlags::REMOVED)
    }

    pub const fn is_selected(&self) -> bool {
        self.flags.contains(TileFlags::SELECTED)
    }

    /// Non-empty and not removed, i.e. still in play.
    pub const fn is_active(&self) -> bool {
        !self.is_empty() && !self.is_removed()
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.flags.set(TileFlags::SELECTED, selected);
    }

    pub(crate) fn mark_removed(&mut self) {
        self.flags.remove(TileFlags::SELECTED);
        self.flags.insert(TileFlags::REMOVED | TileFlags::EMPTY);
    }
}
