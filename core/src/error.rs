use thiserror::Error;

use crate::{Coord, Status};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Board {width}x{height} has an odd number of cells, tiles cannot be paired")]
    OddCellCount { width: Coord, height: Coord },
    #[error("At least one piece type is required")]
    NoPieceTypes,
    #[error("Level {0} is not configured")]
    UnknownLevel(u8),
    #[error("Level table has no levels")]
    EmptyLevelTable,
    #[error("Level table has {0} levels, at most 255 are supported")]
    TooManyLevels(usize),
    #[error("Path must be at least two points joined by straight segments")]
    InvalidPath,
    #[error("Game is not being played (status: {0:?})")]
    NotPlaying(Status),
    #[error("Transition not allowed from status {from:?}")]
    InvalidTransition { from: Status },
    #[error("Tiles cannot be connected")]
    NotConnectable,
}

pub type Result<T> = core::result::Result<T, GameError>;
