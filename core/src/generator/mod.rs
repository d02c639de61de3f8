use crate::*;
pub use random::*;

mod random;

/// Shape and piece variety of a board to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub piece_types: PieceType,
}

impl BoardConfig {
    pub const fn new(width: Coord, height: Coord, piece_types: PieceType) -> Self {
        Self {
            width,
            height,
            piece_types,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        board::check_dimensions(self.width, self.height)?;
        if self.piece_types == 0 {
            return Err(GameError::NoPieceTypes);
        }
        Ok(())
    }
}

impl From<LevelConfig> for BoardConfig {
    fn from(level: LevelConfig) -> Self {
        Self::new(level.board_size, level.board_size, level.piece_types)
    }
}

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board>;
}
