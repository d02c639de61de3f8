use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Parameters of a single level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Seconds available to clear the board.
    pub time_limit: u32,
    /// Side length of the square playable area.
    pub board_size: Coord,
    /// Number of distinct piece types drawn from.
    pub piece_types: PieceType,
}

impl LevelConfig {
    pub const fn new(time_limit: u32, board_size: Coord, piece_types: PieceType) -> Self {
        Self {
            time_limit,
            board_size,
            piece_types,
        }
    }

    pub fn validate(&self) -> Result<()> {
        board::check_dimensions(self.board_size, self.board_size)?;
        if self.piece_types == 0 {
            return Err(GameError::NoPieceTypes);
        }
        Ok(())
    }
}

const DEFAULT_LEVELS: [LevelConfig; 5] = [
    LevelConfig::new(300, 10, 12),
    LevelConfig::new(240, 10, 16),
    LevelConfig::new(180, 10, 20),
    LevelConfig::new(120, 10, 22),
    LevelConfig::new(90, 10, 24),
];

/// Ordered level configurations, numbered from 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelConfig>", into = "Vec<LevelConfig>")]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl LevelTable {
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::EmptyLevelTable);
        }
        if levels.len() > usize::from(u8::MAX) {
            return Err(GameError::TooManyLevels(levels.len()));
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Looks up a 1-based level, failing for anything outside the table.
    pub fn get(&self, level: u8) -> Result<LevelConfig> {
        usize::from(level)
            .checked_sub(1)
            .and_then(|index| self.levels.get(index))
            .copied()
            .ok_or(GameError::UnknownLevel(level))
    }

    pub fn last_level(&self) -> u8 {
        self.levels.len() as u8
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &LevelConfig)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, config)| (index as u8 + 1, config))
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl TryFrom<Vec<LevelConfig>> for LevelTable {
    type Error = GameError;

    fn try_from(levels: Vec<LevelConfig>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<LevelTable> for Vec<LevelConfig> {
    fn from(table: LevelTable) -> Self {
        table.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn default_table_has_five_tightening_levels() {
        let table = LevelTable::default();

        assert_eq!(table.last_level(), 5);
        assert_eq!(table.get(1), Ok(LevelConfig::new(300, 10, 12)));
        assert_eq!(table.get(5), Ok(LevelConfig::new(90, 10, 24)));
        for (_, config) in table.iter() {
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn lookup_outside_table_fails_closed() {
        let table = LevelTable::default();

        assert_eq!(table.get(0), Err(GameError::UnknownLevel(0)));
        assert_eq!(table.get(6), Err(GameError::UnknownLevel(6)));
    }

    #[test]
    fn custom_tables_are_validated() {
        assert_eq!(LevelTable::new(vec![]), Err(GameError::EmptyLevelTable));
        assert_eq!(
            LevelTable::new(vec![LevelConfig::new(60, 3, 4)]),
            Err(GameError::OddCellCount { width: 3, height: 3 })
        );
        assert_eq!(
            LevelTable::new(vec![LevelConfig::new(60, 4, 0)]),
            Err(GameError::NoPieceTypes)
        );
        assert!(LevelTable::new(vec![LevelConfig::new(60, 4, 4)]).is_ok());
        assert_eq!(
            LevelTable::new(vec![LevelConfig::new(60, 4, 4); 256]),
            Err(GameError::TooManyLevels(256))
        );
        assert_eq!(
            LevelTable::new(vec![LevelConfig::new(60, 4, 4); 255]).map(|t| t.last_level()),
            Ok(255)
        );
    }

    #[test]
    fn table_deserializes_from_a_list() {
        let table: LevelTable =
            serde_json::from_str(r#"[{"time_limit": 30, "board_size": 2, "piece_types": 1}]"#)
                .unwrap();
        assert_eq!(table.get(1), Ok(LevelConfig::new(30, 2, 1)));

        let empty = serde_json::from_str::<LevelTable>("[]");
        assert!(empty.is_err());
    }
}
