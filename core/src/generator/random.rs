use alloc::vec::Vec;

use super::*;

/// Draws a random type for every pair of cells, then scatters the pairs with a Fisher–Yates shuffle.
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
    fn generate(self, config: BoardConfig) -> Result<Board> {
        use rand::prelude::*;

        if let Err(err) = config.validate() {
            log::warn!("Refusing to generate board for {:?}: {}", config, err);
            return Err(err);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let pairs = config.total_cells() / 2;
        let mut kinds: Vec<PieceType> = Vec::with_capacity(config.total_cells().into());
        for _ in 0..pairs {
            let kind = rng.random_range(0..config.piece_types);
            kinds.push(kind);
            kinds.push(kind);
        }
        kinds.shuffle(&mut rng);

        log::debug!(
            "Generated {}x{} board with {} pairs over {} piece types",
            config.width,
            config.height,
            pairs,
            config.piece_types
        );
        Board::from_kinds(config.width, config.height, &kinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_occurs_an_even_number_of_times() {
        for seed in 0..32 {
            let board = RandomBoardGenerator::new(seed)
                .generate(BoardConfig::new(10, 10, 24))
                .unwrap();

            assert_eq!(board.active_count(), 100);
            assert!(board.is_paired(), "seed {seed} produced unpaired board");
            assert!(board.active_tiles().all(|tile| tile.kind < 24));
        }
    }

    #[test]
    fn frame_surrounds_the_interior() {
        let board = RandomBoardGenerator::new(7)
            .generate(BoardConfig::new(4, 6, 3))
            .unwrap();

        assert_eq!(board.size(), (8, 6));
        assert_eq!(board.interior_size(), (4, 6));
        for tile in board.tiles() {
            assert_eq!(board.is_border(tile.pos), tile.is_empty());
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = BoardConfig::new(6, 6, 8);
        let a = RandomBoardGenerator::new(42).generate(config).unwrap();
        let b = RandomBoardGenerator::new(42).generate(config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_unpairable_configs() {
        assert_eq!(
            RandomBoardGenerator::new(0).generate(BoardConfig::new(3, 5, 4)),
            Err(GameError::OddCellCount {
                width: 3,
                height: 5
            })
        );
        assert_eq!(
            RandomBoardGenerator::new(0).generate(BoardConfig::new(2, 2, 0)),
            Err(GameError::NoPieceTypes)
        );
    }
}
