use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Attempts made before giving up on finding a solvable permutation.
pub const DEFAULT_MAX_SHUFFLE_ATTEMPTS: u32 = 100;

/// A connectable pair found on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub first: Point,
    pub second: Point,
    pub path: Path,
}

/// Returns the first connectable pair in row-major pair order, if any.
pub fn find_hint(board: &Board) -> Option<Hint> {
    let tiles: Vec<&Tile> = board.active_tiles().collect();
    for (i, a) in tiles.iter().enumerate() {
        for b in &tiles[i + 1..] {
            if a.kind != b.kind {
                continue;
            }
            if let Connection::Connected(path) = can_connect(board, a.pos, b.pos) {
                return Some(Hint {
                    first: a.pos,
                    second: b.pos,
                    path,
                });
            }
        }
    }
    None
}

pub fn has_valid_moves(board: &Board) -> bool {
    find_hint(board).is_some()
}

/// True when no active pair of the same type can be connected.
pub fn needs_shuffle(board: &Board) -> bool {
    !has_valid_moves(board)
}

/// Permutes the types of the active tiles, leaving positions, frame and removed cells untouched.
pub fn shuffle_kinds<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let mut kinds: Vec<PieceType> = board.active_tiles().map(|tile| tile.kind).collect();
    kinds.shuffle(rng);

    let mut shuffled = board.clone();
    shuffled.assign_active_kinds(&kinds);
    shuffled
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleOutcome {
    /// A permutation with at least one move was found.
    Solvable { attempts: u32 },
    /// Every attempt was a dead end, the last one is returned anyway.
    Exhausted { attempts: u32 },
}

impl ShuffleOutcome {
    pub const fn is_solvable(self) -> bool {
        matches!(self, Self::Solvable { .. })
    }

    pub const fn attempts(self) -> u32 {
        match self {
            Self::Solvable { attempts } | Self::Exhausted { attempts } => attempts,
        }
    }
}

/// Reshuffles until the board has a move or `max_attempts` permutations were tried.
pub fn shuffle_until_solvable<R: Rng + ?Sized>(
    board: &Board,
    max_attempts: u32,
    rng: &mut R,
) -> (Board, ShuffleOutcome) {
    if board.is_cleared() {
        return (board.clone(), ShuffleOutcome::Exhausted { attempts: 0 });
    }

    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;
    loop {
        let shuffled = shuffle_kinds(board, rng);
        attempts += 1;

        if has_valid_moves(&shuffled) {
            log::debug!("Found solvable shuffle after {} attempts", attempts);
            return (shuffled, ShuffleOutcome::Solvable { attempts });
        }
        if attempts >= max_attempts {
            log::warn!(
                "No solvable shuffle in {} attempts, keeping the last one",
                attempts
            );
            return (shuffled, ShuffleOutcome::Exhausted { attempts });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn active_layout(board: &Board) -> Vec<Point> {
        board.active_tiles().map(|tile| tile.pos).collect()
    }

    #[test]
    fn hint_is_first_connectable_pair() {
        let board = Board::from_layout(&["ab", "ba", "cc"]).unwrap();

        let hint = find_hint(&board).unwrap();
        assert_eq!(hint.first, Point::new(3, 1));
        assert_eq!(hint.second, Point::new(3, 2));
        assert_eq!(hint.path.points(), &[Point::new(3, 1), Point::new(3, 2)]);
    }

    #[test]
    fn diagonal_pairs_need_a_shuffle() {
        let board = Board::from_layout(&["ab", "ba"]).unwrap();

        assert!(needs_shuffle(&board));
        assert_eq!(find_hint(&board), None);
    }

    #[test]
    fn shuffle_until_solvable_repairs_dead_end() {
        let board = Board::from_layout(&["ab", "ba"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);

        let (shuffled, outcome) = shuffle_until_solvable(&board, DEFAULT_MAX_SHUFFLE_ATTEMPTS, &mut rng);

        assert!(outcome.is_solvable());
        assert!(!needs_shuffle(&shuffled));
    }

    #[test]
    fn shuffle_preserves_positions_and_kind_multiset() {
        let mut board = Board::from_layout(&["a.bc", "cb.a", "dd.."]).unwrap();
        board.set_selected(Point::new(1, 1), true);
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..16 {
            let shuffled = shuffle_kinds(&board, &mut rng);

            assert_eq!(active_layout(&shuffled), active_layout(&board));
            assert_eq!(shuffled.kind_counts(), board.kind_counts());
            assert!(shuffled.tiles().all(|tile| !tile.is_selected()));
            for tile in board.tiles().filter(|tile| tile.is_empty()) {
                assert_eq!(&shuffled[tile.pos], tile);
            }
        }
    }

    #[test]
    fn exhausted_shuffle_returns_last_attempt() {
        // no two tiles share a type, so no permutation can ever have a move
        let board = Board::from_layout(&["ab", "cd"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);

        let (shuffled, outcome) = shuffle_until_solvable(&board, 3, &mut rng);
        assert_eq!(outcome, ShuffleOutcome::Exhausted { attempts: 3 });
        assert_eq!(shuffled.kind_counts(), board.kind_counts());

        let (_, outcome) = shuffle_until_solvable(&board, 0, &mut rng);
        assert_eq!(outcome, ShuffleOutcome::Exhausted { attempts: 1 });
    }

    #[test]
    fn cleared_board_is_returned_untouched() {
        let board = Board::from_layout(&["..", ".."]).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        let (shuffled, outcome) = shuffle_until_solvable(&board, 10, &mut rng);
        assert_eq!(shuffled, board);
        assert_eq!(outcome, ShuffleOutcome::Exhausted { attempts: 0 });
    }
}
