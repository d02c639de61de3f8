use serde::{Deserialize, Serialize};

use crate::*;

/// Every way collaborators can drive a session. Commands are applied one at a time by the
/// session's owner, so timer ticks, clicks and deferred effects never interleave.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Initialize { width: Coord, height: Coord },
    Select(Point),
    ClearSelection,
    Resolve,
    Remove(Point, Point),
    Shuffle,
    Tick,
    Reset,
    Pause,
    Resume,
    NextLevel,
    Fire(Deferred),
}

impl Session {
    pub fn apply(&mut self, command: Command) -> Result<Snapshot> {
        use Command::*;

        log::trace!("Applying {:?}", command);
        match command {
            Initialize { width, height } => self.initialize_board(width, height)?,
            Select(pos) => {
                self.select_tile(pos)?;
            }
            ClearSelection => {
                self.clear_selection();
            }
            Resolve => {
                self.resolve_selection()?;
            }
            Remove(first, second) => {
                self.remove_tiles(first, second)?;
            }
            Shuffle => {
                self.shuffle_board()?;
            }
            Tick => {
                self.update_timer();
            }
            Reset => self.reset_game()?,
            Pause => {
                self.pause_game();
            }
            Resume => {
                self.resume_game();
            }
            NextLevel => self.next_level()?,
            Fire(deferred) => {
                self.fire(deferred)?;
            }
        }
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: Coord, col: Coord) -> Point {
        Point::new(row, col)
    }

    #[test]
    fn commands_drive_a_level_to_completion() {
        let board = Board::from_layout(&["abba"]).unwrap();
        let mut session = Session::from_board(SessionConfig::new(2), 3, board).unwrap();

        session.apply(Command::Select(p(1, 2))).unwrap();
        let snapshot = session.apply(Command::Select(p(1, 3))).unwrap();
        assert_eq!(snapshot.selection, [p(1, 2), p(1, 3)]);

        let snapshot = session.apply(Command::Resolve).unwrap();
        assert_eq!(snapshot.score, 100);
        assert_eq!(snapshot.active_tiles, 2);

        let snapshot = session.apply(Command::Remove(p(1, 1), p(1, 4))).unwrap();
        assert_eq!(snapshot.status, Status::LevelComplete);
        assert_eq!(snapshot.total_score, 300);

        let snapshot = session.apply(Command::NextLevel).unwrap();
        assert_eq!(snapshot.level, 4);
        assert_eq!(snapshot.time_left, 120);
        assert_eq!(snapshot.active_tiles, 100);
    }

    #[test]
    fn ignored_commands_still_report_state() {
        let board = Board::from_layout(&["aa"]).unwrap();
        let mut session = Session::from_board(SessionConfig::new(2), 1, board).unwrap();

        let paused = session.apply(Command::Pause).unwrap();
        assert_eq!(paused.status, Status::Paused);
        assert_eq!(session.apply(Command::Pause).unwrap(), paused);
        assert_eq!(session.apply(Command::Tick).unwrap().time_left, 300);
        assert!(session.apply(Command::Select(p(1, 1))).unwrap().selection.is_empty());

        assert_eq!(
            session.apply(Command::Shuffle),
            Err(GameError::NotPlaying(Status::Paused))
        );
        assert_eq!(
            session.apply(Command::NextLevel),
            Err(GameError::InvalidTransition {
                from: Status::Paused
            })
        );

        assert_eq!(session.apply(Command::Resume).unwrap().status, Status::Playing);
    }

    #[test]
    fn stale_fire_leaves_board_alone() {
        let board = Board::from_layout(&["ab", "ba"]).unwrap();
        let mut session = Session::from_board(SessionConfig::new(6), 1, board).unwrap();
        let stale = Deferred {
            effect: Effect::AutoShuffle,
            version: session.version(),
            due_at: 0,
        };

        session.apply(Command::Reset).unwrap();
        let board = session.board().clone();
        let snapshot = session.apply(Command::Fire(stale)).unwrap();

        assert_eq!(session.board(), &board);
        assert_eq!(snapshot.level, 1);
    }
}
