use alloc::vec::Vec;
use core::mem;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Playing -> Paused -> Playing
/// - Playing -> LevelComplete -> Playing (next level)
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Playing (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Paused,
    Won,
    Lost,
    LevelComplete,
}

impl Status {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Won or lost, only a reset leaves these.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub seed: u64,
    pub levels: LevelTable,
    pub scoring: ScoringRules,
    pub max_shuffle_attempts: u32,
}

impl SessionConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            levels: LevelTable::default(),
            scoring: ScoringRules::default(),
            max_shuffle_attempts: DEFAULT_MAX_SHUFFLE_ATTEMPTS,
        }
    }
}

/// Notifications for presentation collaborators, drained with [`Session::take_events`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u8 },
    TileSelected(Point),
    TileDeselected(Point),
    Matched { first: Point, second: Point, path: Path },
    Mismatched { first: Point, second: Point },
    Shuffled(ShuffleOutcome),
    LevelCompleted { level: u8, level_score: u32, total_score: u32 },
    GameWon { total_score: u32 },
    TimeUp,
    Paused,
    Resumed,
}

/// Result of checking the selected pair without touching the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    Match { first: Point, second: Point, path: Path },
    Mismatch { first: Point, second: Point },
}

/// Serializable view of the session handed to collaborators after every command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: u8,
    pub score: u32,
    pub total_score: u32,
    pub time_left: u32,
    pub status: Status,
    pub selection: Vec<Point>,
    pub version: BoardVersion,
    pub active_tiles: CellCount,
    pub game_completed: bool,
    pub stalled: bool,
}

/// Single owner of the board, the selection, the scores and the level progression.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    rng: SmallRng,
    level: u8,
    level_config: LevelConfig,
    board: Board,
    selection: SmallVec<[Point; 2]>,
    score: u32,
    total_score: u32,
    time_left: u32,
    status: Status,
    game_completed: bool,
    version: BoardVersion,
    events: Vec<GameEvent>,
}

impl Session {
    /// Starts a new game at level 1.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let first = config.levels.get(1)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let board = RandomBoardGenerator::new(rng.random()).generate(first.into())?;
        let mut session = Self::assemble(config, rng, 1, first, board);
        session.events.push(GameEvent::LevelStarted { level: 1 });
        Ok(session)
    }

    /// Resumes play on a prepared board at `level`, with the level's full time limit.
    pub fn from_board(config: SessionConfig, level: u8, board: Board) -> Result<Self> {
        let level_config = config.levels.get(level)?;
        let rng = SmallRng::seed_from_u64(config.seed);
        Ok(Self::assemble(config, rng, level, level_config, board))
    }

    fn assemble(
        config: SessionConfig,
        rng: SmallRng,
        level: u8,
        level_config: LevelConfig,
        board: Board,
    ) -> Self {
        Self {
            config,
            rng,
            level,
            level_config,
            board,
            selection: SmallVec::new(),
            score: 0,
            total_score: 0,
            time_left: level_config.time_limit,
            status: Status::Playing,
            game_completed: false,
            version: 1,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn level_config(&self) -> LevelConfig {
        self.level_config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &[Point] {
        &self.selection
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_game_completed(&self) -> bool {
        self.game_completed
    }

    pub fn version(&self) -> BoardVersion {
        self.version
    }

    pub fn hint(&self) -> Option<Hint> {
        find_hint(&self.board)
    }

    /// Playing with tiles left but no connectable pair.
    pub fn is_stalled(&self) -> bool {
        self.status.is_playing() && !self.board.is_cleared() && needs_shuffle(&self.board)
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level: self.level,
            score: self.score,
            total_score: self.total_score,
            time_left: self.time_left,
            status: self.status,
            selection: self.selection.to_vec(),
            version: self.version,
            active_tiles: self.board.active_count(),
            game_completed: self.game_completed,
            stalled: self.is_stalled(),
        }
    }

    /// Generates a fresh board for the current level and restarts its clock and score.
    pub fn initialize_board(&mut self, width: Coord, height: Coord) -> Result<()> {
        let board_config = BoardConfig::new(width, height, self.level_config.piece_types);
        let board = RandomBoardGenerator::new(self.rng.random()).generate(board_config)?;

        self.board = board;
        self.selection.clear();
        self.score = 0;
        self.time_left = self.level_config.time_limit;
        self.status = Status::Playing;
        self.version += 1;
        log::debug!(
            "Level {} started, {}x{} board, {} s",
            self.level,
            width,
            height,
            self.time_left
        );
        self.events.push(GameEvent::LevelStarted { level: self.level });
        Ok(())
    }

    pub fn reset_game(&mut self) -> Result<()> {
        let first = self.config.levels.get(1)?;
        self.level = 1;
        self.level_config = first;
        self.total_score = 0;
        self.game_completed = false;
        self.initialize_board(first.board_size, first.board_size)
    }

    pub fn select_tile(&mut self, pos: Point) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let pos = self.board.validate_coords(pos)?;
        if !self.status.is_playing() || !self.board[pos].is_active() {
            return Ok(Ignored);
        }

        if let Some(index) = self.selection.iter().position(|&selected| selected == pos) {
            self.selection.remove(index);
            self.board.set_selected(pos, false);
            self.events.push(GameEvent::TileDeselected(pos));
            return Ok(Deselected);
        }

        if self.selection.len() >= 2 {
            return Ok(Ignored);
        }

        self.selection.push(pos);
        self.board.set_selected(pos, true);
        self.events.push(GameEvent::TileSelected(pos));
        Ok(if self.selection.len() == 2 {
            PairReady
        } else {
            Selected
        })
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.selection.clear();
        self.board.clear_selected();
        true
    }

    /// Runs the connectivity check on the selected pair, if there is one.
    pub fn evaluate_selection(&self) -> Option<Evaluation> {
        let &[first, second] = self.selection.as_slice() else {
            return None;
        };
        Some(match can_connect(&self.board, first, second) {
            Connection::Connected(path) => Evaluation::Match {
                first,
                second,
                path,
            },
            Connection::Disconnected => Evaluation::Mismatch { first, second },
        })
    }

    /// Evaluates the selected pair and then commits the result: removal and score on a match,
    /// an empty selection otherwise.
    pub fn resolve_selection(&mut self) -> Result<ResolveOutcome> {
        self.check_playing()?;

        Ok(match self.evaluate_selection() {
            None => ResolveOutcome::NoPair,
            Some(Evaluation::Match {
                first,
                second,
                path,
            }) => {
                let progress = self.commit_match(first, second, path.clone());
                ResolveOutcome::Matched { path, progress }
            }
            Some(Evaluation::Mismatch { first, second }) => {
                self.clear_selection();
                log::debug!("No connection between {} and {}", first, second);
                self.events.push(GameEvent::Mismatched { first, second });
                ResolveOutcome::Mismatched
            }
        })
    }

    /// Removes a connectable pair directly, bypassing the selection.
    pub fn remove_tiles(&mut self, first: Point, second: Point) -> Result<Progress> {
        self.check_playing()?;
        let first = self.board.validate_coords(first)?;
        let second = self.board.validate_coords(second)?;

        match can_connect(&self.board, first, second) {
            Connection::Connected(path) => Ok(self.commit_match(first, second, path)),
            Connection::Disconnected => Err(GameError::NotConnectable),
        }
    }

    fn commit_match(&mut self, first: Point, second: Point, path: Path) -> Progress {
        self.clear_selection();
        self.board.remove_pair(first, second);
        self.score += self.config.scoring.match_points;
        log::debug!("Matched {} and {}, level score {}", first, second, self.score);
        self.events.push(GameEvent::Matched {
            first,
            second,
            path,
        });

        if !self.board.is_cleared() {
            return Progress::Continue;
        }

        self.total_score += self.score + self.config.scoring.completion_bonus;
        if self.level < self.config.levels.last_level() {
            self.status = Status::LevelComplete;
            log::debug!("Level {} complete, total {}", self.level, self.total_score);
            self.events.push(GameEvent::LevelCompleted {
                level: self.level,
                level_score: self.score,
                total_score: self.total_score,
            });
            Progress::LevelComplete
        } else {
            self.status = Status::Won;
            self.game_completed = true;
            log::debug!("Game won, total {}", self.total_score);
            self.events.push(GameEvent::GameWon {
                total_score: self.total_score,
            });
            Progress::GameWon
        }
    }

    /// Reassigns the remaining types until a move exists. Score is left alone.
    pub fn shuffle_board(&mut self) -> Result<ShuffleOutcome> {
        self.check_playing()?;

        let (board, outcome) =
            shuffle_until_solvable(&self.board, self.config.max_shuffle_attempts, &mut self.rng);
        self.board = board;
        self.selection.clear();
        self.version += 1;
        self.events.push(GameEvent::Shuffled(outcome));
        Ok(outcome)
    }

    /// Advances the clock by one second.
    pub fn update_timer(&mut self) -> TimerOutcome {
        if !self.status.is_playing() {
            return TimerOutcome::Ignored;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return TimerOutcome::Ticked;
        }

        self.status = Status::Lost;
        log::debug!("Time is up on level {}", self.level);
        self.events.push(GameEvent::TimeUp);
        TimerOutcome::TimeUp
    }

    pub fn pause_game(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        self.status = Status::Paused;
        self.events.push(GameEvent::Paused);
        true
    }

    pub fn resume_game(&mut self) -> bool {
        if !matches!(self.status, Status::Paused) {
            return false;
        }
        self.status = Status::Playing;
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Moves from a completed level to the next one. Fails without changes anywhere else,
    /// including past the last configured level.
    pub fn next_level(&mut self) -> Result<()> {
        if !matches!(self.status, Status::LevelComplete) {
            return Err(GameError::InvalidTransition { from: self.status });
        }

        let next = self.level.checked_add(1).ok_or(GameError::UnknownLevel(u8::MAX))?;
        let config = self.config.levels.get(next)?;
        let previous = (self.level, self.level_config);
        (self.level, self.level_config) = (next, config);
        if let Err(err) = self.initialize_board(config.board_size, config.board_size) {
            (self.level, self.level_config) = previous;
            return Err(err);
        }
        Ok(())
    }

    fn check_playing(&self) -> Result<()> {
        if self.status.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying(self.status))
        }
    }
}
