#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use command::*;
pub use connect::*;
pub use error::*;
pub use generator::*;
pub use level::*;
pub use schedule::*;
pub use session::*;
pub use shuffle::*;
pub use tile::*;
pub use types::*;

mod board;
mod command;
mod connect;
mod error;
mod generator;
mod level;
mod schedule;
mod session;
mod shuffle;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Added to the level score for every matched pair.
    pub match_points: u32,
    /// Added to the total on top of the level score when a board is cleared.
    pub completion_bonus: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            match_points: 100,
            completion_bonus: 100,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    Ignored,
    Selected,
    Deselected,
    /// Second tile picked, the pair is waiting to be resolved.
    PairReady,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// What clearing a pair did to the level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    Continue,
    LevelComplete,
    GameWon,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveOutcome {
    NoPair,
    Matched { path: Path, progress: Progress },
    Mismatched,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerOutcome {
    Ignored,
    Ticked,
    TimeUp,
}

impl TimerOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
