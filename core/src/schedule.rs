use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Commit the selected pair after its path or mismatch was shown. Only applies while the
    /// same pair is still selected.
    ResolveSelection { first: Point, second: Point },
    /// Reshuffle a stalled board after the player was told about it.
    AutoShuffle,
}

/// An effect scheduled against the board as it was at `version`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deferred {
    pub effect: Effect,
    pub version: BoardVersion,
    /// Milliseconds on the caller's clock.
    pub due_at: u64,
}

/// Presentation delays, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTimings {
    pub path_display: u64,
    pub mismatch_display: u64,
    pub auto_shuffle: u64,
}

impl Default for EffectTimings {
    fn default() -> Self {
        Self {
            path_display: 400,
            mismatch_display: 500,
            auto_shuffle: 2000,
        }
    }
}

impl EffectTimings {
    /// Picks the effect the session is waiting for, with its delay: a full selection needs
    /// resolving, otherwise a stalled board needs reshuffling.
    pub fn plan(&self, session: &Session) -> Option<(Effect, u64)> {
        match session.evaluate_selection() {
            Some(Evaluation::Match { first, second, .. }) => {
                Some((Effect::ResolveSelection { first, second }, self.path_display))
            }
            Some(Evaluation::Mismatch { first, second }) => {
                Some((Effect::ResolveSelection { first, second }, self.mismatch_display))
            }
            None if session.is_stalled() => Some((Effect::AutoShuffle, self.auto_shuffle)),
            None => None,
        }
    }
}

/// Pending deferred effects ordered by due time, first scheduled first among equal times.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectQueue {
    pending: Vec<Deferred>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, effect: Effect, version: BoardVersion, due_at: u64) -> Deferred {
        let deferred = Deferred {
            effect,
            version,
            due_at,
        };
        let index = self.pending.partition_point(|pending| pending.due_at <= due_at);
        self.pending.insert(index, deferred);
        deferred
    }

    /// Drops every pending effect of the given kind, returning how many were dropped.
    pub fn cancel(&mut self, effect: Effect) -> usize {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.effect != effect);
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, effect: Effect) -> bool {
        self.pending.iter().any(|pending| pending.effect == effect)
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|pending| pending.due_at)
    }

    pub fn pop_due(&mut self, now: u64) -> Option<Deferred> {
        if self.next_due()? <= now {
            Some(self.pending.remove(0))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireOutcome {
    /// The board changed since scheduling, nothing was applied.
    Stale,
    Resolved(ResolveOutcome),
    Shuffled(ShuffleOutcome),
    /// The effect no longer applied to the current state, e.g. the selection changed.
    Skipped,
}

impl Session {
    /// Applies a deferred effect unless the board it was scheduled against has been replaced.
    /// A resolution is skipped once its pair is no longer the selection.
    pub fn fire(&mut self, deferred: Deferred) -> Result<FireOutcome> {
        if deferred.version != self.version() {
            log::warn!(
                "Discarding stale {:?} scheduled for board version {}, current is {}",
                deferred.effect,
                deferred.version,
                self.version()
            );
            return Ok(FireOutcome::Stale);
        }

        match deferred.effect {
            Effect::ResolveSelection { first, second }
                if self.status().is_playing() && self.selection() == [first, second] =>
            {
                self.resolve_selection().map(FireOutcome::Resolved)
            }
            Effect::AutoShuffle if self.is_stalled() => {
                self.shuffle_board().map(FireOutcome::Shuffled)
            }
            _ => Ok(FireOutcome::Skipped),
        }
    }
}
