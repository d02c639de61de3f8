use anyhow::Result;
use pairlink_core::*;

/// Milliseconds between timer ticks.
const TICK_MS: u64 = 1000;

/// Plays a session on a simulated clock, picking the first hint whenever nothing is pending.
/// Every change goes through [`Session::apply`], deferred effects go through an [`EffectQueue`].
pub struct Autoplay {
    session: Session,
    queue: EffectQueue,
    timings: EffectTimings,
    idle: bool,
    now: u64,
    next_tick: u64,
}

impl Autoplay {
    pub fn new(session: Session, idle: bool) -> Self {
        Self {
            session,
            queue: EffectQueue::new(),
            timings: EffectTimings::default(),
            idle,
            now: 0,
            next_tick: TICK_MS,
        }
    }

    pub fn run(mut self) -> Result<Snapshot> {
        loop {
            self.report_events();
            match self.session.status() {
                Status::Won | Status::Lost => break,
                Status::LevelComplete => {
                    self.queue.clear();
                    self.session.apply(Command::NextLevel)?;
                    continue;
                }
                Status::Paused => {
                    self.session.apply(Command::Resume)?;
                    continue;
                }
                Status::Playing => {}
            }

            if self.queue.is_empty() {
                if let Some((effect, delay)) = self.timings.plan(&self.session) {
                    self.queue
                        .schedule(effect, self.session.version(), self.now + delay);
                } else if self.pick_hint()? {
                    continue;
                }
            }

            self.advance()?;
        }
        self.report_events();
        Ok(self.session.snapshot())
    }

    fn pick_hint(&mut self) -> Result<bool> {
        if self.idle || !self.session.selection().is_empty() {
            return Ok(false);
        }
        let Some(hint) = self.session.hint() else {
            return Ok(false);
        };
        log::trace!("Picking {} and {} at {} ms", hint.first, hint.second, self.now);
        self.session.apply(Command::Select(hint.first))?;
        self.session.apply(Command::Select(hint.second))?;
        Ok(true)
    }

    /// Moves the clock to the next due effect or tick and runs everything due by then.
    fn advance(&mut self) -> Result<()> {
        self.now = match self.queue.next_due() {
            Some(due) => due.min(self.next_tick),
            None => self.next_tick,
        };

        while let Some(deferred) = self.queue.pop_due(self.now) {
            self.session.apply(Command::Fire(deferred))?;
        }
        if self.now >= self.next_tick {
            self.session.apply(Command::Tick)?;
            self.next_tick += TICK_MS;
        }
        Ok(())
    }

    fn report_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                GameEvent::LevelStarted { level } => log::info!("Level {} started", level),
                GameEvent::LevelCompleted {
                    level,
                    level_score,
                    total_score,
                } => log::info!(
                    "Level {} cleared with {} points, {} in total",
                    level,
                    level_score,
                    total_score
                ),
                GameEvent::Shuffled(outcome) => log::info!("Board shuffled: {:?}", outcome),
                GameEvent::TimeUp => log::info!("Time is up at {} ms", self.now),
                GameEvent::GameWon { total_score } => {
                    log::info!("Game won with {} points", total_score)
                }
                event => log::debug!("{:?}", event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_player_clears_every_level() {
        // with a single piece type the first two active tiles always connect, so no level stalls
        let levels = LevelTable::new(vec![LevelConfig::new(60, 4, 1); 3]).unwrap();
        let config = SessionConfig {
            levels,
            ..SessionConfig::new(2024)
        };
        let session = Session::new(config).unwrap();

        let snapshot = Autoplay::new(session, false).run().unwrap();

        assert_eq!(snapshot.status, Status::Won);
        assert_eq!(snapshot.level, 3);
        assert!(snapshot.game_completed);
        assert_eq!(snapshot.total_score, 3 * (8 * 100 + 100));
    }

    #[test]
    fn idle_player_runs_out_of_time() {
        let levels = LevelTable::new(vec![LevelConfig::new(3, 4, 2)]).unwrap();
        let config = SessionConfig {
            levels,
            ..SessionConfig::new(8)
        };
        let session = Session::new(config).unwrap();

        let snapshot = Autoplay::new(session, true).run().unwrap();

        assert_eq!(snapshot.status, Status::Lost);
        assert_eq!(snapshot.time_left, 0);
        assert_eq!(snapshot.total_score, 0);
    }

    #[test]
    fn single_level_is_cleared() {
        let levels = LevelTable::new(vec![LevelConfig::new(60, 2, 1)]).unwrap();
        let config = SessionConfig {
            levels,
            ..SessionConfig::new(3)
        };
        let session = Session::new(config).unwrap();

        let snapshot = Autoplay::new(session, false).run().unwrap();

        assert_eq!(snapshot.status, Status::Won);
        assert_eq!(snapshot.total_score, 2 * 100 + 100);
        assert_eq!(snapshot.time_left, 60);
    }
}
