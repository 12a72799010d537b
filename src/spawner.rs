/// The free-running spawn clock.
///
/// It only counts elapsed intervals; turning a tick into an enemy is
/// `compute::spawn_enemy`, which discards ticks while the game is over.  The
/// clock is never reset, so restarting a game keeps its phase.

use std::time::{Duration, Instant};

pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval: Duration,
    next_due: Instant,
}

impl SpawnTimer {
    /// First tick fires one full interval after `start`.  The interval is at
    /// least one millisecond.
    pub fn new(interval: Duration, start: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        SpawnTimer {
            interval,
            next_due: start + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long to wait from `now` until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Number of ticks that fell due since the last poll.  Ticks are
    /// scheduled from the previous due time, not from `now`, so the phase
    /// does not drift with frame jitter.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now >= self.next_due {
            ticks += 1;
            self.next_due += self.interval;
        }
        ticks
    }
}
