use std::time::Duration;
use std::time::Instant;

/// Lets an announcement through at most once per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }
    /// Whether to announce at `now`. A yes counts as the latest announcement.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) <= self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
    /// Counts `now` as an announcement without making one.
    pub fn arm(&mut self, now: Instant) {
        self.last = Some(now);
    }
    /// Next call to [`Throttle::ready`] says yes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
