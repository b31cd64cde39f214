// src/scheduler.rs
use std::time::{Duration, Instant};

/// Slowest accepted tick rate: one frame every 100 s.
pub const MIN_FRAME_RATE_HZ: f32 = 0.01;

/// Fixed-rate tick clock for the frame loop.
pub struct TickScheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// Rates below `MIN_FRAME_RATE_HZ` (or NaN) are raised to it.
    pub fn from_rate(frame_rate_hz: f32) -> Self {
        let hz = frame_rate_hz.max(MIN_FRAME_RATE_HZ) as f64;
        Self::new(Duration::from_secs_f64(1.0 / hz))
    }

    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    #[cfg(test)]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// True at most once per period. The first call always ticks; after a stall
    /// longer than one period the clock restarts from `now` instead of catching up.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            Some(due) => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            None => {
                self.next_due = Some(now + self.period);
                true
            }
        }
    }

    /// Time left before the next tick, for scheduling a repaint.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}
