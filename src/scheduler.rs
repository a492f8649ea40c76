use std::time::Duration;

/// Fixed-interval tick source driven by frame deltas.
///
/// Frames feed elapsed time in; a tick fires once the accumulated time reaches
/// the interval, and the accumulator starts over from zero.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    /// Add `dt` and report whether a tick is due.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }
}
