use std::time::{Duration, Instant};

/// Fixed-rate frame clock for the main loop.
///
/// The loop never recurses: each iteration asks how long until the next tick
/// is due, spends that long polling for input, then runs update/draw once the
/// budget has elapsed. Animation time is monotonic milliseconds since the
/// clock was created.
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    budget: Duration,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            budget: Duration::from_micros(1_000_000 / fps.max(1) as u64),
        }
    }

    /// Remaining time before the next tick is due. Zero when overdue.
    pub fn time_until_tick(&self) -> Duration {
        self.budget.saturating_sub(self.last_tick.elapsed())
    }

    pub fn tick_due(&self) -> bool {
        self.last_tick.elapsed() >= self.budget
    }

    /// Mark the tick as consumed.
    pub fn tick(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Elapsed animation time in milliseconds.
    pub fn elapsed_ms(&self) -> f32 {
        self.start.elapsed().as_secs_f32() * 1000.0
    }
}
