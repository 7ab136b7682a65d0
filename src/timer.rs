//! Per-round countdown.
//!
//! Time is kept in whole ticks so that a 7s round at 100ms ticks is exactly 70
//! ticks long; seconds are derived on read. The host only has to call `tick()`
//! at the configured interval.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerEvent {
    /// Not running (never started, cancelled, or already expired).
    Idle,
    Tick { remaining_secs: f64 },
    /// Reported once, on the tick that reaches zero.
    Expired,
}

#[derive(Clone, Debug)]
pub struct CountdownTimer {
    tick_secs: f64,
    total_ticks: u32,
    remaining_ticks: u32,
    running: bool,
}

impl CountdownTimer {
    pub fn new(tick_secs: f64) -> Self {
        Self {
            tick_secs,
            total_ticks: 0,
            remaining_ticks: 0,
            running: false,
        }
    }

    /// (Re)starts the countdown; any previous run is discarded.
    pub fn start(&mut self, duration_secs: f64) {
        let ticks = (duration_secs / self.tick_secs).round().max(1.0) as u32;
        self.total_ticks = ticks;
        self.remaining_ticks = ticks;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }
        // Last tick (<= epsilon left) clamps to zero and stops.
        if self.remaining_ticks <= 1 {
            self.remaining_ticks = 0;
            self.running = false;
            return TimerEvent::Expired;
        }
        self.remaining_ticks -= 1;
        TimerEvent::Tick {
            remaining_secs: self.remaining_secs(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ticks as f64 * self.tick_secs
    }

    pub fn total_secs(&self) -> f64 {
        self.total_ticks as f64 * self.tick_secs
    }

    /// Remaining share of the round, 1.0 at start, 0.0 at expiry.
    pub fn fraction(&self) -> f64 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        self.remaining_ticks as f64 / self.total_ticks as f64
    }

    /// Morph progress 0–100, advancing `100 / total_ticks` per elapsed tick.
    pub fn reveal_progress(&self) -> f64 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        let step = 100.0 / self.total_ticks as f64;
        let elapsed = self.total_ticks - self.remaining_ticks;
        (elapsed as f64 * step).clamp(0.0, 100.0)
    }
}
