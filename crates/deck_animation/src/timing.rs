//! Time-based tweens
//!
//! A `Timing` moves a value from where it was when the tween was assigned to
//! a target over a fixed duration, optionally after a delay. The value holds
//! still while the delay runs.

use crate::easing::Easing;

/// Duration, easing, and start delay of a tween (all times in milliseconds)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingConfig {
    pub duration_ms: f32,
    pub easing: Easing,
    pub delay_ms: f32,
}

impl TimingConfig {
    pub fn new(duration_ms: f32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            delay_ms: 0.0,
        }
    }

    /// Delay the start of the tween
    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(300.0, Easing::InOutEase)
    }
}

/// An in-flight tween
#[derive(Clone, Copy, Debug)]
pub struct Timing {
    from: f32,
    to: f32,
    config: TimingConfig,
    elapsed_ms: f32,
}

impl Timing {
    pub fn new(from: f32, to: f32, config: TimingConfig) -> Self {
        Self {
            from,
            to,
            config,
            elapsed_ms: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Time spent past the delay
    fn active_ms(&self) -> f32 {
        self.elapsed_ms - self.config.delay_ms
    }

    /// Whether the delay has elapsed and the value has begun to move
    pub fn has_started(&self) -> bool {
        self.active_ms() > 0.0
    }

    /// Linear progress in `[0, 1]`, 0 while delayed
    pub fn progress(&self) -> f32 {
        let active = self.active_ms();
        if active <= 0.0 {
            return 0.0;
        }
        if self.config.duration_ms <= 0.0 {
            return 1.0;
        }
        (active / self.config.duration_ms).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.has_started() && self.progress() >= 1.0
    }

    /// Current eased value
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.config.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms.max(0.0);
    }
}
