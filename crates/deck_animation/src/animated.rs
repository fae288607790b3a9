//! Animated scalar values
//!
//! An `AnimatedValue` is a single `f32` that may be driven by one in-flight
//! animation at a time. Assigning a new animation, or setting the value
//! directly, supersedes whatever was running (last write wins).
//!
//! There is no clock here: the host advances values with `tick(dt_ms)` once
//! per frame.
//!
//! # Example
//!
//! ```
//! use deck_animation::{AnimatedValue, Easing, SpringConfig, TimingConfig};
//!
//! let mut scale = AnimatedValue::new(1.0);
//! scale.timing_to(1.1, TimingConfig::new(300.0, Easing::InOutEase));
//!
//! while scale.tick(16.0) {}
//! assert_eq!(scale.get(), 1.1);
//!
//! let mut x = AnimatedValue::new(120.0);
//! x.spring_to(0.0, -900.0, SpringConfig::default());
//! while x.tick(16.0) {}
//! assert_eq!(x.get(), 0.0);
//! ```

use crate::spring::{Spring, SpringConfig};
use crate::timing::{Timing, TimingConfig};

/// Largest integration step for springs (seconds); longer frames are subdivided
const MAX_SPRING_STEP: f32 = 1.0 / 120.0;

/// The animation currently driving an `AnimatedValue`
#[derive(Clone, Copy, Debug)]
pub enum Animation {
    Timing(Timing),
    Spring(Spring),
}

impl Animation {
    fn tick(&mut self, dt_ms: f32) {
        match self {
            Animation::Timing(timing) => timing.tick(dt_ms),
            Animation::Spring(spring) => {
                let mut remaining = dt_ms.max(0.0) / 1000.0;
                while remaining > 0.0 && !spring.is_settled() {
                    let step = remaining.min(MAX_SPRING_STEP);
                    spring.step(step);
                    remaining -= step;
                }
            }
        }
    }

    fn value(&self) -> f32 {
        match self {
            Animation::Timing(timing) => timing.value(),
            Animation::Spring(spring) => spring.value(),
        }
    }

    fn target(&self) -> f32 {
        match self {
            Animation::Timing(timing) => timing.target(),
            Animation::Spring(spring) => spring.target(),
        }
    }

    fn is_done(&self) -> bool {
        match self {
            Animation::Timing(timing) => timing.is_finished(),
            Animation::Spring(spring) => spring.is_settled(),
        }
    }
}

/// A scalar driven by at most one animation
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    value: f32,
    animation: Option<Animation>,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            animation: None,
        }
    }

    /// Current value
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Assign immediately, cancelling any in-flight animation
    pub fn set(&mut self, value: f32) {
        self.animation = None;
        self.value = value;
    }

    /// Replace the in-flight animation
    pub fn animate(&mut self, animation: Animation) {
        self.value = animation.value();
        self.animation = Some(animation);
    }

    /// Tween from the current value to `target`
    pub fn timing_to(&mut self, target: f32, config: TimingConfig) {
        self.animate(Animation::Timing(Timing::new(self.value, target, config)));
    }

    /// Spring from the current value to `target`, seeded with `velocity` (units/s)
    pub fn spring_to(&mut self, target: f32, velocity: f32, config: SpringConfig) {
        let spring = Spring::new(config, self.value)
            .with_target(target)
            .with_velocity(velocity);
        self.animate(Animation::Spring(spring));
    }

    /// The in-flight animation, if any
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Where the value is heading: the animation target, or the value itself at rest
    pub fn target(&self) -> f32 {
        self.animation
            .as_ref()
            .map_or(self.value, Animation::target)
    }

    /// Current velocity (units/s); only springs report one
    pub fn velocity(&self) -> f32 {
        match &self.animation {
            Some(Animation::Spring(spring)) => spring.velocity(),
            _ => 0.0,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the in-flight animation by `dt_ms` milliseconds
    ///
    /// Returns `true` while an animation is still running.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        animation.tick(dt_ms);
        self.value = animation.value();

        if animation.is_done() {
            tracing::trace!(value = self.value, "animation finished");
            self.animation = None;
        }
        self.animation.is_some()
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
