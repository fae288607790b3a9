//! Spring physics animation
//!
//! RK4-integrated damped springs. A spring can be seeded with an initial
//! velocity so a released gesture continues its motion into the animation.
//! Units are pixels and seconds.

use serde::{Deserialize, Serialize};

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from the target under which the spring may come to rest
    pub rest_displacement: f32,
    /// Speed (units/s) under which the spring may come to rest
    pub rest_speed: f32,
}

impl SpringConfig {
    /// Create a new spring configuration with the default rest thresholds
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            ..Self::default()
        }
    }

    /// A wobbly spring with overshoot (good for playful UI)
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// A stiff, snappy spring
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// A slow spring with no overshoot (critically damped)
    pub fn molasses() -> Self {
        Self::new(100.0, 20.0, 1.0)
    }

    /// Override the rest thresholds
    pub fn with_rest(mut self, displacement: f32, speed: f32) -> Self {
        self.rest_displacement = displacement;
        self.rest_speed = speed;
        self
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    /// Soft, slightly bouncy spring used for card release
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Seed the spring with an initial velocity (units/s)
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the target the spring pulls toward
    pub fn with_target(mut self, target: f32) -> Self {
        self.target = target;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Retarget mid-flight; velocity carries over
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Check if the spring is at rest on its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_displacement
            && self.velocity.abs() < self.config.rest_speed
    }

    /// Step the spring simulation by `dt` seconds using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.settle();
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;

        if self.is_settled() {
            self.settle();
        }
    }

    fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}
