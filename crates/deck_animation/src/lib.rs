//! Deck Animation System
//!
//! Animated scalar values for interactive UI elements.
//!
//! # Features
//!
//! - **Easing**: quadratic curves, the inertial `ease` bezier, and arbitrary cubic beziers
//! - **Timing**: fixed-duration tweens with an optional start delay
//! - **Spring Physics**: RK4-integrated springs seeded with a release velocity
//! - **Last Write Wins**: assigning a value or animation supersedes the one in flight
//!
//! Values are advanced by the host, once per frame, through `AnimatedValue::tick`.

pub mod animated;
pub mod easing;
pub mod spring;
pub mod timing;

pub use animated::{AnimatedValue, Animation};
pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use timing::{Timing, TimingConfig};
