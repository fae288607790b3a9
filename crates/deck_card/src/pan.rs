//! Pan recognizer
//!
//! Turns raw pointer samples into the `PanEvent`s a card consumes: cumulative
//! translation from the press position, and a release velocity estimated over
//! the most recent samples.
//!
//! # Example
//!
//! ```
//! use deck_card::pan::{PanRecognizer, PointerEvent};
//! use deck_card::PanEvent;
//!
//! let mut pan = PanRecognizer::new();
//! assert!(pan.handle(PointerEvent::down(0, 100.0, 100.0, 0.0)).is_empty());
//!
//! let events = pan.handle(PointerEvent::moved(0, 130.0, 100.0, 16.0));
//! assert_eq!(events[0], PanEvent::Start);
//! assert_eq!(events[1], PanEvent::active(30.0, 0.0));
//! ```

use smallvec::SmallVec;

use crate::gesture::PanEvent;

/// Window of samples used for the release velocity (ms)
const VELOCITY_WINDOW_MS: f64 = 100.0;

/// Raw pointer input in screen coordinates; times in milliseconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { id: u64, x: f32, y: f32, time_ms: f64 },
    Move { id: u64, x: f32, y: f32, time_ms: f64 },
    Up { id: u64, x: f32, y: f32, time_ms: f64 },
    /// The platform took the pointer away (e.g. a system gesture)
    Cancel { id: u64 },
}

impl PointerEvent {
    pub fn down(id: u64, x: f32, y: f32, time_ms: f64) -> Self {
        PointerEvent::Down { id, x, y, time_ms }
    }

    pub fn moved(id: u64, x: f32, y: f32, time_ms: f64) -> Self {
        PointerEvent::Move { id, x, y, time_ms }
    }

    pub fn up(id: u64, x: f32, y: f32, time_ms: f64) -> Self {
        PointerEvent::Up { id, x, y, time_ms }
    }

    fn id(&self) -> u64 {
        match *self {
            PointerEvent::Down { id, .. }
            | PointerEvent::Move { id, .. }
            | PointerEvent::Up { id, .. }
            | PointerEvent::Cancel { id } => id,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    x: f32,
    y: f32,
    time_ms: f64,
}

/// State of the tracked pointer
#[derive(Clone, Debug)]
struct Tracking {
    id: u64,
    start_x: f32,
    start_y: f32,
    started: bool,
    samples: Vec<Sample>,
}

impl Tracking {
    fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
        let cutoff = sample.time_ms - VELOCITY_WINDOW_MS;
        // Keep one sample at or before the window edge so the span stays covered
        while self.samples.len() > 2 && self.samples[1].time_ms <= cutoff {
            self.samples.remove(0);
        }
    }

    fn translation(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.start_x, y - self.start_y)
    }

    /// Velocity in px/s over the samples inside the window
    fn velocity(&self) -> (f32, f32) {
        let Some(last) = self.samples.last() else {
            return (0.0, 0.0);
        };
        let cutoff = last.time_ms - VELOCITY_WINDOW_MS;
        let Some(first) = self.samples.iter().find(|s| s.time_ms >= cutoff) else {
            return (0.0, 0.0);
        };

        let elapsed_s = (last.time_ms - first.time_ms) / 1000.0;
        if elapsed_s <= 0.0 {
            return (0.0, 0.0);
        }
        (
            ((last.x - first.x) as f64 / elapsed_s) as f32,
            ((last.y - first.y) as f64 / elapsed_s) as f32,
        )
    }
}

/// Single-pointer pan recognizer
#[derive(Clone, Debug, Default)]
pub struct PanRecognizer {
    tracking: Option<Tracking>,
}

/// Events emitted for one pointer sample (at most `Start`, `Active`/`End`)
pub type PanEvents = SmallVec<[PanEvent; 2]>;

impl PanRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pointer is currently down
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Feed one pointer sample
    pub fn handle(&mut self, event: PointerEvent) -> PanEvents {
        let mut out = PanEvents::new();

        // Only the pointer that went down first drives the gesture
        if let Some(tracking) = &self.tracking {
            if tracking.id != event.id() {
                return out;
            }
        }

        match event {
            PointerEvent::Down { id, x, y, time_ms } => {
                if self.tracking.is_none() {
                    self.tracking = Some(Tracking {
                        id,
                        start_x: x,
                        start_y: y,
                        started: false,
                        samples: vec![Sample { x, y, time_ms }],
                    });
                }
            }
            PointerEvent::Move { x, y, time_ms, .. } => {
                if let Some(tracking) = self.tracking.as_mut() {
                    if !tracking.started {
                        tracking.started = true;
                        out.push(PanEvent::Start);
                    }
                    tracking.push(Sample { x, y, time_ms });
                    let (dx, dy) = tracking.translation(x, y);
                    out.push(PanEvent::active(dx, dy));
                }
            }
            PointerEvent::Up { x, y, time_ms, .. } => {
                if let Some(mut tracking) = self.tracking.take() {
                    if !tracking.started {
                        // A tap still runs the release path
                        out.push(PanEvent::Start);
                    }
                    tracking.push(Sample { x, y, time_ms });
                    let (vx, vy) = tracking.velocity();
                    out.push(PanEvent::end(vx, vy));
                }
            }
            PointerEvent::Cancel { .. } => {
                if let Some(tracking) = self.tracking.take() {
                    if tracking.started {
                        out.push(PanEvent::end(0.0, 0.0));
                    }
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_is_cumulative_from_press() {
        let mut pan = PanRecognizer::new();
        pan.handle(PointerEvent::down(1, 50.0, 50.0, 0.0));

        let events = pan.handle(PointerEvent::moved(1, 60.0, 55.0, 16.0));
        assert_eq!(events.as_slice(), &[PanEvent::Start, PanEvent::active(10.0, 5.0)]);

        let events = pan.handle(PointerEvent::moved(1, 80.0, 40.0, 32.0));
        assert_eq!(events.as_slice(), &[PanEvent::active(30.0, -10.0)]);
    }

    #[test]
    fn test_release_velocity_over_recent_window() {
        let mut pan = PanRecognizer::new();
        pan.handle(PointerEvent::down(1, 0.0, 0.0, 0.0));
        // Slow at first, then 2 px/ms to the right for the last 100 ms
        pan.handle(PointerEvent::moved(1, 5.0, 0.0, 100.0));
        for i in 1..=5 {
            let t = 100.0 + 20.0 * i as f64;
            pan.handle(PointerEvent::moved(1, 5.0 + 40.0 * i as f32, 0.0, t));
        }

        let events = pan.handle(PointerEvent::up(1, 205.0, 0.0, 200.0));
        match events.as_slice() {
            [PanEvent::End {
                velocity_x,
                velocity_y,
            }] => {
                assert!((velocity_x - 2000.0).abs() < 1.0, "vx = {velocity_x}");
                assert_eq!(*velocity_y, 0.0);
            }
            other => panic!("unexpected events {other:?}"),
        }
        assert!(!pan.is_tracking());
    }

    #[test]
    fn test_tap_emits_start_and_end() {
        let mut pan = PanRecognizer::new();
        pan.handle(PointerEvent::down(1, 10.0, 10.0, 0.0));
        let events = pan.handle(PointerEvent::up(1, 10.0, 10.0, 80.0));
        assert_eq!(events.as_slice(), &[PanEvent::Start, PanEvent::end(0.0, 0.0)]);
    }

    #[test]
    fn test_second_pointer_is_ignored() {
        let mut pan = PanRecognizer::new();
        pan.handle(PointerEvent::down(1, 0.0, 0.0, 0.0));
        assert!(pan.handle(PointerEvent::down(2, 100.0, 100.0, 5.0)).is_empty());
        assert!(pan.handle(PointerEvent::moved(2, 120.0, 100.0, 10.0)).is_empty());
        assert!(pan.handle(PointerEvent::up(2, 120.0, 100.0, 20.0)).is_empty());
        assert!(pan.is_tracking());
    }

    #[test]
    fn test_cancel_ends_with_zero_velocity() {
        let mut pan = PanRecognizer::new();
        pan.handle(PointerEvent::down(1, 0.0, 0.0, 0.0));
        pan.handle(PointerEvent::moved(1, 50.0, 0.0, 10.0));
        let events = pan.handle(PointerEvent::Cancel { id: 1 });
        assert_eq!(events.as_slice(), &[PanEvent::end(0.0, 0.0)]);
        assert!(!pan.is_tracking());
    }
}
