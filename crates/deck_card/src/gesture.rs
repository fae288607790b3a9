//! Pan gesture events and the card's gesture phase
//!
//! ```text
//!   Idle ──Start──▶ Dragging ──End──▶ Releasing ──springs at rest──▶ Idle
//!                    ▲   │ Active                │
//!                    │   └───────┘               │
//!                    └──────────Start────────────┘
//! ```

use crate::geometry::SwipeDirection;

/// A single-pointer pan gesture, as delivered by the host's recognizer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    /// The pointer went down and began moving
    Start,
    /// Cumulative translation since `Start`
    Active { translation_x: f32, translation_y: f32 },
    /// The pointer lifted with the given velocity (px/s)
    End { velocity_x: f32, velocity_y: f32 },
}

impl PanEvent {
    pub fn active(translation_x: f32, translation_y: f32) -> Self {
        PanEvent::Active {
            translation_x,
            translation_y,
        }
    }

    pub fn end(velocity_x: f32, velocity_y: f32) -> Self {
        PanEvent::End {
            velocity_x,
            velocity_y,
        }
    }
}

/// Offsets captured when a drag begins
///
/// Lives exactly as long as one gesture; moves are applied on top of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragContext {
    pub origin_x: f32,
    pub origin_y: f32,
}

impl DragContext {
    pub fn new(origin_x: f32, origin_y: f32) -> Self {
        Self { origin_x, origin_y }
    }

    /// Offsets for a cumulative translation since the drag started
    pub fn offset_for(&self, translation_x: f32, translation_y: f32) -> (f32, f32) {
        (self.origin_x + translation_x, self.origin_y + translation_y)
    }
}

/// Where the card is in its gesture lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GesturePhase {
    /// At rest or entering; not held
    #[default]
    Idle,
    /// Held and following the pointer
    Dragging(DragContext),
    /// Released and springing toward `destination`
    Releasing {
        destination: f32,
        direction: SwipeDirection,
    },
}

impl GesturePhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, GesturePhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GesturePhase::Dragging(_))
    }

    pub fn is_releasing(&self) -> bool {
        matches!(self, GesturePhase::Releasing { .. })
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            GesturePhase::Idle => "idle",
            GesturePhase::Dragging(_) => "dragging",
            GesturePhase::Releasing { .. } => "releasing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_context_is_additive() {
        let ctx = DragContext::new(40.0, -12.0);
        assert_eq!(ctx.offset_for(0.0, 0.0), (40.0, -12.0));
        assert_eq!(ctx.offset_for(10.0, 5.0), (50.0, -7.0));
        // Cumulative: a later move replaces, never adds to, the previous one
        assert_eq!(ctx.offset_for(3.0, 1.0), (43.0, -11.0));
    }

    #[test]
    fn test_phase_predicates() {
        assert!(GesturePhase::default().is_idle());
        assert!(GesturePhase::Dragging(DragContext::new(0.0, 0.0)).is_dragging());
        let releasing = GesturePhase::Releasing {
            destination: 0.0,
            direction: SwipeDirection::Center,
        };
        assert!(releasing.is_releasing());
        assert_eq!(releasing.name(), "releasing");
    }
}
