//! Deck Card
//!
//! A draggable playing card for swipe-to-discard stacks.
//!
//! # Features
//!
//! - **Staggered Entry**: each card slides in from above the screen, delayed by its stack index
//! - **Direct Manipulation**: the card follows the pointer, zoomed and straightened while held
//! - **Velocity Snapping**: on release the card springs to the left, center, or right snap point
//! - **Fixed Transform Order**: perspective, tilt, rotation, translation, then scale
//! - **Headless**: produces a [`CardFrame`] per tick; drawing belongs to the host
//!
//! The host drives a card with [`DraggableCard::handle_gesture`] (or
//! [`DraggableCard::handle_pointer`] for raw input) and one
//! [`DraggableCard::tick`] per frame.

pub mod card;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod pan;
pub mod snap;
pub mod transform;

pub use card::{CardBuilder, DraggableCard, RotationSource, SettleCallback};
pub use config::CardConfig;
pub use error::{CardError, Result};
pub use frame::{CardFrame, CardSource, CardStyle, Color, ImageBox, ImageFit, PointerEvents, Shadow};
pub use geometry::{CardMetrics, Size, SnapPoints, SwipeDirection};
pub use gesture::{DragContext, GesturePhase, PanEvent};
pub use pan::{PanRecognizer, PointerEvent};
pub use snap::snap_point;
pub use transform::{CardTransform, Mat4, TransformOp};

/// Prelude for hosts embedding cards
pub mod prelude {
    pub use crate::card::{DraggableCard, RotationSource};
    pub use crate::config::CardConfig;
    pub use crate::error::{CardError, Result};
    pub use crate::frame::CardFrame;
    pub use crate::geometry::{Size, SwipeDirection};
    pub use crate::gesture::{GesturePhase, PanEvent};
    pub use crate::pan::{PanRecognizer, PointerEvent};
    pub use deck_animation::{Easing, SpringConfig};
}
