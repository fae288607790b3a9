//! Draggable card
//!
//! A card owns four animated values (horizontal and vertical offset, Z
//! rotation, and scale) and maps gesture input and frame time onto them:
//!
//! - **Mount**: slides in from above the screen, delayed by its stack index
//! - **Drag start**: zooms to `active_scale` and straightens its tilt
//! - **Drag**: follows the pointer exactly
//! - **Release**: springs toward the left, center, or right snap point chosen
//!   from position and release velocity, then reports where it landed
//!
//! # Example
//!
//! ```
//! use deck_card::{DraggableCard, PanEvent, RotationSource, Size, SwipeDirection};
//!
//! let mut card = DraggableCard::builder("cards/ace.png", Size::new(390.0, 844.0))
//!     .index(0)
//!     .rotation(RotationSource::Seeded(42))
//!     .build()
//!     .unwrap();
//!
//! card.mount();
//! while card.tick(16.0) {}
//! assert_eq!(card.y(), 0.0);
//!
//! card.handle_gesture(PanEvent::Start);
//! card.handle_gesture(PanEvent::active(40.0, 0.0));
//! card.handle_gesture(PanEvent::end(2500.0, 0.0));
//! assert_eq!(card.release_direction(), Some(SwipeDirection::Right));
//! ```

use std::fmt;

use deck_animation::AnimatedValue;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::CardConfig;
use crate::error::{CardError, Result};
use crate::frame::{CardFrame, CardSource, CardStyle, ImageBox, ImageFit, PointerEvents};
use crate::geometry::{CardMetrics, Size, SwipeDirection};
use crate::gesture::{DragContext, GesturePhase, PanEvent};
use crate::pan::{PanRecognizer, PointerEvent};
use crate::snap::snap_point;
use crate::transform::CardTransform;

/// Called once when a released card comes to rest
pub type SettleCallback = Box<dyn FnMut(SwipeDirection) + Send>;

/// Where the initial tilt of a card comes from
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RotationSource {
    /// Exactly this many degrees (clamped to the configured bound)
    Fixed(f32),
    /// Uniform in the configured bound, from a seeded stream
    Seeded(u64),
    /// Uniform in the configured bound, from the thread RNG
    #[default]
    Random,
}

impl RotationSource {
    /// Resolve to degrees in `[-max_deg, max_deg]`
    ///
    /// A non-finite bound resolves as 0. `Fixed` passes a non-finite angle through.
    pub fn resolve(&self, max_deg: f32) -> f32 {
        let max_deg = if max_deg.is_finite() { max_deg.abs() } else { 0.0 };
        match *self {
            RotationSource::Fixed(deg) => deg.clamp(-max_deg, max_deg),
            RotationSource::Seeded(seed) => {
                ChaCha8Rng::seed_from_u64(seed).gen_range(-max_deg..=max_deg)
            }
            RotationSource::Random => rand::thread_rng().gen_range(-max_deg..=max_deg),
        }
    }
}

/// Builder for [`DraggableCard`]
pub struct CardBuilder {
    source: CardSource,
    screen: Size,
    index: Option<usize>,
    config: CardConfig,
    rotation: RotationSource,
    on_settle: Option<SettleCallback>,
}

impl CardBuilder {
    /// Position in the stack; drives the entry stagger
    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn config(mut self, config: CardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rotation(mut self, rotation: RotationSource) -> Self {
        self.rotation = rotation;
        self
    }

    /// Notify when a released card settles
    pub fn on_settle<F>(mut self, callback: F) -> Self
    where
        F: FnMut(SwipeDirection) + Send + 'static,
    {
        self.on_settle = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<DraggableCard> {
        self.config.validate()?;
        let metrics = CardMetrics::new(self.screen, &self.config.geometry, &self.config.release)?;
        let rotation = self
            .rotation
            .resolve(self.config.drag.max_initial_rotation_deg);
        if !rotation.is_finite() {
            return Err(CardError::InvalidConfig(format!(
                "initial rotation must be finite, got {rotation}"
            )));
        }

        tracing::debug!(
            index = ?self.index,
            rotation,
            card_width = metrics.card.width,
            "card created"
        );

        Ok(DraggableCard {
            source: self.source,
            index: self.index,
            x: AnimatedValue::new(0.0),
            y: AnimatedValue::new(-metrics.screen.height),
            rotate_z: AnimatedValue::new(rotation),
            scale: AnimatedValue::new(1.0),
            metrics,
            config: self.config,
            phase: GesturePhase::Idle,
            pan: PanRecognizer::new(),
            on_settle: self.on_settle,
        })
    }
}

/// A playing card that can be dragged and flung off the screen
pub struct DraggableCard {
    source: CardSource,
    index: Option<usize>,
    metrics: CardMetrics,
    config: CardConfig,
    x: AnimatedValue,
    y: AnimatedValue,
    rotate_z: AnimatedValue,
    scale: AnimatedValue,
    phase: GesturePhase,
    pan: PanRecognizer,
    on_settle: Option<SettleCallback>,
}

impl DraggableCard {
    pub fn builder(source: impl Into<CardSource>, screen: Size) -> CardBuilder {
        CardBuilder {
            source: source.into(),
            screen,
            index: None,
            config: CardConfig::default(),
            rotation: RotationSource::default(),
            on_settle: None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start the entry animation: slide down into place after the stagger delay
    pub fn mount(&mut self) {
        let timing = self.config.entry_timing(self.index);
        tracing::debug!(index = ?self.index, delay_ms = timing.delay_ms, "card mounted");
        self.y.timing_to(0.0, timing);
    }

    /// Advance all animations by `dt_ms` milliseconds
    ///
    /// Returns `true` while anything is still moving.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let x = self.x.tick(dt_ms);
        let y = self.y.tick(dt_ms);
        let rotate = self.rotate_z.tick(dt_ms);
        let scale = self.scale.tick(dt_ms);

        if let GesturePhase::Releasing { direction, .. } = self.phase {
            if !x && !y {
                self.phase = GesturePhase::Idle;
                tracing::info!(index = ?self.index, %direction, "card settled");
                if let Some(callback) = self.on_settle.as_mut() {
                    callback(direction);
                }
            }
        }

        tracing::trace!(
            x = self.x.get(),
            y = self.y.get(),
            rotate = self.rotate_z.get(),
            scale = self.scale.get(),
            "card tick"
        );

        x || y || rotate || scale
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Feed a recognized pan event
    pub fn handle_gesture(&mut self, event: PanEvent) {
        match event {
            PanEvent::Start => self.drag_start(),
            PanEvent::Active {
                translation_x,
                translation_y,
            } => self.drag_move(translation_x, translation_y),
            PanEvent::End {
                velocity_x,
                velocity_y,
            } => self.drag_end(velocity_x, velocity_y),
        }
    }

    /// Feed a raw pointer sample through the card's own pan recognizer
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        for pan_event in self.pan.handle(event) {
            self.handle_gesture(pan_event);
        }
    }

    fn drag_start(&mut self) {
        if self.phase.is_releasing() {
            tracing::debug!(index = ?self.index, "release interrupted by a new drag");
        }

        // Release springs keep running until the first move overwrites them
        let ctx = DragContext::new(self.x.get(), self.y.get());
        self.phase = GesturePhase::Dragging(ctx);

        let timing = self.config.default_timing();
        self.scale.timing_to(self.config.drag.active_scale, timing);
        self.rotate_z.timing_to(0.0, timing);

        tracing::debug!(
            index = ?self.index,
            origin_x = ctx.origin_x,
            origin_y = ctx.origin_y,
            "drag started"
        );
    }

    fn drag_move(&mut self, translation_x: f32, translation_y: f32) {
        let GesturePhase::Dragging(ctx) = self.phase else {
            tracing::debug!(phase = self.phase.name(), "ignoring move outside a drag");
            return;
        };

        let (x, y) = ctx.offset_for(translation_x, translation_y);
        self.x.set(x);
        self.y.set(y);
    }

    fn drag_end(&mut self, velocity_x: f32, velocity_y: f32) {
        if !self.phase.is_dragging() {
            tracing::debug!(phase = self.phase.name(), "ignoring release outside a drag");
            return;
        }

        let points = self.metrics.snap_points;
        let destination = snap_point(
            self.x.get(),
            velocity_x,
            &points.as_array(),
            self.config.release.velocity_projection,
        );
        let direction = points.direction_of(destination);

        tracing::debug!(
            index = ?self.index,
            x = self.x.get(),
            velocity_x,
            destination,
            %direction,
            "drag released"
        );

        let spring = self.config.spring;
        self.x.spring_to(destination, velocity_x, spring);
        self.y.spring_to(0.0, velocity_y, spring);
        self.scale.timing_to(1.0, self.config.default_timing());

        self.phase = GesturePhase::Releasing {
            destination,
            direction,
        };
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Ordered render transform for the current values
    pub fn transform(&self) -> CardTransform {
        CardTransform::compose(
            self.config.transform.perspective,
            self.config.transform.tilt_x_deg,
            self.rotate_z.get(),
            self.x.get(),
            self.y.get(),
            self.scale.get(),
        )
    }

    /// Everything needed to draw the card this frame
    pub fn frame(&self) -> CardFrame {
        CardFrame {
            container: self.metrics.screen,
            container_pointer_events: PointerEvents::BoxNone,
            size: self.metrics.card,
            style: CardStyle::default(),
            transform: self.transform(),
            image: ImageBox {
                source: self.source.clone(),
                size: self.metrics.image,
                fit: ImageFit::Contain,
            },
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn x(&self) -> f32 {
        self.x.get()
    }

    pub fn y(&self) -> f32 {
        self.y.get()
    }

    /// Z rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotate_z.get()
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Direction of the release in progress, if any
    pub fn release_direction(&self) -> Option<SwipeDirection> {
        match self.phase {
            GesturePhase::Releasing { direction, .. } => Some(direction),
            _ => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn source(&self) -> &CardSource {
        &self.source
    }

    pub fn metrics(&self) -> &CardMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Delay before the entry animation starts moving
    pub fn entry_delay_ms(&self) -> f32 {
        self.config.entry_delay_ms(self.index)
    }

    pub fn is_animating(&self) -> bool {
        self.x.is_animating()
            || self.y.is_animating()
            || self.rotate_z.is_animating()
            || self.scale.is_animating()
    }

    /// Replace the settle notification
    pub fn set_on_settle<F>(&mut self, callback: F)
    where
        F: FnMut(SwipeDirection) + Send + 'static,
    {
        self.on_settle = Some(Box::new(callback));
    }
}

impl fmt::Debug for DraggableCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableCard")
            .field("source", &self.source)
            .field("index", &self.index)
            .field("x", &self.x.get())
            .field("y", &self.y.get())
            .field("rotate_z", &self.rotate_z.get())
            .field("scale", &self.scale.get())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
