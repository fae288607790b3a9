//! Render description of a card
//!
//! A `CardFrame` is everything a host needs to draw one card: the transform,
//! the card box and its decoration, and the image placed inside it.

use std::sync::Arc;

use crate::geometry::Size;
use crate::transform::CardTransform;

/// Opaque handle to the card's image asset
///
/// The card never inspects it; loading and failures belong to the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardSource(Arc<str>);

impl CardSource {
    pub fn new(handle: impl Into<Arc<str>>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardSource {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

impl From<String> for CardSource {
    fn from(handle: String) -> Self {
        Self::new(handle)
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Drop shadow under the card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f32,
    pub offset_y: f32,
    pub opacity: f32,
    pub radius: f32,
    /// Platform elevation, for hosts that draw shadows from it
    pub elevation: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            offset_x: 0.0,
            offset_y: 2.0,
            opacity: 0.25,
            radius: 3.84,
            elevation: 5.0,
        }
    }
}

/// Decoration of the card box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
    pub background: Color,
    pub corner_radius: f32,
    pub shadow: Shadow,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            corner_radius: 10.0,
            shadow: Shadow::default(),
        }
    }
}

/// How the image is fitted into its box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFit {
    /// Scale to fit entirely inside, preserving aspect ratio
    #[default]
    Contain,
}

/// The image inside the card, centered
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBox {
    pub source: CardSource,
    pub size: Size,
    pub fit: ImageFit,
}

/// Hit-testing behaviour of the full-screen container around the card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerEvents {
    /// The container itself is transparent to input; the card receives it
    #[default]
    BoxNone,
}

/// Everything needed to draw one card
#[derive(Clone, Debug, PartialEq)]
pub struct CardFrame {
    /// Screen the card is centered in
    pub container: Size,
    pub container_pointer_events: PointerEvents,
    /// Card box, centered in `container` before the transform applies
    pub size: Size,
    pub style: CardStyle,
    pub transform: CardTransform,
    pub image: ImageBox,
}

impl CardFrame {
    /// Top-left corner of the untransformed card box
    pub fn origin(&self) -> (f32, f32) {
        (
            (self.container.width - self.size.width) / 2.0,
            (self.container.height - self.size.height) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_source_is_opaque() {
        let a = CardSource::from("cards/queen_of_hearts.png");
        let b = CardSource::from(String::from("cards/queen_of_hearts.png"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "cards/queen_of_hearts.png");
        // Empty handles are the host's problem
        assert_eq!(CardSource::new("").as_str(), "");
    }

    #[test]
    fn test_default_style() {
        let style = CardStyle::default();
        assert_eq!(style.background, Color::WHITE);
        assert_eq!(style.corner_radius, 10.0);
        assert_eq!(style.shadow.offset_y, 2.0);
        assert_eq!(style.shadow.elevation, 5.0);
    }
}
