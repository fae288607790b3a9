//! Screen-derived card geometry
//!
//! The card box, its image, and the three horizontal snap points are all
//! fixed functions of the screen size.

use serde::{Deserialize, Serialize};

use crate::config::{GeometryConfig, ReleaseConfig};
use crate::error::{CardError, Result};

/// Width and height in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Where a released card ends up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Thrown off the left edge
    Left,
    /// Returned to rest
    Center,
    /// Thrown off the right edge
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Center => "center",
            SwipeDirection::Right => "right",
        }
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three release destinations, in left-to-right order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapPoints {
    /// Distance from center to either off-screen destination
    pub side: f32,
}

impl SnapPoints {
    pub fn left(&self) -> f32 {
        -self.side
    }

    pub fn center(&self) -> f32 {
        0.0
    }

    pub fn right(&self) -> f32 {
        self.side
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.left(), self.center(), self.right()]
    }

    /// Direction a destination offset corresponds to
    pub fn direction_of(&self, destination: f32) -> SwipeDirection {
        if destination < 0.0 {
            SwipeDirection::Left
        } else if destination > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Center
        }
    }
}

/// Card dimensions for one screen size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardMetrics {
    pub screen: Size,
    pub card: Size,
    pub image: Size,
    pub snap_points: SnapPoints,
}

impl CardMetrics {
    /// Derive metrics with the default geometry and snap padding
    pub fn for_screen(screen: Size) -> Result<Self> {
        Self::new(screen, &GeometryConfig::default(), &ReleaseConfig::default())
    }

    /// Derive metrics for `screen`
    pub fn new(screen: Size, geometry: &GeometryConfig, release: &ReleaseConfig) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(screen.width) || !valid(screen.height) {
            return Err(CardError::InvalidScreen {
                width: screen.width,
                height: screen.height,
            });
        }

        let card_width = screen.width - geometry.horizontal_inset;
        if card_width <= 0.0 {
            return Err(CardError::CardTooWide {
                screen_width: screen.width,
                inset: geometry.horizontal_inset,
            });
        }

        let card = Size::new(card_width, card_width * geometry.aspect_ratio);
        let image_width = card_width * geometry.image_ratio;
        let image = Size::new(image_width, image_width * geometry.aspect_ratio);
        let side = (screen.width + card_width + release.snap_padding) / 2.0;

        Ok(Self {
            screen,
            card,
            image,
            snap_points: SnapPoints { side },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_for_phone_screen() {
        let metrics = CardMetrics::for_screen(Size::new(390.0, 844.0)).unwrap();

        assert_eq!(metrics.card.width, 262.0);
        assert!((metrics.card.height - 262.0 * 722.0 / 368.0).abs() < 1e-3);
        assert!((metrics.image.width - 235.8).abs() < 1e-3);
        assert!((metrics.image.height - 235.8 * 722.0 / 368.0).abs() < 1e-2);

        // (390 + 262 + 50) / 2
        assert_eq!(metrics.snap_points.side, 351.0);
        assert_eq!(metrics.snap_points.as_array(), [-351.0, 0.0, 351.0]);
    }

    #[test]
    fn test_rejects_degenerate_screens() {
        assert!(matches!(
            CardMetrics::for_screen(Size::new(0.0, 800.0)),
            Err(CardError::InvalidScreen { .. })
        ));
        assert!(matches!(
            CardMetrics::for_screen(Size::new(400.0, f32::NAN)),
            Err(CardError::InvalidScreen { .. })
        ));
        assert!(matches!(
            CardMetrics::for_screen(Size::new(100.0, 800.0)),
            Err(CardError::CardTooWide { .. })
        ));
    }

    #[test]
    fn test_direction_of_destination() {
        let points = SnapPoints { side: 300.0 };
        assert_eq!(points.direction_of(points.left()), SwipeDirection::Left);
        assert_eq!(points.direction_of(points.center()), SwipeDirection::Center);
        assert_eq!(points.direction_of(points.right()), SwipeDirection::Right);
    }
}
