//! Card configuration
//!
//! Every tunable constant of the card lives here and can be loaded from TOML.
//! Missing sections and fields fall back to their defaults, so a file only
//! needs to name what it changes:
//!
//! ```toml
//! [entry]
//! duration_ms = 400.0
//!
//! [spring]
//! stiffness = 180.0
//! damping = 12.0
//! ```

use std::fs;
use std::path::Path;

use deck_animation::{Easing, SpringConfig, TimingConfig};
use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// Complete card configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CardConfig {
    pub entry: EntryConfig,
    pub timing: DefaultTimingConfig,
    pub drag: DragConfig,
    pub release: ReleaseConfig,
    pub spring: SpringConfig,
    pub geometry: GeometryConfig,
    pub transform: TransformConfig,
}

/// Staggered entry from off-screen
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Duration of the entry tween; also the stagger step between cards
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            easing: Easing::InOutEase,
        }
    }
}

/// Timing used by transitions that do not name their own duration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultTimingConfig {
    pub default_duration_ms: f32,
    pub easing: Easing,
}

impl Default for DefaultTimingConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 300.0,
            easing: Easing::InOutEase,
        }
    }
}

/// Feedback while the card is held
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DragConfig {
    /// Scale the card zooms to while dragged
    pub active_scale: f32,
    /// Bound of the random tilt a card is dealt with, in degrees
    pub max_initial_rotation_deg: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            active_scale: 1.1,
            max_initial_rotation_deg: 10.0,
        }
    }
}

/// Snap decision on release
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Extra distance past the screen edge for the off-screen snap points
    pub snap_padding: f32,
    /// Seconds of travel at release velocity used to project the drop position
    pub velocity_projection: f32,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            snap_padding: 50.0,
            velocity_projection: 0.2,
        }
    }
}

/// Card box proportions relative to the screen
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Screen width minus card width
    pub horizontal_inset: f32,
    /// Card height / card width
    pub aspect_ratio: f32,
    /// Image width / card width
    pub image_ratio: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            horizontal_inset: 128.0,
            aspect_ratio: 722.0 / 368.0,
            image_ratio: 0.9,
        }
    }
}

/// Static part of the render transform
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformConfig {
    pub perspective: f32,
    pub tilt_x_deg: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            perspective: 1500.0,
            tilt_x_deg: 30.0,
        }
    }
}

impl CardConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded card config from {}", path.display());
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<()> {
        non_negative("entry.duration_ms", self.entry.duration_ms)?;
        non_negative("timing.default_duration_ms", self.timing.default_duration_ms)?;
        positive("drag.active_scale", self.drag.active_scale)?;
        non_negative(
            "drag.max_initial_rotation_deg",
            self.drag.max_initial_rotation_deg,
        )?;
        non_negative("release.snap_padding", self.release.snap_padding)?;
        non_negative("release.velocity_projection", self.release.velocity_projection)?;
        positive("spring.stiffness", self.spring.stiffness)?;
        non_negative("spring.damping", self.spring.damping)?;
        positive("spring.mass", self.spring.mass)?;
        positive("spring.rest_displacement", self.spring.rest_displacement)?;
        positive("spring.rest_speed", self.spring.rest_speed)?;
        non_negative("geometry.horizontal_inset", self.geometry.horizontal_inset)?;
        positive("geometry.aspect_ratio", self.geometry.aspect_ratio)?;
        positive("geometry.image_ratio", self.geometry.image_ratio)?;
        positive("transform.perspective", self.transform.perspective)?;
        finite("transform.tilt_x_deg", self.transform.tilt_x_deg)?;
        Ok(())
    }

    /// Entry tween for the card at `index`, delayed by `index` stagger steps
    pub fn entry_timing(&self, index: Option<usize>) -> TimingConfig {
        TimingConfig::new(self.entry.duration_ms, self.entry.easing)
            .with_delay(self.entry_delay_ms(index))
    }

    /// Stagger delay for the card at `index`; no index means no delay
    pub fn entry_delay_ms(&self, index: Option<usize>) -> f32 {
        index.map_or(0.0, |i| i as f32 * self.entry.duration_ms)
    }

    /// Timing for scale and rotation transitions
    pub fn default_timing(&self) -> TimingConfig {
        TimingConfig::new(self.timing.default_duration_ms, self.timing.easing)
    }
}

fn finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CardError::InvalidConfig(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(CardError::InvalidConfig(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

fn positive(name: &str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(CardError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.entry.duration_ms, 250.0);
        assert_eq!(config.timing.default_duration_ms, 300.0);
        assert_eq!(config.drag.active_scale, 1.1);
        assert_eq!(config.spring, SpringConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CardConfig::from_toml_str(
            r#"
            [entry]
            duration_ms = 400.0

            [spring]
            stiffness = 180.0
            "#,
        )
        .unwrap();

        assert_eq!(config.entry.duration_ms, 400.0);
        assert_eq!(config.entry.easing, Easing::InOutEase);
        assert_eq!(config.spring.stiffness, 180.0);
        assert_eq!(config.spring.damping, 10.0);
        assert_eq!(config.geometry, GeometryConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = CardConfig::default();
        config.release.snap_padding = 80.0;
        config.entry.easing = Easing::EaseOut;

        let text = config.to_toml().unwrap();
        let parsed = CardConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_cubic_bezier_easing_from_toml() {
        let config = CardConfig::from_toml_str(
            r#"
            [entry]
            easing = { cubic_bezier = [0.42, 0.0, 0.58, 1.0] }
            "#,
        )
        .unwrap();
        assert_eq!(
            config.entry.easing,
            Easing::CubicBezier([0.42, 0.0, 0.58, 1.0])
        );
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = CardConfig::from_toml_str("[spring]\nmass = 0.0\n").unwrap_err();
        assert!(matches!(err, CardError::InvalidConfig(ref msg) if msg.contains("spring.mass")));

        let err = CardConfig::from_toml_str("[entry]\nduration_ms = -1.0\n").unwrap_err();
        assert!(matches!(err, CardError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = CardConfig::from_toml_str("[entry\nduration_ms = ").unwrap_err();
        assert!(matches!(err, CardError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CardConfig::load(Path::new("/nonexistent/deck.toml")).unwrap_err();
        assert!(matches!(err, CardError::Io { .. }));
    }

    #[test]
    fn test_entry_delay_is_index_times_duration() {
        let config = CardConfig::default();
        assert_eq!(config.entry_delay_ms(None), 0.0);
        assert_eq!(config.entry_delay_ms(Some(0)), 0.0);
        assert_eq!(config.entry_delay_ms(Some(3)), 750.0);
        assert_eq!(config.entry_timing(Some(2)).delay_ms, 500.0);
    }
}
