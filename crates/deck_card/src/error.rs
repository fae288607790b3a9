//! Card error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a card or loading its configuration
#[derive(Error, Debug)]
pub enum CardError {
    /// Screen size is not a finite, positive area
    #[error("Invalid screen size {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },

    /// The horizontal inset leaves no room for the card
    #[error("Screen width {screen_width} leaves no room for a card with inset {inset}")]
    CardTooWide { screen_width: f32, inset: f32 },

    /// A configuration value is out of range
    #[error("Invalid card config: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML
    #[error("Failed to parse card config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize card config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for card operations
pub type Result<T> = std::result::Result<T, CardError>;
