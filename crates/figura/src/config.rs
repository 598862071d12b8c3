//! Configuration types for Figura scene rendering.
//!
//! All types implement [`serde::Deserialize`] for loading from external
//! sources (the CLI feeds them from a TOML file).
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining surface and style
//!   settings.
//! - [`SurfaceConfig`] - The drawable surface dimensions.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use figura::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.surface().size().width(), 960.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use figura_core::{color::Color, geometry::Size};

/// Top-level application configuration combining surface and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Surface configuration section.
    #[serde(default)]
    surface: SurfaceConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified surface and style
    /// configurations.
    pub fn new(surface: SurfaceConfig, style: StyleConfig) -> Self {
        Self { surface, style }
    }

    /// Returns the surface configuration.
    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// The dimensions of the drawing surface.
///
/// Unset fields fall back to the reference surface of 960x540.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels.
    #[serde(default)]
    width: Option<f32>,

    /// Surface height in pixels.
    #[serde(default)]
    height: Option<f32>,
}

impl SurfaceConfig {
    /// Default surface width in pixels.
    pub const DEFAULT_WIDTH: f32 = 960.0;
    /// Default surface height in pixels.
    pub const DEFAULT_HEIGHT: f32 = 540.0;

    /// Creates a new [`SurfaceConfig`] with explicit dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Returns the configured surface size, with defaults applied.
    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(Self::DEFAULT_WIDTH),
            self.height.unwrap_or(Self::DEFAULT_HEIGHT),
        )
    }
}

/// Visual styling configuration for rendered scenes.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Canvas background [`Color`] as a color string. Defaults to black,
    /// matching the reference scenes.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Color, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
            .map(|color| color.unwrap_or_default())
    }
}
