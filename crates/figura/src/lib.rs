//! Figura - interactive geometric diagrams from a declarative scene format.
//!
//! Loading and rendering for Figura scene descriptions: draggable points,
//! lines, triangles, Bézier curves, and live distance labels, with headless
//! SVG export.

pub mod config;

mod error;
mod export;

pub use figura_core::{color, geometry, interact, scene, surface, text};

pub use error::FiguraError;
pub use export::SvgSurface;

use log::{debug, info};

use figura_core::{
    scene::{Group, Scenes},
    surface::Surface as _,
};

use config::AppConfig;

/// Builder for loading and rendering Figura scenes.
///
/// # Examples
///
/// ```rust,no_run
/// use figura::{SceneBuilder, config::AppConfig};
///
/// let source = "\
/// @scene
/// POINT 100 400 8 white
/// POINT 400 400 8 white
/// LNTXT ADDR0 ADDR1 white 14
/// END
/// ";
///
/// let builder = SceneBuilder::new(AppConfig::default());
///
/// // Parse source into scene groups
/// let scenes = builder.parse(source).expect("Failed to parse");
///
/// // Render the active group to SVG
/// let svg = builder
///     .render_svg(scenes.active().unwrap())
///     .expect("Failed to render");
/// ```
#[derive(Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a scene description into its [`Scenes`].
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Load`] for any malformed statement, carrying
    /// the source text for diagnostic rendering.
    pub fn parse(&self, source: &str) -> Result<Scenes, FiguraError> {
        info!("Loading scenes");

        let scenes = figura_parser::load_scenes(source)
            .map_err(|err| FiguraError::new_load_error(err, source))?;

        debug!(groups = scenes.len(); "Scenes loaded");
        Ok(scenes)
    }

    /// Render one scene group to an SVG string.
    ///
    /// Runs a single clear + draw pass against an [`SvgSurface`] sized from
    /// the configuration. The group is drawn as-is; run
    /// [`Group::update`](figura_core::scene::Group::update) first if derived
    /// labels should reflect current point positions.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] for an unparsable background color and
    /// [`FiguraError::Render`] for surface failures.
    pub fn render_svg(&self, group: &Group) -> Result<String, FiguraError> {
        let size = self.config.surface().size();
        let background = self
            .config
            .style()
            .background_color()
            .map_err(FiguraError::Config)?;

        info!(width = size.width(), height = size.height(); "Rendering scene to SVG");

        let mut surface = SvgSurface::new(size, background);
        surface.clear(background)?;
        group.draw(&mut surface)?;
        surface.present()?;

        debug!("SVG rendered successfully");
        Ok(surface.into_document())
    }
}

#[cfg(test)]
mod tests {
    use figura_core::{geometry::Size, interact::InputState};

    use super::*;

    const SOURCE: &str = "\
@triangle
POINT 100 400 8 white
POINT 400 400 8 white
POINT 400 100 8 white
LINE ADDR0 ADDR1 2 red
LINE ADDR1 ADDR2 2 green
LINE ADDR0 ADDR2 2 blue
LNTXT ADDR0 ADDR2 white 14
END
";

    #[test]
    fn test_parse_and_render_svg() {
        let builder = SceneBuilder::default();
        let mut scenes = builder.parse(SOURCE).unwrap();
        assert_eq!(scenes.len(), 1);

        let bounds = builder.config().surface().size();
        let group = scenes.active_mut().unwrap();
        group.update(&InputState::idle(), bounds);

        let svg = builder.render_svg(scenes.active().unwrap()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("<line"));
        // The hypotenuse label shows the live distance.
        assert!(svg.contains("424.264"));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let builder = SceneBuilder::default();
        let err = builder.parse("@scene\nBOGUS 1\nEND\n").unwrap_err();
        match err {
            FiguraError::Load { err, src } => {
                assert_eq!(err.line, 2);
                assert!(src.contains("BOGUS"));
            }
            other => panic!("expected a load error, got {other}"),
        }
    }

    #[test]
    fn test_render_respects_surface_config() {
        use config::{AppConfig, StyleConfig, SurfaceConfig};

        let config = AppConfig::new(SurfaceConfig::new(320.0, 200.0), StyleConfig::default());
        let builder = SceneBuilder::new(config);
        assert_eq!(builder.config().surface().size(), Size::new(320.0, 200.0));

        let scenes = builder.parse(SOURCE).unwrap();
        let svg = builder.render_svg(scenes.active().unwrap()).unwrap();
        assert!(svg.contains("width=\"320\""));
        assert!(svg.contains("height=\"200\""));
    }
}
