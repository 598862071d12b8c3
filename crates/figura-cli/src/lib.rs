//! CLI logic for the Figura scene tool.
//!
//! This module contains the core CLI logic for the Figura scene tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use figura::{FiguraError, SceneBuilder, interact::InputState};

/// Run the Figura CLI application
///
/// This function loads the input scene description, selects the requested
/// scene, settles its derived labels with one idle update pass, and writes
/// the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FiguraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Loading errors
/// - An out-of-range scene index
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), FiguraError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process the description using the SceneBuilder API
    let builder = SceneBuilder::new(app_config);
    let mut scenes = builder.parse(&source)?;

    if scenes.select(args.scene).is_none() {
        return Err(FiguraError::Config(format!(
            "scene index {} is out of range: the description declares {} scene(s)",
            args.scene,
            scenes.len()
        )));
    }

    let bounds = builder.config().surface().size();
    let Some(group) = scenes.active_mut() else {
        return Err(FiguraError::Config(
            "the description declares no scenes".to_string(),
        ));
    };

    // Distance labels without explicit content derive their text from the
    // point positions during an update pass.
    group.update(&InputState::idle(), bounds);

    let svg = builder.render_svg(group)?;

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
