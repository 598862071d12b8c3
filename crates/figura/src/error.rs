//! Error types for Figura operations.
//!
//! This module provides the main error type [`FiguraError`] which wraps the
//! error conditions that can occur while loading and rendering scenes.

use std::io;

use thiserror::Error;

use figura_core::surface::RenderError;
use figura_parser::LoadError;

/// The main error type for Figura operations.
///
/// The `Load` variant keeps the source text alongside the structured
/// [`LoadError`] so callers can render a diagnostic with a source snippet.
#[derive(Debug, Error)]
pub enum FiguraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Load { err: LoadError, src: String },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FiguraError {
    /// Create a new `Load` error with the associated source text.
    pub fn new_load_error(err: LoadError, src: impl Into<String>) -> Self {
        Self::Load {
            err,
            src: src.into(),
        }
    }
}
