//! Error adapter for converting FiguraError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Load errors carry
//! the source text and the byte span of the offending line, so they render
//! with a source snippet; every other variant renders as a plain report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use figura::FiguraError;
use figura_parser::LoadError;

/// Adapter for a scene loading error.
///
/// This adapter pairs a [`LoadError`] with the source text it occurred in and
/// implements [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct LoadErrorAdapter<'a> {
    /// The wrapped load error
    err: &'a LoadError,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> LoadErrorAdapter<'a> {
    /// Create a new load error adapter.
    pub fn new(err: &'a LoadError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for LoadErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for LoadErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.kind)
    }
}

impl std::error::Error for LoadErrorAdapter<'_> {}

impl MietteDiagnostic for LoadErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("figura::load"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        None
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::new(self.err.span.start.into(), self.err.span.len());
        let message = Some(format!("line {}", self.err.line));
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            message, span,
        ))))
    }
}

/// Adapter for non-diagnostic [`FiguraError`] variants.
///
/// This adapter handles errors that don't have source location information,
/// such as I/O errors, render errors, and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a FiguraError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FiguraError::Io(_) => "figura::io",
            FiguraError::Load { .. } => return None,
            FiguraError::Render(_) => "figura::render",
            FiguraError::Config(_) => "figura::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        None
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a load error with source location or a plain
/// error, providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A load error with source location information.
    Load(LoadErrorAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Load(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Load(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Load(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Load(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Load(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Load(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`FiguraError`] into a list of reportable errors.
///
/// For [`FiguraError::Load`], this returns a [`Reportable`] carrying the
/// source text so miette can show the offending line. For other error
/// variants, this returns a single plain [`Reportable`].
pub fn to_reportables(err: &FiguraError) -> Vec<Reportable<'_>> {
    match err {
        FiguraError::Load { err: load_err, src } => {
            vec![Reportable::Load(LoadErrorAdapter::new(load_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
